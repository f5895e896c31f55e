pub mod expdp_adapter;
