pub mod oracle_metadata_adapter;
