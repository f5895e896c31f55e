pub mod artifact_port;
pub mod console_port;
pub mod datapump_port;
pub mod metadata_port;
