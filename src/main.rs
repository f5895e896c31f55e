//! # Oracle Schema Exporter
//!
//! An interactive helper that asks for Oracle connection details, lists the
//! schemas on the instance, and runs Oracle Data Pump (`expdp`) for the one
//! you pick, keeping a local copy of the export log.
//!
//! This application follows the **Hexagonal Architecture** (Ports and Adapters)
//! so the prompt-and-export flow can be exercised without a database.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;

use crate::application::orchestrator::Orchestrator;
use crate::config::{AppConfig, CliArgs};
use crate::infrastructure::datapump::expdp_adapter::ExpdpAdapter;
use crate::infrastructure::local_storage::local_artifact_adapter::LocalArtifactAdapter;
use crate::infrastructure::oracle::oracle_metadata_adapter::OracleMetadataAdapter;
use crate::infrastructure::terminal::console::TerminalConsole;
use clap::Parser;
use log::{error, info};
use std::process;
use std::sync::Arc;

fn main() {
    // 1. Initialize Logging
    env_logger::init();

    // 2. Parse Arguments
    let args = CliArgs::parse();

    // 3. Load Config
    let mut config = if let Some(config_path) = &args.config {
        match AppConfig::from_file(config_path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to load config: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    } else {
        AppConfig::default()
    };

    // Merge CLI overrides and the password environment fallback
    config.merge_cli(&args);
    config.apply_env();

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // 4. Initialize Hexagonal Components
    let mut orchestrator = Orchestrator::new(
        Arc::new(OracleMetadataAdapter::new()),
        Arc::new(ExpdpAdapter::new()),
        Arc::new(LocalArtifactAdapter::new()),
        Box::new(TerminalConsole::new()),
        config,
    );

    // 5. Run Orchestrator
    match orchestrator.run() {
        Ok(summary) => {
            info!("Export of {} finished; dump file {}", summary.schema, summary.dump_file);
        }
        Err(e) => {
            error!("Export failed: {:?}", e);
            println!("\nError: {}", e);
            println!("\nTool execution failed.");
            process::exit(1);
        }
    }
}
