//! The core application logic that walks the user through one schema export.
//!
//! This module coordinates between the console, the metadata source, the
//! artifact writer and the Data Pump runner: collect credentials, list and
//! pick a schema, record the impdp details, run `expdp`, report.

use crate::application::prompts::{parse_port, parse_selection};
use crate::config::AppConfig as Config;
use crate::domain::entities::{
    ConnectionParams, ExportPlan, ExportSummary, ImpdpDetails, SchemaDetails,
};
use crate::domain::errors::{ExportError, Result};
use crate::ports::artifact_port::ArtifactPort;
use crate::ports::console_port::ConsolePort;
use crate::ports::datapump_port::{DataPumpPort, ExpdpCommand};
use crate::ports::metadata_port::MetadataPort;
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates the interactive export of a single Oracle schema.
pub struct Orchestrator {
    metadata_port: Arc<dyn MetadataPort>,
    datapump_port: Arc<dyn DataPumpPort>,
    artifact_port: Arc<dyn ArtifactPort>,
    console: Box<dyn ConsolePort>,
    config: Config,
}

impl Orchestrator {
    /// Creates a new Orchestrator with the provided components.
    pub fn new(
        metadata_port: Arc<dyn MetadataPort>,
        datapump_port: Arc<dyn DataPumpPort>,
        artifact_port: Arc<dyn ArtifactPort>,
        console: Box<dyn ConsolePort>,
        config: Config,
    ) -> Self {
        Self {
            metadata_port,
            datapump_port,
            artifact_port,
            console,
            config,
        }
    }

    /// Entry point for running the full export workflow.
    ///
    /// Any failure stops the run; nothing is retried.
    pub fn run(&mut self) -> Result<ExportSummary> {
        self.console.say("\n--- Oracle Database Export Tool ---");

        let params = self.collect_credentials()?;
        info!("Using connection {:?}", params);

        let schemas = self.fetch_schemas(&params)?;
        let schema = self.select_schema(&schemas)?;
        self.console
            .say(&format!("\nYou have selected schema: {}", schema));

        let plan = ExportPlan::now(
            &schema,
            &self.config.export.log_dir,
            &self.config.export.details_dir,
        );
        self.create_impdp_details(&params, &plan)?;
        self.run_export(&params, &plan)?;

        let summary = ExportSummary {
            schema,
            dump_file: plan.dump_file,
            log_file: plan.local_log_path,
            details_file: plan.details_path,
        };
        self.console.say(&format!("\n{}", summary));
        self.console.say("\nTool execution finished successfully.");
        Ok(summary)
    }

    /// Asks for whatever connection details the configuration did not provide.
    fn collect_credentials(&mut self) -> Result<ConnectionParams> {
        let db = self.config.database.clone();
        let complete = db.username.is_some()
            && db.password.is_some()
            && db.host.is_some()
            && db.port.is_some()
            && db.service.is_some();
        if !complete {
            self.console
                .say("\nPlease enter your Oracle database connection details:");
        }

        let user = match db.username {
            Some(u) => u,
            None => self.ask("User: ", "user")?,
        };
        let password = match db.password {
            Some(p) => p,
            None => self
                .console
                .read_secret("Password: ")?
                .ok_or_else(|| ExportError::InputClosed("password".into()))?,
        };
        let host = match db.host {
            Some(h) => h,
            None => self.ask("Host (e.g., localhost): ", "host")?,
        };
        let port = match db.port {
            Some(p) => p,
            None => self.ask_port()?,
        };
        let service = match db.service {
            Some(s) => s,
            None => self.ask("Service Name (e.g., orcl): ", "service name")?,
        };

        Ok(ConnectionParams {
            user: user.trim().to_string(),
            password,
            host: host.trim().to_string(),
            port,
            service: service.trim().to_string(),
        })
    }

    fn ask(&mut self, label: &str, what: &str) -> Result<String> {
        self.console
            .read_line(label)?
            .ok_or_else(|| ExportError::InputClosed(what.to_string()))
    }

    fn ask_port(&mut self) -> Result<u16> {
        loop {
            let input = self.ask("Port (e.g., 1521): ", "port")?;
            match parse_port(&input) {
                Ok(port) => return Ok(port),
                Err(e) => self.console.say(&e.to_string()),
            }
        }
    }

    /// Connects and lists the exportable schemas, timing the round trip.
    fn fetch_schemas(&mut self, params: &ConnectionParams) -> Result<Vec<String>> {
        let start = Instant::now();
        self.console
            .begin_wait("Connecting to database and fetching schemas...");
        let result = self.metadata_port.list_schemas(params);
        self.console.end_wait();
        self.report_elapsed("Completed in", start);

        let schemas = result.map_err(|e| {
            error!("Error connecting to database or fetching schemas: {}", e);
            e
        })?;
        if schemas.is_empty() {
            return Err(ExportError::NoSchemas);
        }
        Ok(schemas)
    }

    /// Picks the schema to export, either from configuration or from the menu.
    ///
    /// The result is always an element of `schemas`.
    fn select_schema(&mut self, schemas: &[String]) -> Result<String> {
        if let Some(wanted) = self.config.export.schema.clone() {
            return schemas
                .iter()
                .find(|s| s.eq_ignore_ascii_case(wanted.trim()))
                .cloned()
                .ok_or(ExportError::SchemaNotFound(wanted));
        }

        self.console.say("\nPlease select a schema to export:");
        for (i, schema) in schemas.iter().enumerate() {
            self.console.say(&format!("{}. {}", i + 1, schema));
        }

        loop {
            let input = self.ask("Enter the number of the schema: ", "schema number")?;
            match parse_selection(&input, schemas.len()) {
                Ok(index) => return Ok(schemas[index].clone()),
                Err(e) => self.console.say(&e.to_string()),
            }
        }
    }

    /// Looks up the schema's tablespace and the dump directory, then writes
    /// the JSON file a later `impdp` run will read.
    fn create_impdp_details(&mut self, params: &ConnectionParams, plan: &ExportPlan) -> Result<()> {
        self.console.say(&format!(
            "\nCreating impdp details file for schema: {}...",
            plan.schema
        ));

        let directory = self.config.export.directory_name().to_string();
        let start = Instant::now();
        self.console.begin_wait("Fetching schema details...");
        let lookup = self.lookup_schema_details(params, plan, &directory);
        self.console.end_wait();
        self.report_elapsed("Completed in", start);
        let (details, data_pump_dir) = lookup?;

        let impdp = ImpdpDetails {
            schema_name: details.username,
            default_tablespace: details.default_tablespace,
            data_pump_dir,
            dump_file: plan.dump_file.clone(),
        };
        self.artifact_port
            .write_impdp_details(&impdp, &plan.details_path)?;

        self.console.say(&format!(
            "\nSuccessfully created impdp details file: {}",
            plan.details_path.display()
        ));
        Ok(())
    }

    fn lookup_schema_details(
        &self,
        params: &ConnectionParams,
        plan: &ExportPlan,
        directory: &str,
    ) -> Result<(SchemaDetails, String)> {
        let details = self
            .metadata_port
            .get_schema_details(params, &plan.schema)?
            .ok_or_else(|| ExportError::SchemaNotFound(plan.schema.clone()))?;
        let dir_path = self
            .metadata_port
            .get_directory_path(params, directory)?
            .ok_or_else(|| ExportError::DirectoryNotFound(directory.to_string()))?;
        Ok((details, dir_path))
    }

    /// Runs `expdp`, streaming its output, and reports the total time either way.
    fn run_export(&mut self, params: &ConnectionParams, plan: &ExportPlan) -> Result<()> {
        self.console
            .say(&format!("\nStarting export for schema: {}...", plan.schema));
        let start = Instant::now();
        let result = self.execute_expdp(params, plan);
        self.report_elapsed("Total export process time:", start);
        result
    }

    fn execute_expdp(&mut self, params: &ConnectionParams, plan: &ExportPlan) -> Result<()> {
        self.artifact_port
            .prepare_log_dir(&self.config.export.log_dir)?;

        let command = ExpdpCommand::new(
            &self.config.export.expdp_path,
            params,
            plan,
            self.config.export.directory.as_deref(),
        );
        self.console.say("\nGenerated command:");
        self.console.say(&format!("{}\n", command.display));

        self.console.say("--- expdp Log ---");
        let console = &mut self.console;
        let outcome = self.datapump_port.run_export(
            &command,
            &plan.local_log_path,
            &mut |line| console.say(line),
        )?;
        self.console.say("--- End of Log ---");

        if !outcome.is_success() {
            return Err(ExportError::ExportFailed {
                code: outcome.exit_code,
            });
        }
        info!(
            "expdp finished for {} ({} log lines)",
            plan.schema, outcome.lines
        );
        self.console.say("\nExport completed successfully.");
        Ok(())
    }

    fn report_elapsed(&mut self, label: &str, start: Instant) {
        self.console.say(&format!(
            "{} {:.2} seconds.",
            label,
            start.elapsed().as_secs_f64()
        ));
    }
}
