//! # Domain Entities
//!
//! Entities are the "Nouns" of our application: the connection we were given,
//! the schema we picked, the files an export run produces, and the report we
//! print at the end.
//!
//! We use the `serde` crate (Serialize/Deserialize) for the pieces that are
//! written to disk as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default Oracle listener port, used when the user leaves the port prompt empty.
pub const DEFAULT_PORT: u16 = 1521;

/// The directory object that Data Pump writes into unless told otherwise.
pub const DEFAULT_DIRECTORY: &str = "DATA_PUMP_DIR";

/// Replacement shown wherever the password would otherwise be printed.
pub const PASSWORD_MASK: &str = "********";

/// `ConnectionParams` holds everything needed to log into Oracle.
///
/// These values only ever live in memory. `Debug` masks the password so the
/// struct can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub service: String,
}

impl ConnectionParams {
    /// Easy Connect string, e.g. `localhost:1521/orcl`.
    pub fn dsn(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.service)
    }

    /// The `userid` argument expected by `expdp`: `user/password@dsn`.
    pub fn connect_descriptor(&self) -> String {
        format!("{}/{}@{}", self.user, self.password, self.dsn())
    }

    /// Same as [`connect_descriptor`](Self::connect_descriptor) with the password hidden.
    pub fn masked_descriptor(&self) -> String {
        format!("{}/{}@{}", self.user, PASSWORD_MASK, self.dsn())
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("user", &self.user)
            .field("password", &PASSWORD_MASK)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service", &self.service)
            .finish()
    }
}

/// Row from `dba_users` describing the schema being exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDetails {
    pub username: String,
    pub default_tablespace: String,
}

/// `ImpdpDetails` is the sidecar JSON file written next to every export.
///
/// It records what a later `impdp` run needs to know: which schema the dump
/// holds, where it should land, and where the server put the dump file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpdpDetails {
    pub schema_name: String,
    pub default_tablespace: String,
    pub data_pump_dir: String,
    pub dump_file: String,
}

/// `ExportPlan` fixes every file name for one run.
///
/// All names share the `{SCHEMA}_{timestamp}` stem so the dump, the server log,
/// the local log and the details file can be matched up afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub schema: String,
    pub dump_file: String,
    /// Log file name passed to `expdp`; it is written on the server side.
    pub server_log_file: String,
    /// Where we capture the subprocess output locally.
    pub local_log_path: PathBuf,
    pub details_path: PathBuf,
}

impl ExportPlan {
    /// Builds the plan for `schema` using a pre-formatted timestamp
    /// (`%Y%m%d_%H%M%S`).
    pub fn new(schema: &str, timestamp: &str, log_dir: &Path, details_dir: &Path) -> Self {
        let stem = format!("{}_{}", schema, timestamp);
        let server_log_file = format!("{}.log", stem);
        Self {
            schema: schema.to_string(),
            dump_file: format!("{}.dmp", stem),
            local_log_path: log_dir.join(&server_log_file),
            server_log_file,
            details_path: details_dir.join(format!("impdp_details_{}.json", stem)),
        }
    }

    /// Builds the plan stamped with the current local time.
    pub fn now(schema: &str, log_dir: &Path, details_dir: &Path) -> Self {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::new(schema, &timestamp, log_dir, details_dir)
    }
}

/// `ExportOutcome` is what came back from the `expdp` subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Number of output lines captured into the local log.
    pub lines: u64,
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// `ExportSummary` is the "Report Card" printed after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub schema: String,
    pub dump_file: String,
    pub log_file: PathBuf,
    pub details_file: PathBuf,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Export Summary ---")?;
        writeln!(f, "Schema:    {}", self.schema)?;
        writeln!(f, "Dump file: {}", self.dump_file)?;
        writeln!(f, "Log file:  {}", self.log_file.display())?;
        write!(f, "Config file: {}", self.details_file.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ConnectionParams {
        ConnectionParams {
            user: "system".into(),
            password: "s3cret".into(),
            host: "db.local".into(),
            port: 1521,
            service: "ORCLPDB1".into(),
        }
    }

    #[test]
    fn test_dsn_and_descriptor() {
        let p = params();
        assert_eq!(p.dsn(), "db.local:1521/ORCLPDB1");
        assert_eq!(p.connect_descriptor(), "system/s3cret@db.local:1521/ORCLPDB1");
        assert_eq!(p.masked_descriptor(), "system/********@db.local:1521/ORCLPDB1");
    }

    #[test]
    fn test_debug_hides_password() {
        let out = format!("{:?}", params());
        assert!(!out.contains("s3cret"));
        assert!(out.contains(PASSWORD_MASK));
        assert!(out.contains("db.local"));
    }

    #[test]
    fn test_export_plan_names_share_stem() {
        let plan = ExportPlan::new(
            "HR",
            "20260101_120000",
            Path::new("log"),
            Path::new("."),
        );
        assert_eq!(plan.dump_file, "HR_20260101_120000.dmp");
        assert_eq!(plan.server_log_file, "HR_20260101_120000.log");
        assert_eq!(
            plan.local_log_path,
            Path::new("log").join("HR_20260101_120000.log")
        );
        assert_eq!(
            plan.details_path,
            Path::new(".").join("impdp_details_HR_20260101_120000.json")
        );
    }

    #[test]
    fn test_outcome_success() {
        assert!(ExportOutcome { exit_code: Some(0), lines: 3 }.is_success());
        assert!(!ExportOutcome { exit_code: Some(1), lines: 3 }.is_success());
        assert!(!ExportOutcome { exit_code: None, lines: 0 }.is_success());
    }

    #[test]
    fn test_impdp_details_json_keys() {
        let details = ImpdpDetails {
            schema_name: "HR".into(),
            default_tablespace: "USERS".into(),
            data_pump_dir: "/u01/dpdump".into(),
            dump_file: "HR_1.dmp".into(),
        };
        let v = serde_json::to_value(&details).unwrap();
        assert_eq!(v["schema_name"], "HR");
        assert_eq!(v["default_tablespace"], "USERS");
        assert_eq!(v["data_pump_dir"], "/u01/dpdump");
        assert_eq!(v["dump_file"], "HR_1.dmp");
    }
}
