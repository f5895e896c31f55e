use crate::domain::entities::DEFAULT_DIRECTORY;
use crate::domain::errors::{ExportError, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub export: ExportConfig,
}

/// Connection settings. Anything left empty is asked for at the prompt.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub service: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    /// Skips the menu when set. Must still be one of the listed schemas.
    pub schema: Option<String>,
    pub expdp_path: String,
    pub log_dir: PathBuf,
    pub details_dir: PathBuf,
    /// Data Pump directory object. Passed to `expdp` only when set.
    pub directory: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            schema: None,
            expdp_path: "expdp".to_string(),
            log_dir: PathBuf::from("log"),
            details_dir: PathBuf::from("."),
            directory: None,
        }
    }
}

impl ExportConfig {
    /// Directory object whose path is recorded in the impdp details file.
    pub fn directory_name(&self) -> &str {
        self.directory.as_deref().unwrap_or(DEFAULT_DIRECTORY)
    }
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    // Overrides for ad-hoc runs; anything missing is prompted for
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    #[arg(long)]
    pub service: Option<String>,
    /// Schema to export instead of choosing from the menu
    #[arg(long)]
    pub schema: Option<String>,
    /// Location of the expdp executable
    #[arg(long)]
    pub expdp_path: Option<String>,
    /// Directory receiving the captured expdp output
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    /// Directory receiving the impdp details JSON file
    #[arg(long)]
    pub details_dir: Option<PathBuf>,
    /// Data Pump directory object (defaults to DATA_PUMP_DIR on the server)
    #[arg(long)]
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: AppConfig = if path.ends_with(".json") {
            serde_json::from_str(&contents)
                .map_err(|e| ExportError::ConfigError(format!("{}: {}", path, e)))?
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| ExportError::ConfigError(format!("{}: {}", path, e)))?
        };

        Ok(config)
    }

    pub fn merge_cli(&mut self, args: &CliArgs) {
        if let Some(u) = &args.username { self.database.username = Some(u.clone()); }
        if let Some(h) = &args.host { self.database.host = Some(h.clone()); }
        if let Some(p) = args.port { self.database.port = Some(p); }
        if let Some(s) = &args.service { self.database.service = Some(s.clone()); }
        if let Some(s) = &args.schema { self.export.schema = Some(s.clone()); }
        if let Some(e) = &args.expdp_path { self.export.expdp_path = e.clone(); }
        if let Some(l) = &args.log_dir { self.export.log_dir = l.clone(); }
        if let Some(d) = &args.details_dir { self.export.details_dir = d.clone(); }
        if let Some(d) = &args.directory { self.export.directory = Some(d.clone()); }
    }

    /// Fills the password from `ORACLE_PASSWORD` when the file did not carry one.
    pub fn apply_env(&mut self) {
        if self.database.password.is_none() {
            self.database.password = std::env::var("ORACLE_PASSWORD").ok();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.port == Some(0) {
            return Err(ExportError::ConfigError("port must be between 1 and 65535".into()));
        }
        if self.export.expdp_path.trim().is_empty() {
            return Err(ExportError::ConfigError("expdp_path must not be empty".into()));
        }
        if self.export.log_dir.as_os_str().is_empty() {
            return Err(ExportError::ConfigError("log_dir must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_config() {
        let yaml = r#"
database:
  username: "test_user"
  password: "test_password"
  host: "localhost"
  port: 1521
  service: "ORCL"
export:
  schema: "HR"
  log_dir: "./logs"
"#;
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{}", yaml).unwrap();
        let path = file.path().to_str().unwrap();

        let config = AppConfig::from_file(path).expect("Failed to parse config");

        assert_eq!(config.database.username.as_deref(), Some("test_user"));
        assert_eq!(config.database.port, Some(1521));
        assert_eq!(config.export.schema.as_deref(), Some("HR"));
        assert_eq!(config.export.log_dir, PathBuf::from("./logs"));
        // untouched keys keep their defaults
        assert_eq!(config.export.expdp_path, "expdp");
        assert_eq!(config.export.details_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_json_config() {
        let json = r#"{"database": {"host": "db1", "service": "PDB1"}, "export": {"directory": "EXP_DIR"}}"#;
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", json).unwrap();
        let path = file.path().to_str().unwrap();

        let config = AppConfig::from_file(path).unwrap();
        assert_eq!(config.database.host.as_deref(), Some("db1"));
        assert_eq!(config.database.username, None);
        assert_eq!(config.export.directory_name(), "EXP_DIR");
    }

    #[test]
    fn test_bad_config_is_config_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = AppConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ExportError::ConfigError(_)));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = AppConfig::default();
        config.database.host = Some("from-file".into());
        let args = CliArgs {
            host: Some("from-cli".into()),
            port: Some(1522),
            schema: Some("SCOTT".into()),
            expdp_path: Some("/opt/oracle/bin/expdp".into()),
            ..Default::default()
        };
        config.merge_cli(&args);

        assert_eq!(config.database.host.as_deref(), Some("from-cli"));
        assert_eq!(config.database.port, Some(1522));
        assert_eq!(config.export.schema.as_deref(), Some("SCOTT"));
        assert_eq!(config.export.expdp_path, "/opt/oracle/bin/expdp");
        assert_eq!(config.export.log_dir, PathBuf::from("log"));
    }

    #[test]
    fn test_default_directory_name() {
        assert_eq!(AppConfig::default().export.directory_name(), "DATA_PUMP_DIR");
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.database.port = Some(0);
        assert!(config.validate().is_err());

        config.database.port = None;
        config.export.expdp_path = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_log_dir() {
        let mut config = AppConfig::default();
        config.export.log_dir = PathBuf::from("");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ExportError::ConfigError(ref m) if m.contains("log_dir")));
    }

    // Only this test touches ORACLE_PASSWORD, so the cases run sequentially here.
    #[test]
    fn test_apply_env_password_fallback() {
        let previous = std::env::var("ORACLE_PASSWORD").ok();
        std::env::set_var("ORACLE_PASSWORD", "from_env");

        let mut missing = AppConfig::default();
        missing.apply_env();

        let mut from_file = AppConfig::default();
        from_file.database.password = Some("from_file".into());
        from_file.apply_env();

        match previous {
            Some(v) => std::env::set_var("ORACLE_PASSWORD", v),
            None => std::env::remove_var("ORACLE_PASSWORD"),
        }

        assert_eq!(missing.database.password.as_deref(), Some("from_env"));
        assert_eq!(from_file.database.password.as_deref(), Some("from_file"));
    }
}
