//! Infrastructure adapter for the Oracle data dictionary lookups.

use crate::domain::entities::{ConnectionParams, SchemaDetails};
use crate::domain::errors::{ExportError, Result};
use crate::ports::metadata_port::MetadataPort;
use log::{debug, info};
use oracle::Connection;

/// Concrete implementation of `MetadataPort` for Oracle databases.
///
/// Each call opens a fresh connection; the workflow makes at most three
/// lookups per run, so there is nothing to pool.
#[derive(Debug, Default)]
pub struct OracleMetadataAdapter;

impl OracleMetadataAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Establishes a fresh connection to the Oracle database.
    fn get_conn(&self, params: &ConnectionParams) -> Result<Connection> {
        debug!("Connecting to {} as {}", params.dsn(), params.user);
        Connection::connect(&params.user, &params.password, params.dsn())
            .map_err(ExportError::from)
    }
}

const SQL_LIST_SCHEMAS: &str = "SELECT username FROM dba_users WHERE account_status = 'OPEN' AND default_tablespace <> 'SYSTEM' ORDER BY username";
const SQL_SCHEMA_DETAILS: &str =
    "SELECT username, default_tablespace FROM dba_users WHERE username = :1";
const SQL_DIRECTORY_PATH: &str =
    "SELECT directory_path FROM dba_directories WHERE directory_name = :1";

impl MetadataPort for OracleMetadataAdapter {
    fn list_schemas(&self, params: &ConnectionParams) -> Result<Vec<String>> {
        let conn = self.get_conn(params)?;
        let rows = conn.query(SQL_LIST_SCHEMAS, &[]).map_err(ExportError::from)?;
        let mut schemas = Vec::new();
        for row_result in rows {
            let row = row_result.map_err(ExportError::from)?;
            let name: String = row.get(0).map_err(ExportError::from)?;
            schemas.push(name);
        }
        info!("Found {} exportable schemas on {}", schemas.len(), params.dsn());
        Ok(schemas)
    }

    fn get_schema_details(
        &self,
        params: &ConnectionParams,
        schema: &str,
    ) -> Result<Option<SchemaDetails>> {
        let conn = self.get_conn(params)?;
        let mut rows = conn
            .query(SQL_SCHEMA_DETAILS, &[&schema])
            .map_err(ExportError::from)?;
        match rows.next() {
            Some(row_result) => {
                let row = row_result.map_err(ExportError::from)?;
                Ok(Some(SchemaDetails {
                    username: row.get(0).map_err(ExportError::from)?,
                    default_tablespace: row.get(1).map_err(ExportError::from)?,
                }))
            }
            None => Ok(None),
        }
    }

    fn get_directory_path(
        &self,
        params: &ConnectionParams,
        directory: &str,
    ) -> Result<Option<String>> {
        let conn = self.get_conn(params)?;
        let mut rows = conn
            .query(SQL_DIRECTORY_PATH, &[&directory.to_uppercase()])
            .map_err(ExportError::from)?;
        match rows.next() {
            Some(row_result) => {
                let row = row_result.map_err(ExportError::from)?;
                let path: String = row.get(0).map_err(ExportError::from)?;
                debug!("Directory {} resolves to {}", directory, path);
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}
