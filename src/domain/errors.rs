// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core error definitions for the Oracle schema exporter.
//!
//! This module provides a centralized `ExportError` enum and a `Result` type
//! used throughout the application to handle Oracle, I/O, prompt and
//! subprocess errors.

use thiserror::Error;

/// Error types encountered during the export workflow.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Oracle error: {0}")]
    OracleError(String),

    #[error("Could not fetch schemas: the database returned no exportable schemas")]
    NoSchemas,

    #[error("Schema '{0}' not found")]
    SchemaNotFound(String),

    #[error("Directory object '{0}' not found")]
    DirectoryNotFound(String),

    #[error("Input closed before a value was entered for '{0}'")]
    InputClosed(String),

    #[error(
        "'{0}' command not found. Please ensure the Oracle Database utilities are in your system's PATH."
    )]
    ToolNotFound(String),

    #[error("expdp process exited with return code {}", describe_code(.code))]
    ExportFailed { code: Option<i32> },

    #[error("Artifact generation failed: {0}")]
    ArtifactError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl From<oracle::Error> for ExportError {
    fn from(e: oracle::Error) -> Self {
        ExportError::OracleError(e.to_string())
    }
}

/// A specialized Result type for the Oracle schema exporter.
pub type Result<T> = std::result::Result<T, ExportError>;
