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

//! # Data Pump Port
//!
//! This Port defines the contract for the "Export Runner": something that can
//! take a fully built `expdp` command, run it to completion, and hand every
//! output line back to the caller while keeping a copy in a local log file.

use crate::domain::entities::{ConnectionParams, ExportOutcome, ExportPlan};
use crate::domain::errors::Result;
use std::path::Path;

/// A ready-to-run Data Pump command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpdpCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Command line safe to show on screen (no password).
    pub display: String,
}

impl ExpdpCommand {
    /// Builds `expdp userid schemas=... dumpfile=... logfile=... [directory=...]`.
    pub fn new(
        program: &str,
        params: &ConnectionParams,
        plan: &ExportPlan,
        directory: Option<&str>,
    ) -> Self {
        let mut tail = vec![
            format!("schemas={}", plan.schema),
            format!("dumpfile={}", plan.dump_file),
            format!("logfile={}", plan.server_log_file),
        ];
        if let Some(dir) = directory {
            tail.push(format!("directory={}", dir));
        }

        let display = std::iter::once(program.to_string())
            .chain(std::iter::once(params.masked_descriptor()))
            .chain(tail.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        let mut args = Vec::with_capacity(tail.len() + 1);
        args.push(params.connect_descriptor());
        args.extend(tail);

        Self {
            program: program.to_string(),
            args,
            display,
        }
    }
}

pub trait DataPumpPort: Send + Sync {
    /// Runs `command`, writing each output line to `log_path` and passing it to `on_line`.
    ///
    /// A non-zero exit is reported through `ExportOutcome`, not as an error.
    fn run_export(
        &self,
        command: &ExpdpCommand,
        log_path: &Path,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ExportOutcome>;
}
