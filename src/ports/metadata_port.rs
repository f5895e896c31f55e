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

//! # Metadata Port
//!
//! In Hexagonal Architecture, a **Port** is like a "Slot" or a "Contract".
//!
//! This Port defines the few dictionary lookups the export workflow needs.
//! It doesn't care IF the answers come from a live Oracle instance or from a
//! Mock in a test. Any struct that implements `MetadataPort` can be handed
//! to the workflow.

use crate::domain::entities::{ConnectionParams, SchemaDetails};
use crate::domain::errors::Result;

/// `MetadataPort` is a **Trait**. Think of it as an Interface.
///
/// Credentials are collected at the prompt, after the adapter is built, so
/// every call receives them explicitly.
pub trait MetadataPort: Send + Sync {
    /// Returns the open, non-SYSTEM schemas, ordered by name.
    fn list_schemas(&self, params: &ConnectionParams) -> Result<Vec<String>>;

    /// Returns the username and default tablespace, or `None` if the schema is unknown.
    fn get_schema_details(
        &self,
        params: &ConnectionParams,
        schema: &str,
    ) -> Result<Option<SchemaDetails>>;

    /// Returns the server path behind a directory object such as `DATA_PUMP_DIR`.
    fn get_directory_path(&self, params: &ConnectionParams, directory: &str)
        -> Result<Option<String>>;
}
