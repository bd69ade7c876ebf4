// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for .bim conversion
//!
//! These traits define the seams between the data model and the code that
//! reads, writes and projects it.

use crate::{BimFile, Result};
use serde::Serialize;
use serde_json::Value;

/// Parsing interface - entry point for reading .bim content
///
/// # Example
///
/// ```ignore
/// use dotbim_model::BimParser;
///
/// let parser: Box<dyn BimParser> = get_parser();
/// let file = parser.parse(bim_json)?;
/// println!("Schema: {}", file.schema_version);
/// ```
pub trait BimParser: Send + Sync {
    /// Parse .bim JSON text
    ///
    /// # Returns
    /// The complete file, or an error. Never returns a partial file.
    fn parse(&self, content: &str) -> Result<BimFile>;

    /// Parse an already-decoded JSON tree
    fn parse_value(&self, document: &Value) -> Result<BimFile>;
}

/// Encoding interface - writes a model back to .bim JSON
pub trait BimEncoder: Send + Sync {
    /// Encode to a JSON tree using .bim field names
    fn encode_value(&self, file: &BimFile) -> Result<Value>;

    /// Encode to JSON text
    fn encode(&self, file: &BimFile) -> Result<String>;
}

/// Projection of a model into another document format
///
/// Exporters only read the model. The output is a serde-serializable
/// document so callers can hold it as a value or write it as JSON.
pub trait BimExporter {
    /// Document type produced by this exporter
    type Output: Serialize;

    /// Project the file into the target document
    fn export(&self, file: &BimFile) -> Self::Output;

    /// Project the file and serialize the result as pretty JSON
    fn export_json(&self, file: &BimFile) -> Result<String> {
        let document = self.export(file);
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
