// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! dotbim Parser - .bim JSON reader and writer
//!
//! This crate turns .bim JSON into a [`dotbim_model::BimFile`] and back.
//! It implements the traits defined in `dotbim-model`.
//!
//! # Features
//!
//! - **All-or-nothing parsing** - a failed parse never yields a partial file
//! - **Located errors** - malformed input is reported with its JSON path
//! - **Configurable validation** - strict (reject) or lenient (log) handling
//!   of mesh invariants and dangling mesh references
//! - **Lossless round-trip** - the encoder writes exactly the keys the
//!   decoder reads
//!
//! # Example
//!
//! ```ignore
//! use dotbim_parser::{encode, parse};
//!
//! let file = parse(bim_json)?;
//! println!("{} elements", file.elements.len());
//!
//! let text = encode(&file)?;
//! assert_eq!(parse(&text)?, file);
//! ```

mod decoder;
mod encoder;
mod validate;

pub use encoder::JsonEncoder;
pub use validate::{Validator, Warning};

use dotbim_model::{BimEncoder, BimFile, BimParser, Result};
use log::debug;
use serde_json::Value;

/// .bim JSON parser implementing `BimParser`
///
/// Decodes the document structurally, then runs the [`Validator`] pass
/// configured by the two check flags.
#[derive(Clone, Copy, Debug)]
pub struct JsonParser {
    /// Reject meshes with bad buffer lengths or out-of-range indices
    pub check_geometry: bool,
    /// Reject elements that reference a missing mesh
    pub check_references: bool,
}

impl JsonParser {
    /// Create a parser that rejects invalid geometry and dangling references
    pub fn new() -> Self {
        Self {
            check_geometry: true,
            check_references: true,
        }
    }

    /// Create a parser that only logs geometry and reference problems
    pub fn lenient() -> Self {
        Self {
            check_geometry: false,
            check_references: false,
        }
    }

    /// Set whether invalid geometry is rejected
    pub fn with_geometry_checks(mut self, enabled: bool) -> Self {
        self.check_geometry = enabled;
        self
    }

    /// Set whether dangling mesh references are rejected
    pub fn with_reference_checks(mut self, enabled: bool) -> Self {
        self.check_references = enabled;
        self
    }

    /// Parse raw UTF-8 bytes
    pub fn parse_slice(&self, content: &[u8]) -> Result<BimFile> {
        self.finish(decoder::decode_slice(content)?)
    }

    fn validator(&self) -> Validator {
        Validator {
            reject_invalid_geometry: self.check_geometry,
            reject_unresolved_references: self.check_references,
        }
    }

    fn finish(&self, file: BimFile) -> Result<BimFile> {
        let warnings = self.validator().check(&file)?;

        debug!(
            "Parsed .bim document (schema {}): {} meshes, {} elements, {} warnings",
            file.schema_version,
            file.meshes.len(),
            file.elements.len(),
            warnings.len()
        );

        Ok(file)
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BimParser for JsonParser {
    fn parse(&self, content: &str) -> Result<BimFile> {
        self.finish(decoder::decode_str(content)?)
    }

    fn parse_value(&self, document: &Value) -> Result<BimFile> {
        self.finish(decoder::decode_value(document)?)
    }
}

/// Quick parse function for simple use cases (strict validation)
pub fn parse(content: &str) -> Result<BimFile> {
    JsonParser::new().parse(content)
}

/// Parse an already-decoded JSON tree (strict validation)
pub fn parse_value(document: &Value) -> Result<BimFile> {
    JsonParser::new().parse_value(document)
}

/// Parse raw UTF-8 bytes (strict validation)
pub fn parse_slice(content: &[u8]) -> Result<BimFile> {
    JsonParser::new().parse_slice(content)
}

/// Encode a file as indented .bim JSON
pub fn encode(file: &BimFile) -> Result<String> {
    JsonEncoder::new().encode(file)
}

/// Encode a file as a JSON tree
pub fn encode_value(file: &BimFile) -> Result<Value> {
    JsonEncoder::new().encode_value(file)
}

/// Run the strict validation pass on a file built in code
pub fn validate(file: &BimFile) -> Result<Vec<Warning>> {
    Validator::strict().check(file)
}
