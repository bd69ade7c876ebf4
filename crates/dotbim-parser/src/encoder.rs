// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data model to .bim JSON encoding
//!
//! Serializes through the same derives the decoder reads, so
//! `parse(encode(file))` reproduces `file`.

use crate::decoder::Path;
use dotbim_model::{BimEncoder, BimError, BimFile, Result};
use log::debug;
use serde_json::Value;

/// JSON encoder for .bim files
#[derive(Clone, Copy, Debug)]
pub struct JsonEncoder {
    /// Indent output (2 spaces) instead of writing a single line
    pub pretty: bool,
}

impl JsonEncoder {
    /// Create an encoder producing indented output
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create an encoder producing single-line output
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BimEncoder for JsonEncoder {
    fn encode_value(&self, file: &BimFile) -> Result<Value> {
        check_finite(file)?;
        let document = serde_json::to_value(file)?;
        log_encoded(file);
        Ok(document)
    }

    fn encode(&self, file: &BimFile) -> Result<String> {
        check_finite(file)?;
        let text = if self.pretty {
            serde_json::to_string_pretty(file)?
        } else {
            serde_json::to_string(file)?
        };
        log_encoded(file);
        Ok(text)
    }
}

fn log_encoded(file: &BimFile) {
    debug!(
        "Encoded .bim document: {} meshes, {} elements",
        file.meshes.len(),
        file.elements.len()
    );
}

/// NaN and infinity have no JSON form
fn check_finite(file: &BimFile) -> Result<()> {
    let root = Path::root();

    for (m, mesh) in file.meshes.iter().enumerate() {
        if let Some(i) = mesh.coordinates.iter().position(|c| !c.is_finite()) {
            let path = root.key("meshes").index(m).key("coordinates").index(i);
            return Err(BimError::non_finite(path.to_string()));
        }
    }

    for (e, element) in file.elements.iter().enumerate() {
        let path = root.key("elements").index(e);
        let v = element.vector;
        let r = element.rotation;
        finite_components(&path.key("vector"), &[("x", v.x), ("y", v.y), ("z", v.z)])?;
        finite_components(
            &path.key("rotation"),
            &[("qx", r.qx), ("qy", r.qy), ("qz", r.qz), ("qw", r.qw)],
        )?;
    }

    Ok(())
}

fn finite_components(path: &Path, components: &[(&str, f64)]) -> Result<()> {
    match components.iter().find(|(_, value)| !value.is_finite()) {
        Some((key, _)) => Err(BimError::non_finite(path.key(key).to_string())),
        None => Ok(()),
    }
}
