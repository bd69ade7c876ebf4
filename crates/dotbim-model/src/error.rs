// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for .bim parsing, encoding and export

use crate::MeshId;
use thiserror::Error;

/// Result type alias for .bim operations
pub type Result<T> = std::result::Result<T, BimError>;

/// Errors that can occur while reading or writing .bim documents
#[derive(Error, Debug)]
pub enum BimError {
    /// Input is not valid JSON, or a required field is missing or mistyped
    #[error("Malformed input at {path}: {message}")]
    MalformedInput { path: String, message: String },

    /// Element references a mesh id that no mesh in the file carries
    #[error("Element {guid} references unknown mesh {mesh_id}")]
    UnresolvedMeshReference { guid: String, mesh_id: MeshId },

    /// Mesh buffers violate the triangle-list invariants
    #[error("Invalid geometry in mesh {mesh_id}: {message}")]
    InvalidGeometry { mesh_id: MeshId, message: String },

    /// Float that JSON cannot represent (NaN or infinity)
    #[error("Non-finite number at {path}")]
    NonFiniteNumber { path: String },

    /// Serialization of an output document failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BimError {
    /// Create a malformed input error at a document path
    pub fn malformed(path: impl Into<String>, msg: impl Into<String>) -> Self {
        BimError::MalformedInput {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a geometry error for a mesh
    pub fn geometry(mesh_id: MeshId, msg: impl Into<String>) -> Self {
        BimError::InvalidGeometry {
            mesh_id,
            message: msg.into(),
        }
    }

    /// Create an unresolved reference error
    pub fn unresolved(guid: impl Into<String>, mesh_id: MeshId) -> Self {
        BimError::UnresolvedMeshReference {
            guid: guid.into(),
            mesh_id,
        }
    }

    /// Create a non-finite number error
    pub fn non_finite(path: impl Into<String>) -> Self {
        BimError::NonFiniteNumber { path: path.into() }
    }

    /// Whether this error reports malformed input
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, BimError::MalformedInput { .. })
    }
}
