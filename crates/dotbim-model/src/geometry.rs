// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle mesh storage

use crate::{BimError, MeshId, Result};
use serde::{Deserialize, Serialize};

/// Triangulated mesh as stored in a .bim file
///
/// Buffers are kept exactly as read. Use [`Mesh::validate`] to check the
/// triangle-list invariants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Id referenced by elements
    pub mesh_id: MeshId,
    /// Vertex positions as flattened [x, y, z, x, y, z, ...]
    pub coordinates: Vec<f64>,
    /// Triangle indices as flattened [a, b, c, a, b, c, ...]
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from flat buffers
    pub fn new(mesh_id: impl Into<MeshId>, coordinates: Vec<f64>, indices: Vec<u32>) -> Self {
        Self {
            mesh_id: mesh_id.into(),
            coordinates,
            indices,
        }
    }

    /// Check if mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Get vertex count (complete triples only)
    pub fn vertex_count(&self) -> usize {
        self.coordinates.len() / 3
    }

    /// Get triangle count (complete triples only)
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over vertex positions
    pub fn vertices(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.coordinates
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
    }

    /// Iterate over triangles as vertex index triples
    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Check buffer lengths and index bounds
    pub fn validate(&self) -> Result<()> {
        if self.coordinates.len() % 3 != 0 {
            return Err(BimError::geometry(
                self.mesh_id.clone(),
                format!(
                    "coordinate count {} is not a multiple of 3",
                    self.coordinates.len()
                ),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(BimError::geometry(
                self.mesh_id.clone(),
                format!("index count {} is not a multiple of 3", self.indices.len()),
            ));
        }

        let vertex_count = self.vertex_count();
        if let Some((position, index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i as usize >= vertex_count)
        {
            return Err(BimError::geometry(
                self.mesh_id.clone(),
                format!(
                    "index {} at position {} is out of bounds for {} vertices",
                    index, position, vertex_count
                ),
            ));
        }

        Ok(())
    }
}
