// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh lookup for resolving element references

use crate::{BimError, Element, Mesh, MeshId, Result};
use rustc_hash::FxHashMap;

/// Hash index from mesh id to mesh
///
/// Borrowed from the owning file. When several meshes share an id the
/// first one wins, matching [`crate::BimFile::mesh`].
pub struct MeshIndex<'a> {
    meshes: FxHashMap<&'a MeshId, &'a Mesh>,
    duplicates: Vec<&'a MeshId>,
}

impl<'a> MeshIndex<'a> {
    /// Build an index over a mesh list
    pub fn build(meshes: &'a [Mesh]) -> Self {
        let mut index: FxHashMap<&'a MeshId, &'a Mesh> = FxHashMap::default();
        let mut duplicates = Vec::new();

        for mesh in meshes {
            if index.contains_key(&mesh.mesh_id) {
                duplicates.push(&mesh.mesh_id);
            } else {
                index.insert(&mesh.mesh_id, mesh);
            }
        }

        Self {
            meshes: index,
            duplicates,
        }
    }

    /// Get mesh by id
    pub fn get(&self, mesh_id: &MeshId) -> Option<&'a Mesh> {
        self.meshes.get(mesh_id).copied()
    }

    pub fn contains(&self, mesh_id: &MeshId) -> bool {
        self.meshes.contains_key(mesh_id)
    }

    /// Resolve the mesh an element instantiates
    pub fn resolve(&self, element: &Element) -> Result<&'a Mesh> {
        self.get(&element.mesh_id)
            .ok_or_else(|| BimError::unresolved(element.guid.clone(), element.mesh_id.clone()))
    }

    /// Ids that appeared more than once (each repeat listed)
    pub fn duplicates(&self) -> &[&'a MeshId] {
        &self.duplicates
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
