// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Semantic checks on a decoded file

use dotbim_model::{BimError, BimFile, MeshId, Result};
use log::warn;
use rustc_hash::FxHashSet;
use std::fmt;

/// Non-fatal finding of a validation pass
///
/// Every warning is also emitted as a `warn!` log record.
#[derive(Clone, Debug, PartialEq)]
pub enum Warning {
    /// Mesh breaks the triangle-list invariants (geometry checks off)
    InvalidGeometry { mesh_id: MeshId, message: String },
    /// Element references a missing mesh (reference checks off)
    UnresolvedMeshReference { guid: String, mesh_id: MeshId },
    /// Later meshes with this id are shadowed by the first one
    DuplicateMeshId(MeshId),
    DuplicateGuid(String),
    /// Face color list length differs from the mesh face count
    FaceColorCount {
        guid: String,
        colors: usize,
        faces: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InvalidGeometry { mesh_id, message } => {
                write!(f, "Invalid geometry in mesh {}: {}", mesh_id, message)
            }
            Warning::UnresolvedMeshReference { guid, mesh_id } => {
                write!(f, "Element {} references unknown mesh {}", guid, mesh_id)
            }
            Warning::DuplicateMeshId(mesh_id) => {
                write!(f, "Duplicate mesh id {}, first occurrence is used", mesh_id)
            }
            Warning::DuplicateGuid(guid) => write!(f, "Duplicate element guid {}", guid),
            Warning::FaceColorCount {
                guid,
                colors,
                faces,
            } => write!(
                f,
                "Element {} has {} face colors for {} faces",
                guid, colors, faces
            ),
        }
    }
}

/// Post-decode validation pass
///
/// Each check either rejects the file or downgrades the finding to a
/// [`Warning`]. Duplicate ids and face-color count mismatches are always
/// warnings.
#[derive(Clone, Copy, Debug)]
pub struct Validator {
    /// Reject meshes that break the triangle-list invariants
    pub reject_invalid_geometry: bool,
    /// Reject elements whose mesh id is not present
    pub reject_unresolved_references: bool,
}

impl Validator {
    /// Validator that rejects on every hard finding
    pub fn strict() -> Self {
        Self {
            reject_invalid_geometry: true,
            reject_unresolved_references: true,
        }
    }

    /// Validator that only logs
    pub fn lenient() -> Self {
        Self {
            reject_invalid_geometry: false,
            reject_unresolved_references: false,
        }
    }

    /// Run all checks on a file, returning the warnings in document order
    pub fn check(&self, file: &BimFile) -> Result<Vec<Warning>> {
        let mut warnings = Vec::new();

        for mesh in &file.meshes {
            if let Err(err) = mesh.validate() {
                if self.reject_invalid_geometry {
                    return Err(err);
                }
                let message = match err {
                    BimError::InvalidGeometry { message, .. } => message,
                    other => other.to_string(),
                };
                warnings.push(Warning::InvalidGeometry {
                    mesh_id: mesh.mesh_id.clone(),
                    message,
                });
            }
        }

        let index = file.mesh_index();
        warnings.extend(
            index
                .duplicates()
                .iter()
                .map(|&mesh_id| Warning::DuplicateMeshId(mesh_id.clone())),
        );

        let mut guids: FxHashSet<&str> = FxHashSet::default();
        for element in &file.elements {
            if !guids.insert(element.guid.as_str()) {
                warnings.push(Warning::DuplicateGuid(element.guid.clone()));
            }

            match index.resolve(element) {
                Ok(mesh) => {
                    if let Some(colors) = &element.face_colors {
                        if colors.len() != mesh.face_count() {
                            warnings.push(Warning::FaceColorCount {
                                guid: element.guid.clone(),
                                colors: colors.len(),
                                faces: mesh.face_count(),
                            });
                        }
                    }
                }
                Err(err) => {
                    if self.reject_unresolved_references {
                        return Err(err);
                    }
                    warnings.push(Warning::UnresolvedMeshReference {
                        guid: element.guid.clone(),
                        mesh_id: element.mesh_id.clone(),
                    });
                }
            }
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(warnings)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::strict()
    }
}
