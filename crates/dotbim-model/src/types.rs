// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for .bim data representation
//!
//! This module defines the value types that make up a parsed .bim document.
//! Their serde derives are the .bim wire format: snake_case keys, `type`
//! for the element classification, optional `info` and `face_colors`.

use crate::{Info, Mesh, MeshIndex};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema version written by this library when none is supplied
pub const CURRENT_SCHEMA_VERSION: &str = "1.1.0";

/// Mesh identifier
///
/// dotbim producers write integer ids; other tools write strings. Both are
/// kept verbatim and compared exactly.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeshId {
    Integer(u64),
    Text(String),
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshId::Integer(id) => write!(f, "{}", id),
            MeshId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<u64> for MeshId {
    fn from(id: u64) -> Self {
        MeshId::Integer(id)
    }
}

impl From<&str> for MeshId {
    fn from(id: &str) -> Self {
        MeshId::Text(id.to_string())
    }
}

impl From<String> for MeshId {
    fn from(id: String) -> Self {
        MeshId::Text(id)
    }
}

/// Schema version as found in the file (string or number, not interpreted)
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaVersion {
    Text(String),
    Number(serde_json::Number),
}

impl Default for SchemaVersion {
    fn default() -> Self {
        SchemaVersion::Text(CURRENT_SCHEMA_VERSION.to_string())
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::Text(v) => write!(f, "{}", v),
            SchemaVersion::Number(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for SchemaVersion {
    fn from(version: &str) -> Self {
        SchemaVersion::Text(version.to_string())
    }
}

/// RGBA color, components 0-255
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Components as `[r, g, b, a]`
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(128, 128, 128, 255)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Position of an element, in file units
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components as `[x, y, z]`
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Orientation quaternion `(qx, qy, qz, qw)`
///
/// Not normalized; values pass through unchanged.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Rotation {
    pub qx: f64,
    pub qy: f64,
    pub qz: f64,
    pub qw: f64,
}

impl Rotation {
    pub const fn new(qx: f64, qy: f64, qz: f64, qw: f64) -> Self {
        Self { qx, qy, qz, qw }
    }

    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Components as `[qx, qy, qz, qw]`
    pub fn to_array(self) -> [f64; 4] {
        [self.qx, self.qy, self.qz, self.qw]
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// A placed instance of a mesh
///
/// The mesh is referenced by id and looked up in the owning [`BimFile`]
/// when needed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Globally unique identifier
    pub guid: String,
    /// Id of the mesh this element instantiates
    pub mesh_id: MeshId,
    /// Position
    pub vector: Vector,
    /// Orientation
    pub rotation: Rotation,
    /// Classification string (e.g. "Wall", "Slab")
    #[serde(rename = "type")]
    pub element_type: String,
    /// Primary color
    pub color: Color,
    /// One color per face; `None` when the file carries no per-face colors
    #[serde(
        default,
        with = "face_colors",
        skip_serializing_if = "Option::is_none"
    )]
    pub face_colors: Option<Vec<Color>>,
    /// Element metadata
    #[serde(default)]
    pub info: Info,
}

impl Element {
    /// Create an element at the origin with identity rotation and default color
    pub fn new(
        guid: impl Into<String>,
        mesh_id: impl Into<MeshId>,
        element_type: impl Into<String>,
    ) -> Self {
        Self {
            guid: guid.into(),
            mesh_id: mesh_id.into(),
            vector: Vector::default(),
            rotation: Rotation::identity(),
            element_type: element_type.into(),
            color: Color::default(),
            face_colors: None,
            info: Info::new(),
        }
    }

    pub fn with_vector(mut self, vector: Vector) -> Self {
        self.vector = vector;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_face_colors(mut self, face_colors: Vec<Color>) -> Self {
        self.face_colors = Some(face_colors);
        self
    }

    pub fn with_info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    /// Check whether per-face colors are present (possibly empty)
    pub fn has_face_colors(&self) -> bool {
        self.face_colors.is_some()
    }
}

/// Root of a .bim document
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct BimFile {
    /// Schema version, passed through verbatim
    pub schema_version: SchemaVersion,
    /// File-level metadata
    #[serde(default)]
    pub info: Info,
    /// Meshes in file order
    pub meshes: Vec<Mesh>,
    /// Elements in file order
    pub elements: Vec<Element>,
}

impl BimFile {
    /// Create an empty file with the current schema version
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a mesh by id (first match wins)
    pub fn mesh(&self, mesh_id: &MeshId) -> Option<&Mesh> {
        self.meshes.iter().find(|m| &m.mesh_id == mesh_id)
    }

    /// Mesh instantiated by an element
    pub fn mesh_for(&self, element: &Element) -> Option<&Mesh> {
        self.mesh(&element.mesh_id)
    }

    /// Look up an element by guid
    pub fn element(&self, guid: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.guid == guid)
    }

    /// Elements with an exact (case-sensitive) type match, in file order
    pub fn elements_of_type<'a>(
        &'a self,
        element_type: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements
            .iter()
            .filter(move |e| e.element_type == element_type)
    }

    /// Distinct element types in first-seen order
    pub fn element_types(&self) -> Vec<&str> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        self.elements
            .iter()
            .map(|e| e.element_type.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Build a hash index over the meshes for repeated lookups
    pub fn mesh_index(&self) -> MeshIndex<'_> {
        MeshIndex::build(&self.meshes)
    }
}

/// Per-face colors on the wire
///
/// Read as `{r,g,b,a}` objects or as the flat `[r, g, b, a, r, g, b, a, ...]`
/// integer list dotbim producers write. Always written flat. `null` reads as
/// `None`, `[]` as an empty list.
mod face_colors {
    use super::Color;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Object(Color),
        Component(u8),
    }

    pub fn serialize<S>(colors: &Option<Vec<Color>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match colors {
            Some(colors) => serializer.collect_seq(colors.iter().flat_map(|c| c.to_array())),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Color>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(entries) = Option::<Vec<Entry>>::deserialize(deserializer)? else {
            return Ok(None);
        };

        let mut objects = Vec::new();
        let mut components = Vec::new();
        for entry in entries {
            match entry {
                Entry::Object(color) => objects.push(color),
                Entry::Component(value) => components.push(value),
            }
        }

        if components.is_empty() {
            return Ok(Some(objects));
        }
        if !objects.is_empty() {
            return Err(D::Error::custom(
                "face colors mix color objects and flat components",
            ));
        }
        if components.len() % 4 != 0 {
            return Err(D::Error::custom(format!(
                "flat face color list has {} values, expected a multiple of 4",
                components.len()
            )));
        }

        Ok(Some(
            components
                .chunks_exact(4)
                .map(|c| Color::new(c[0], c[1], c[2], c[3]))
                .collect(),
        ))
    }
}
