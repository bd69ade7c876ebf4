// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! glTF-style scene export
//!
//! Every element becomes one named node carrying its translation and
//! rotation. Mesh buffers are not converted into glTF geometry; only the
//! placement of each element is exported.

use dotbim_model::{BimExporter, BimFile, Element, Info};
use log::debug;
use serde::{Deserialize, Serialize};

/// glTF asset version declared by exported documents
pub const GLTF_VERSION: &str = "2.0";

/// Generator tag used unless overridden
pub const DEFAULT_GENERATOR: &str = concat!("dotbim-export ", env!("CARGO_PKG_VERSION"));

/// Minimal glTF 2.0 document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub asset: Asset,
    /// Index of the default scene (always 0)
    pub scene: usize,
    /// Exactly one scene listing every node
    pub scenes: Vec<Scene>,
    pub nodes: Vec<Node>,
}

impl SceneDocument {
    /// The single scene of the document
    pub fn default_scene(&self) -> Option<&Scene> {
        self.scenes.get(self.scene)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub version: String,
    pub generator: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Indices into [`SceneDocument::nodes`]
    pub nodes: Vec<usize>,
}

/// Placed element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Element guid
    pub name: String,
    /// `[x, y, z]`
    pub translation: [f64; 3],
    /// `[qx, qy, qz, qw]`
    pub rotation: [f64; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<NodeExtras>,
}

/// Application data attached to a node when extras are enabled
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeExtras {
    #[serde(rename = "type")]
    pub element_type: String,
    pub info: Info,
}

/// Exporter producing a [`SceneDocument`]
#[derive(Clone, Debug)]
pub struct SceneExporter {
    /// Value of `asset.generator`
    pub generator: String,
    /// Attach element type and info to each node as glTF `extras`
    pub include_extras: bool,
}

impl SceneExporter {
    pub fn new() -> Self {
        Self {
            generator: DEFAULT_GENERATOR.to_string(),
            include_extras: false,
        }
    }

    /// Set the generator tag
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Set whether nodes carry `extras`
    pub fn with_extras(mut self, enabled: bool) -> Self {
        self.include_extras = enabled;
        self
    }

    fn node(&self, element: &Element) -> Node {
        Node {
            name: element.guid.clone(),
            translation: element.vector.to_array(),
            rotation: element.rotation.to_array(),
            extras: self.include_extras.then(|| NodeExtras {
                element_type: element.element_type.clone(),
                info: element.info.clone(),
            }),
        }
    }
}

impl Default for SceneExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BimExporter for SceneExporter {
    type Output = SceneDocument;

    fn export(&self, file: &BimFile) -> SceneDocument {
        let nodes: Vec<Node> = file.elements.iter().map(|e| self.node(e)).collect();

        debug!("Exported {} elements as scene nodes", nodes.len());

        SceneDocument {
            asset: Asset {
                version: GLTF_VERSION.to_string(),
                generator: self.generator.clone(),
            },
            scene: 0,
            scenes: vec![Scene {
                nodes: (0..nodes.len()).collect(),
            }],
            nodes,
        }
    }
}

/// Project a file into a scene document with default settings
pub fn to_scene(file: &BimFile) -> SceneDocument {
    SceneExporter::new().export(file)
}
