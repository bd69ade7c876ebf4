// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! dotbim Export - projections of .bim models into other formats
//!
//! Each exporter implements [`dotbim_model::BimExporter`], reads a
//! [`dotbim_model::BimFile`] without modifying it, and produces a
//! serde-serializable document.
//!
//! # Features
//!
//! - `scene` - glTF 2.0 style node list with element translation and rotation
//! - `geo` - GeoJSON feature collection of element positions, filtered by type
//!
//! # Example
//!
//! ```ignore
//! use dotbim_export::{to_geo, to_scene};
//!
//! let file = dotbim_parser::parse(bim_json)?;
//! let scene = to_scene(&file);
//! let walls = to_geo(&file, ["Wall", "Slab"]);
//! println!("{} nodes, {} features", scene.nodes.len(), walls.features.len());
//! ```

#[cfg(feature = "geo")]
pub mod geo;
#[cfg(feature = "scene")]
pub mod scene;

#[cfg(feature = "geo")]
pub use geo::{to_geo, FeatureCollection, GeoExporter};
#[cfg(feature = "scene")]
pub use scene::{to_scene, SceneDocument, SceneExporter};
