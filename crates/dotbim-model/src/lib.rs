// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! dotbim Model - Data model, traits and shared types for .bim files
//!
//! This crate provides the in-memory representation of a .bim (dotbim) file:
//! triangulated meshes, the elements that place and classify them, and the
//! free-form metadata attached to both. It also defines the traits that the
//! parser, encoder and exporters implement so consumers can stay
//! backend-agnostic.
//!
//! # Architecture
//!
//! - [`BimFile`] - Root of a parsed document, owns meshes and elements
//! - [`Mesh`] - Flat coordinate and index buffers, referenced by [`MeshId`]
//! - [`Element`] - A positioned, rotated, typed and coloured mesh instance
//! - [`Info`] - Open string-keyed metadata bag
//! - [`MeshIndex`] - Hash lookup from mesh id to mesh
//! - [`BimParser`], [`BimEncoder`], [`BimExporter`] - Conversion traits
//!
//! # Example
//!
//! ```ignore
//! use dotbim_model::{BimParser, BimFile};
//!
//! let parser: Box<dyn BimParser> = get_parser();
//! let file = parser.parse(bim_json)?;
//!
//! for element in file.elements_of_type("Wall") {
//!     let mesh = file.mesh_for(element);
//!     println!("{} -> {:?}", element.guid, mesh.map(|m| m.face_count()));
//! }
//! ```

pub mod error;
pub mod geometry;
pub mod metadata;
pub mod resolver;
pub mod traits;
pub mod types;

// Re-export all public types
pub use error::*;
pub use geometry::*;
pub use metadata::*;
pub use resolver::*;
pub use traits::*;
pub use types::*;
