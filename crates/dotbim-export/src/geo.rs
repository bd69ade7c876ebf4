// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoJSON export
//!
//! Elements whose type is in the selection become point features located at
//! the element position. Coordinates are copied as-is, no reprojection.

use dotbim_model::{BimExporter, BimFile, Element, Info};
use log::debug;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// GeoJSON `FeatureCollection`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// GeoJSON `Feature` for one element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub guid: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub info: Info,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `[x, y, z]`
    Point { coordinates: [f64; 3] },
}

impl Feature {
    fn from_element(element: &Element) -> Self {
        Self {
            properties: FeatureProperties {
                guid: element.guid.clone(),
                element_type: element.element_type.clone(),
                info: element.info.clone(),
            },
            geometry: Geometry::Point {
                coordinates: element.vector.to_array(),
            },
        }
    }
}

/// Exporter producing a [`FeatureCollection`] of selected element types
///
/// Matching is exact and case-sensitive. An empty selection yields an
/// empty collection.
#[derive(Clone, Debug, Default)]
pub struct GeoExporter {
    types: FxHashSet<String>,
}

impl GeoExporter {
    /// Create an exporter selecting the given element types
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Add one element type to the selection
    pub fn with_type(mut self, element_type: impl Into<String>) -> Self {
        self.types.insert(element_type.into());
        self
    }

    /// Check whether an element passes the type filter
    pub fn selects(&self, element: &Element) -> bool {
        self.types.contains(&element.element_type)
    }
}

impl BimExporter for GeoExporter {
    type Output = FeatureCollection;

    fn export(&self, file: &BimFile) -> FeatureCollection {
        let features: Vec<Feature> = file
            .elements
            .iter()
            .filter(|e| self.selects(e))
            .map(Feature::from_element)
            .collect();

        debug!(
            "Exported {} of {} elements as features",
            features.len(),
            file.elements.len()
        );

        FeatureCollection { features }
    }
}

/// Project the elements of the selected types into a feature collection
pub fn to_geo<I, S>(file: &BimFile, selected_types: I) -> FeatureCollection
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    GeoExporter::new(selected_types).export(file)
}
