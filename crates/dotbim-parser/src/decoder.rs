// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! .bim JSON to data model decoding
//!
//! The key mapping lives in the serde derives of the model types. This
//! module drives them and reports every structural problem as
//! `MalformedInput` located by the path serde was at when it failed.

use dotbim_model::{BimError, BimFile, Result};
use serde::Deserializer;
use serde_json::Value;
use serde_path_to_error::Segment;
use std::fmt;

/// Location inside the document, rendered as `$.elements[0].vector.x`
#[derive(Clone, Debug)]
pub(crate) struct Path(String);

impl Path {
    pub(crate) fn root() -> Self {
        Path("$".to_string())
    }

    pub(crate) fn key(&self, key: &str) -> Self {
        Path(format!("{}.{}", self.0, key))
    }

    pub(crate) fn index(&self, index: usize) -> Self {
        Path(format!("{}[{}]", self.0, index))
    }

    fn from_segments(path: &serde_path_to_error::Path) -> Self {
        path.iter().fold(Path::root(), |rendered, segment| match segment {
            Segment::Seq { index } => rendered.index(*index),
            Segment::Map { key } => rendered.key(key),
            Segment::Enum { variant } => rendered.key(variant),
            Segment::Unknown => rendered.key("?"),
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decode .bim JSON text
pub(crate) fn decode_str(content: &str) -> Result<BimFile> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    let file = decode(&mut deserializer)?;
    deserializer.end().map_err(invalid_json)?;
    Ok(file)
}

/// Decode .bim JSON from raw UTF-8 bytes
pub(crate) fn decode_slice(content: &[u8]) -> Result<BimFile> {
    let mut deserializer = serde_json::Deserializer::from_slice(content);
    let file = decode(&mut deserializer)?;
    deserializer.end().map_err(invalid_json)?;
    Ok(file)
}

/// Decode an already-parsed JSON tree
pub(crate) fn decode_value(document: &Value) -> Result<BimFile> {
    decode(document)
}

fn decode<'de, D>(deserializer: D) -> Result<BimFile>
where
    D: Deserializer<'de, Error = serde_json::Error>,
{
    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = Path::from_segments(err.path());
        let inner = err.into_inner();
        if inner.is_syntax() || inner.is_eof() || inner.is_io() {
            invalid_json(inner)
        } else {
            BimError::malformed(path.to_string(), inner.to_string())
        }
    })
}

fn invalid_json(err: serde_json::Error) -> BimError {
    BimError::malformed("$", format!("invalid JSON: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotbim_model::{Color, MeshId, Rotation, SchemaVersion, Vector};
    use serde_json::json;

    fn element_json() -> Value {
        json!({
            "guid": "g1",
            "mesh_id": 0,
            "vector": {"x": 1, "y": 2.5, "z": -3},
            "rotation": {"qx": 0, "qy": 0, "qz": 0, "qw": 1},
            "type": "Wall",
            "color": {"r": 255, "g": 0, "b": 0, "a": 255},
            "info": {"Name": "Wall 1"}
        })
    }

    fn document(elements: Value) -> Value {
        json!({
            "schema_version": "1.0.0",
            "meshes": [{"mesh_id": 0, "coordinates": [0, 0, 0, 1, 0, 0, 0, 1, 0], "indices": [0, 1, 2]}],
            "elements": elements,
            "info": {"Author": "test"}
        })
    }

    fn malformed_path(err: BimError) -> String {
        match err {
            BimError::MalformedInput { path, .. } => path,
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_value() {
        let file = decode_value(&document(json!([element_json()]))).unwrap();

        assert_eq!(file.schema_version, SchemaVersion::Text("1.0.0".to_string()));
        assert_eq!(file.info.get_str("Author"), Some("test"));
        assert_eq!(file.meshes.len(), 1);
        assert_eq!(file.meshes[0].mesh_id, MeshId::Integer(0));
        assert_eq!(file.meshes[0].indices, vec![0, 1, 2]);

        let element = &file.elements[0];
        assert_eq!(element.guid, "g1");
        assert_eq!(element.vector, Vector::new(1.0, 2.5, -3.0));
        assert_eq!(element.rotation, Rotation::identity());
        assert_eq!(element.element_type, "Wall");
        assert_eq!(element.color, Color::new(255, 0, 0, 255));
        assert_eq!(element.face_colors, None);
        assert_eq!(element.info.get_str("Name"), Some("Wall 1"));
    }

    #[test]
    fn test_numeric_schema_version() {
        let mut doc = document(json!([]));
        doc["schema_version"] = json!(1.1);
        let file = decode_value(&doc).unwrap();
        assert!(matches!(file.schema_version, SchemaVersion::Number(_)));
        assert_eq!(file.schema_version.to_string(), "1.1");
    }

    #[test]
    fn test_missing_info_is_empty() {
        let mut doc = document(json!([element_json()]));
        doc.as_object_mut().unwrap().remove("info");
        doc["elements"][0].as_object_mut().unwrap().remove("info");

        let file = decode_value(&doc).unwrap();
        assert!(file.info.is_empty());
        assert!(file.elements[0].info.is_empty());
    }

    #[test]
    fn test_null_info_is_empty() {
        let mut doc = document(json!([element_json()]));
        doc["info"] = Value::Null;
        assert!(decode_value(&doc).unwrap().info.is_empty());
    }

    #[test]
    fn test_info_wrong_type() {
        let mut doc = document(json!([]));
        doc["info"] = json!([1, 2]);
        let err = decode_value(&doc).unwrap_err();
        assert_eq!(malformed_path(err), "$.info");
    }

    #[test]
    fn test_face_colors_objects() {
        let mut element = element_json();
        element["face_colors"] = json!([{"r": 1, "g": 2, "b": 3, "a": 4}]);
        let file = decode_value(&document(json!([element]))).unwrap();
        assert_eq!(file.elements[0].face_colors, Some(vec![Color::new(1, 2, 3, 4)]));
    }

    #[test]
    fn test_face_colors_flat() {
        let mut element = element_json();
        element["face_colors"] = json!([1, 2, 3, 4, 5, 6, 7, 8]);
        let file = decode_value(&document(json!([element]))).unwrap();
        assert_eq!(
            file.elements[0].face_colors,
            Some(vec![Color::new(1, 2, 3, 4), Color::new(5, 6, 7, 8)])
        );
    }

    #[test]
    fn test_face_colors_empty_and_null() {
        let mut element = element_json();
        element["face_colors"] = json!([]);
        let file = decode_value(&document(json!([element.clone()]))).unwrap();
        assert_eq!(file.elements[0].face_colors, Some(vec![]));

        element["face_colors"] = Value::Null;
        let file = decode_value(&document(json!([element]))).unwrap();
        assert_eq!(file.elements[0].face_colors, None);
    }

    #[test]
    fn test_face_colors_bad_length() {
        let mut element = element_json();
        element["face_colors"] = json!([1, 2, 3]);
        let err = decode_value(&document(json!([element]))).unwrap_err();
        assert_eq!(malformed_path(err), "$.elements[0].face_colors");
    }

    #[test]
    fn test_missing_elements() {
        let mut doc = document(json!([]));
        doc.as_object_mut().unwrap().remove("elements");
        let err = decode_value(&doc).unwrap_err();
        assert!(err.to_string().contains("missing field `elements`"));
        assert_eq!(malformed_path(err), "$");
    }

    #[test]
    fn test_vector_as_string() {
        let mut element = element_json();
        element["vector"] = json!("1,2,3");
        let err = decode_value(&document(json!([element]))).unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("expected struct Vector"));
        assert_eq!(malformed_path(err), "$.elements[0].vector");
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let mut doc = document(json!([]));
        doc["meshes"][0]["coordinates"][4] = json!("1.0");
        let err = decode_value(&doc).unwrap_err();
        assert_eq!(malformed_path(err), "$.meshes[0].coordinates[4]");
    }

    #[test]
    fn test_negative_index() {
        let mut doc = document(json!([]));
        doc["meshes"][0]["indices"][1] = json!(-1);
        let err = decode_value(&doc).unwrap_err();
        assert_eq!(malformed_path(err), "$.meshes[0].indices[1]");
    }

    #[test]
    fn test_color_out_of_range() {
        let mut element = element_json();
        element["color"]["g"] = json!(256);
        let err = decode_value(&document(json!([element]))).unwrap_err();
        assert_eq!(malformed_path(err), "$.elements[0].color.g");
    }

    #[test]
    fn test_missing_rotation_component() {
        let mut element = element_json();
        element["rotation"].as_object_mut().unwrap().remove("qw");
        let err = decode_value(&document(json!([element]))).unwrap_err();
        assert_eq!(malformed_path(err), "$.elements[0].rotation");
    }

    #[test]
    fn test_root_not_object() {
        let err = decode_value(&json!("1.1.0")).unwrap_err();
        assert_eq!(malformed_path(err), "$");
    }

    #[test]
    fn test_string_mesh_ids() {
        let mut doc = document(json!([]));
        doc["meshes"][0]["mesh_id"] = json!("m1");
        let file = decode_value(&doc).unwrap();
        assert_eq!(file.meshes[0].mesh_id, MeshId::from("m1"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut element = element_json();
        element["layer"] = json!("A-WALL");
        element["vector"]["w"] = json!(1);
        element["color"]["alpha_mode"] = json!("blend");
        let mut doc = document(json!([element]));
        doc["generator"] = json!("exporter 2.3");
        doc["meshes"][0]["normals"] = json!([0, 0, 1]);

        let file = decode_value(&doc).unwrap();
        assert_eq!(file.elements[0].vector, Vector::new(1.0, 2.5, -3.0));
        assert_eq!(file.elements[0].color, Color::new(255, 0, 0, 255));
        assert_eq!(file, decode_value(&document(json!([element_json()]))).unwrap());
    }

    #[test]
    fn test_face_colors_mixed() {
        let mut element = element_json();
        element["face_colors"] = json!([{"r": 1, "g": 2, "b": 3, "a": 4}, 1, 2, 3, 4]);
        let err = decode_value(&document(json!([element]))).unwrap_err();
        assert!(err.to_string().contains("mix"));
        assert_eq!(malformed_path(err), "$.elements[0].face_colors");
    }

    #[test]
    fn test_text_located_errors() {
        let text = serde_json::to_string(&document(json!([element_json()]))).unwrap();
        let text = text.replace(r#""qw":1"#, r#""qw":"1""#);
        let err = decode_str(&text).unwrap_err();
        assert_eq!(malformed_path(err), "$.elements[0].rotation.qw");
    }

    #[test]
    fn test_invalid_text() {
        let err = decode_str("{\"schema_version\": ").unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
        assert_eq!(malformed_path(err), "$");

        let text = serde_json::to_string(&document(json!([]))).unwrap();
        assert!(decode_str(&format!("{} trailing", text)).is_err());
        assert_eq!(
            decode_slice(text.as_bytes()).unwrap(),
            decode_str(&text).unwrap()
        );
    }
}
