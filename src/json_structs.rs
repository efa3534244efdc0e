/*

    Declare data structs needed to parse the billboard
    definitions JSON.

    - BillboardDefinition: one entry of the file
    - Billboards: name -> definition, iterated in name order

    @date: Oct, 2026
*/

use std::collections::BTreeMap;
use serde::{Deserialize};

use crate::prelude::*;
use crate::json_parser::{deser_corner};

pub const DEFAULT_LOD: Float = 80.0;
pub const DEFAULT_LOD_OFFSET: Float = 0.05;
pub const DEFAULT_OFFSET: Float = 0.001;

fn default_lod() -> Float { DEFAULT_LOD }
fn default_lod_offset() -> Float { DEFAULT_LOD_OFFSET }
fn default_offset() -> Float { DEFAULT_OFFSET }

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[derive(SmartDefault)]
#[serde(rename_all = "camelCase")]
pub struct BillboardDefinition {
    #[serde(deserialize_with = "deser_corner")]
    pub bottom_left: Vector3,

    #[serde(deserialize_with = "deser_corner")]
    pub top_right: Vector3,

    // Raw anchor, "X:<f>Y:<f>Z:<f>"
    #[serde(rename = "worldPosition")]
    pub world_position: String,

    #[default(DEFAULT_LOD)]
    #[serde(default = "default_lod", deserialize_with = "deser_float")]
    pub lod: Float,

    // Thickness of the low detail mesh, also render object depth
    #[default(DEFAULT_LOD_OFFSET)]
    #[serde(default = "default_lod_offset", deserialize_with = "deser_float")]
    pub lod_offset: Float,

    // Thickness of the high detail mesh
    #[default(DEFAULT_OFFSET)]
    #[serde(default = "default_offset", deserialize_with = "deser_float")]
    pub offset: Float,
}

impl BillboardDefinition {
    pub fn new(bottom_left: Vector3, top_right: Vector3, world_position: &str) -> Self {
        Self {
            bottom_left,
            top_right,
            world_position: world_position.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct Billboards {
    pub definitions: BTreeMap<String, BillboardDefinition>,
}

impl Billboards {
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.definitions.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BillboardDefinition)> {
        self.definitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let json = r#"{
            "sign": {
                "bottomLeft": { "x": 0, "y": 0, "z": 0 },
                "topRight": { "x": 10, "y": 0, "z": 5 },
                "worldPosition": "X:100Y:200Z:300"
            }
        }"#;
        let billboards: Billboards = serde_json::from_str(json).unwrap();
        let def = &billboards.definitions["sign"];
        assert_eq!(def.lod, DEFAULT_LOD);
        assert_eq!(def.lod_offset, DEFAULT_LOD_OFFSET);
        assert_eq!(def.offset, DEFAULT_OFFSET);
        assert_eq!(def.top_right, Vector3::new(10.0, 0.0, 5.0));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let json = r#"{
            "bottomLeft": [1, 2, 3],
            "topRight": "4 5 6",
            "worldPosition": "X:0Y:0Z:0",
            "lod": "120",
            "lodOffset": 0.1,
            "offset": 0.002
        }"#;
        let def: BillboardDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.bottom_left, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(def.top_right, Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(def.lod, 120.0);
        assert_eq!(def.lod_offset, 0.1);
        assert_eq!(def.offset, 0.002);
    }

    #[test]
    fn missing_corner_is_rejected() {
        let json = r#"{ "topRight": [1, 0, 1], "worldPosition": "X:0Y:0Z:0" }"#;
        assert!(serde_json::from_str::<BillboardDefinition>(json).is_err());
    }

    #[test]
    fn names_come_out_sorted() {
        let mut b = Billboards::default();
        assert!(b.is_empty());
        b.definitions.insert("b".to_string(), BillboardDefinition::default());
        b.definitions.insert("a".to_string(), BillboardDefinition::default());
        assert_eq!(b.len(), 2);
        assert_eq!(b.names(), vec!["a".to_string(), "b".to_string()]);
    }
}
