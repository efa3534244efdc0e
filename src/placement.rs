/*

    Placement document (.ymap.xml) of a billboard.

    Holds a single CEntityDef that puts the archetype into the
    world, plus the entity and streaming extents the engine uses
    to decide when the map is loaded. Every other section of
    the map schema is written as an empty placeholder.

    @date: Oct, 2026
*/

use crate::prelude::*;
use crate::bbox::{Extents};
use crate::errors::{Result};
use crate::geometry::{DerivedGeometry};
use crate::markup::{Element, Reserved, ToElement};

pub const MAP_FLAGS: u32 = 32;
pub const MAP_CONTENT_FLAGS: u32 = 1;
pub const ENTITY_FLAGS: u32 = 1572864;
pub const LOD_LEVEL_HD: &str = "LODTYPES_DEPTH_HD";
pub const PRIORITY_REQUIRED: &str = "PRI_REQUIRED";

#[derive(Debug, Clone, PartialEq)]
pub struct EntityDef {
    pub archetype_name: String,
    pub flags: u32,
    pub guid: u32,
    pub position: Vector3,
    pub rotation: [Float; 4],
    pub scale_xy: Float,
    pub scale_z: Float,
    pub parent_index: i32,
    pub lod_dist: Float,
    pub child_lod_dist: Float,
    pub lod_level: String,
    pub num_children: u32,
    pub priority_level: String,
    pub extensions: Reserved,
    pub ambient_occlusion_multiplier: u8,
    pub artificial_ambient_occlusion: u8,
    pub tint_value: u32,
}

impl EntityDef {
    pub fn new(name: &str, geometry: &DerivedGeometry, lod: Float) -> Self {
        Self {
            archetype_name: name.to_string(),
            flags: ENTITY_FLAGS,
            guid: 0,
            position: geometry.entity_position(),
            rotation: geometry.rotation.placement_tuple(),
            scale_xy: 1.0,
            scale_z: 1.0,
            parent_index: -1,
            lod_dist: lod,
            child_lod_dist: 0.0,
            lod_level: LOD_LEVEL_HD.to_string(),
            num_children: 0,
            priority_level: PRIORITY_REQUIRED.to_string(),
            extensions: Reserved,
            ambient_occlusion_multiplier: 255,
            artificial_ambient_occlusion: 255,
            tint_value: 0,
        }
    }
}

impl ToElement for EntityDef {
    fn to_element(&self) -> Element {
        Element::parent("Item", vec![
            Element::text("archetypeName", &self.archetype_name),
            Element::value("flags", self.flags),
            Element::value("guid", self.guid),
            Element::vector("position", &self.position),
            Element::quaternion("rotation", self.rotation),
            Element::value("scaleXY", self.scale_xy),
            Element::value("scaleZ", self.scale_z),
            Element::value("parentIndex", self.parent_index),
            Element::value("lodDist", self.lod_dist),
            Element::value("childLodDist", self.child_lod_dist),
            Element::text("lodLevel", &self.lod_level),
            Element::value("numChildren", self.num_children),
            Element::text("priorityLevel", &self.priority_level),
            self.extensions.element("extensions"),
            Element::value("ambientOcclusionMultiplier", self.ambient_occlusion_multiplier),
            Element::value("artificialAmbientOcclusion", self.artificial_ambient_occlusion),
            Element::value("tintValue", self.tint_value),
        ])
        .with_attribute("type", "CEntityDef")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapBlock {
    pub version: u32,
    pub flags: u32,
    pub name: String,
    pub owner: Reserved,
}

impl ToElement for MapBlock {
    fn to_element(&self) -> Element {
        Element::parent("block", vec![
            Element::value("version", self.version),
            Element::value("flags", self.flags),
            Element::text("name", &self.name),
            self.owner.element("owner"),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub name: String,
    pub parent: Reserved,
    pub flags: u32,
    pub content_flags: u32,
    pub streaming_extents: Extents,
    pub entities_extents: Extents,
    pub entities: Vec<EntityDef>,
    pub block: MapBlock,
}

impl MapData {
    pub fn new(name: &str, geometry: &DerivedGeometry, lod: Float) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            parent: Reserved,
            flags: MAP_FLAGS,
            content_flags: MAP_CONTENT_FLAGS,
            streaming_extents: geometry.streaming_extents(lod)?,
            entities_extents: geometry.entity_extents()?,
            entities: vec![EntityDef::new(name, geometry, lod)],
            block: MapBlock {
                version: 0,
                flags: 0,
                name: name.to_string(),
                owner: Reserved,
            },
        })
    }
}

// Sections of the map schema this generator never fills
fn reserved_all(names: &[&str]) -> Vec<Element> {
    names.iter().map(|n| Reserved.element(n)).collect()
}

impl ToElement for MapData {
    fn to_element(&self) -> Element {
        let mut children = vec![
            Element::text("name", &self.name),
            self.parent.element("parent"),
            Element::value("flags", self.flags),
            Element::value("contentFlags", self.content_flags),
            Element::vector("streamingExtentsMin", &self.streaming_extents.min),
            Element::vector("streamingExtentsMax", &self.streaming_extents.max),
            Element::vector("entitiesExtentsMin", &self.entities_extents.min),
            Element::vector("entitiesExtentsMax", &self.entities_extents.max),
            Element::parent("entities", self.entities.iter().map(ToElement::to_element).collect()),
        ];
        children.extend(reserved_all(&["containerLods", "boxOccluders", "occludeModels", "physicsDictionaries"]));
        children.push(Element::parent("instancedData",
            reserved_all(&["ImapLink", "PropInstanceList", "GrassInstanceList"])));
        children.extend(reserved_all(&["timeCycleModifiers", "carGenerators"]));
        children.push(Element::parent("LODLightsSOA", reserved_all(&[
            "direction",
            "falloff",
            "falloffExponent",
            "timeAndStateFlags",
            "hash",
            "coneInnerAngle",
            "coneOuterAngleOrCapExt",
            "coronaIntensity",
        ])));
        children.push(Element::parent("DistantLODLightsSOA", vec![
            Reserved.element("position"),
            Reserved.element("RGBI"),
            Element::value("numStreetLights", 0),
            Element::value("category", 0),
        ]));
        children.push(self.block.to_element());

        Element::parent("CMapData", children)
    }
}

/// Placement document of one billboard
pub fn placement_document(name: &str, geometry: &DerivedGeometry, lod: Float) -> Result<MapData> {
    MapData::new(name, geometry, lod)
}
