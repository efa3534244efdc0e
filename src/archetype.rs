/*

    Archetype document (.ytyp.xml) of a billboard.

    One CBaseArchetypeDef per billboard. Its name, texture
    dictionary and asset name are all the billboard name,
    the pipeline resolves the drawable through them.

    @date: Oct, 2026
*/

use crate::prelude::*;
use crate::bbox::{RenderBounds};
use crate::markup::{Element, Reserved, ToElement};

pub const ASSET_TYPE_DRAWABLE: &str = "ASSET_TYPE_DRAWABLE";

#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeDef {
    pub lod_dist: Float,
    pub flags: u32,
    pub special_attribute: u32,
    pub bb_min: Vector3,
    pub bb_max: Vector3,
    pub bs_centre: Vector3,
    pub bs_radius: Float,
    pub hd_texture_dist: Float,
    pub name: String,
    pub texture_dictionary: String,
    pub clip_dictionary: Reserved,
    pub drawable_dictionary: Reserved,
    pub physics_dictionary: Reserved,
    pub asset_type: String,
    pub asset_name: String,
    pub extensions: Reserved,
}

impl ArchetypeDef {
    pub fn new(name: &str, bounds: &RenderBounds, lod: Float) -> Self {
        Self {
            lod_dist: lod,
            flags: 0,
            special_attribute: 0,
            bb_min: bounds.min,
            bb_max: bounds.max,
            bs_centre: Vector3::ZERO,
            bs_radius: bounds.radius,
            hd_texture_dist: lod,
            name: name.to_string(),
            texture_dictionary: name.to_string(),
            clip_dictionary: Reserved,
            drawable_dictionary: Reserved,
            physics_dictionary: Reserved,
            asset_type: ASSET_TYPE_DRAWABLE.to_string(),
            asset_name: name.to_string(),
            extensions: Reserved,
        }
    }
}

impl ToElement for ArchetypeDef {
    fn to_element(&self) -> Element {
        Element::parent("Item", vec![
            Element::value("lodDist", self.lod_dist),
            Element::value("flags", self.flags),
            Element::value("specialAttribute", self.special_attribute),
            Element::vector("bbMin", &self.bb_min),
            Element::vector("bbMax", &self.bb_max),
            Element::vector("bsCentre", &self.bs_centre),
            Element::value("bsRadius", self.bs_radius),
            Element::value("hdTextureDist", self.hd_texture_dist),
            Element::text("name", &self.name),
            Element::text("textureDictionary", &self.texture_dictionary),
            self.clip_dictionary.element("clipDictionary"),
            self.drawable_dictionary.element("drawableDictionary"),
            self.physics_dictionary.element("physicsDictionary"),
            Element::text("assetType", &self.asset_type),
            Element::text("assetName", &self.asset_name),
            self.extensions.element("extensions"),
        ])
        .with_attribute("type", "CBaseArchetypeDef")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapTypes {
    pub extensions: Reserved,
    pub archetypes: Vec<ArchetypeDef>,
    pub name: Reserved,
    pub dependencies: Reserved,
    pub composite_entity_types: Reserved,
}

impl MapTypes {
    pub fn single(archetype: ArchetypeDef) -> Self {
        Self {
            extensions: Reserved,
            archetypes: vec![archetype],
            name: Reserved,
            dependencies: Reserved,
            composite_entity_types: Reserved,
        }
    }
}

impl ToElement for MapTypes {
    fn to_element(&self) -> Element {
        Element::parent("CMapTypes", vec![
            self.extensions.element("extensions"),
            Element::parent("archetypes", self.archetypes.iter().map(ToElement::to_element).collect()),
            self.name.element("name"),
            self.dependencies.element("dependencies"),
            self.composite_entity_types.element("compositeEntityTypes"),
        ])
    }
}

/// Archetype document of one billboard
pub fn archetype_document(name: &str, bounds: &RenderBounds, lod: Float) -> MapTypes {
    MapTypes::single(ArchetypeDef::new(name, bounds, lod))
}
