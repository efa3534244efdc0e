/*

    Aggregate manifest (.ymf.xml) listing every generated
    billboard. Each billboard's placement depends on the
    archetype of the same name, the engine needs that
    dependency to resolve archetypes at load time.

    @date: Oct, 2026
*/

use crate::markup::{Element, Reserved, ToElement};

pub const MANIFEST_FILE: &str = "_manifest_billboards.ymf.xml";

#[derive(Debug, Clone, PartialEq)]
pub struct ImapDependency {
    pub imap_name: String,
    pub manifest_flags: Reserved,
    pub ityp_dep_array: Vec<String>,
}

impl ImapDependency {
    /// Placement `name` depending on the archetype of the same name
    pub fn on_itself(name: &str) -> Self {
        Self {
            imap_name: name.to_string(),
            manifest_flags: Reserved,
            ityp_dep_array: vec![name.to_string()],
        }
    }
}

impl ToElement for ImapDependency {
    fn to_element(&self) -> Element {
        Element::parent("Item", vec![
            Element::text("imapName", &self.imap_name),
            self.manifest_flags.element("manifestFlags"),
            Element::parent("itypDepArray",
                self.ityp_dep_array.iter().map(|d| Element::text("Item", d)).collect()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackFileMetaData {
    pub map_data_groups: Reserved,
    pub hd_txd_binding_array: Reserved,
    pub imap_dependencies: Reserved,
    pub ityp_dependencies_2: Reserved,
    pub interiors: Reserved,
    pub imap_dependencies_2: Vec<ImapDependency>,
}

impl PackFileMetaData {
    pub fn new(names: &[String]) -> Self {
        Self {
            map_data_groups: Reserved,
            hd_txd_binding_array: Reserved,
            imap_dependencies: Reserved,
            ityp_dependencies_2: Reserved,
            interiors: Reserved,
            imap_dependencies_2: names.iter().map(|n| ImapDependency::on_itself(n)).collect(),
        }
    }
}

impl ToElement for PackFileMetaData {
    fn to_element(&self) -> Element {
        Element::parent("CPackFileMetaData", vec![
            self.map_data_groups.element("MapDataGroups"),
            self.hd_txd_binding_array.element("HDTxdBindingArray"),
            self.imap_dependencies.element("imapDependencies"),
            self.ityp_dependencies_2.element("itypDependencies_2"),
            self.interiors.element("Interiors"),
            Element::parent("imapDependencies_2",
                self.imap_dependencies_2.iter().map(ToElement::to_element).collect()),
        ])
    }
}

/// Manifest over the complete set of billboard names
pub fn manifest_document(names: &[String]) -> PackFileMetaData {
    PackFileMetaData::new(names)
}
