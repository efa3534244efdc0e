/*

    Generic element tree shared by the archetype, placement
    and manifest documents, plus the XML writer and reader
    for it.

    Documents are typed records that implement ToElement.
    Each field maps to one element in a fixed order:

    - singleton values become an element with attributes
      (e.g. <lodDist value="1000"/>) or text (<name>A</name>)
    - reserved slots become an empty element (<extensions/>).
      The external schema expects them even though this
      generator never fills them.

    @date: Oct, 2026
*/

use std::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::prelude::*;
use crate::errors::{BillboardError, Result};

/// Marker for a schema slot that is present but intentionally empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reserved;

impl Reserved {
    /// The slot as written, an element with no attributes and no body
    pub fn element(&self, name: &str) -> Element {
        Element::reserved(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Text(String),
    Children(Vec<Element>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub body: Body,
}

pub trait ToElement {
    fn to_element(&self) -> Element;
}

impl Element {
    pub fn reserved(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn text(name: &str, text: &str) -> Self {
        // An empty text would not survive a round trip, it reads back as empty
        let body = if text.is_empty() { Body::Empty } else { Body::Text(text.to_string()) };
        Self { body, ..Self::reserved(name) }
    }

    pub fn parent(name: &str, children: Vec<Element>) -> Self {
        let body = if children.is_empty() { Body::Empty } else { Body::Children(children) };
        Self { body, ..Self::reserved(name) }
    }

    /// <name value="..."/>
    pub fn value(name: &str, value: impl Display) -> Self {
        Self::reserved(name).with_attribute("value", value)
    }

    /// <name x=".." y=".." z=".."/>
    pub fn vector(name: &str, v: &Vector3) -> Self {
        Self::reserved(name)
            .with_attribute("x", v.x)
            .with_attribute("y", v.y)
            .with_attribute("z", v.z)
    }

    /// <name x=".." y=".." z=".." w=".."/>
    pub fn quaternion(name: &str, q: [Float; 4]) -> Self {
        Self::vector(name, &Vector3::new(q[0], q[1], q[2])).with_attribute("w", q[3])
    }

    pub fn with_attribute(mut self, key: &str, value: impl Display) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.body == Body::Empty
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn float_attribute(&self, key: &str) -> Option<Float> {
        self.attribute(key)?.parse().ok()
    }

    pub fn vector_attributes(&self) -> Option<Vector3> {
        Some(Vector3::new(
            self.float_attribute("x")?,
            self.float_attribute("y")?,
            self.float_attribute("z")?,
        ))
    }

    pub fn children(&self) -> &[Element] {
        match &self.body {
            Body::Children(c) => c,
            _ => &[],
        }
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Follow a chain of child names, e.g. ["entities", "Item", "position"]
    pub fn path(&self, names: &[&str]) -> Option<&Element> {
        names.iter().try_fold(self, |el, name| el.child(name))
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.body {
            Body::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        self.write_into(&mut writer)?;
        let bytes = writer.into_inner();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write_into(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let start = BytesStart::new(self.name.as_str())
            .with_attributes(self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        match &self.body {
            Body::Empty => writer.write_event(Event::Empty(start))?,
            Body::Text(text) => {
                writer.write_event(Event::Start(start))?;
                writer.write_event(Event::Text(BytesText::new(text)))?;
                writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
            }
            Body::Children(children) => {
                writer.write_event(Event::Start(start))?;
                for child in children {
                    child.write_into(writer)?;
                }
                writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
            }
        }
        Ok(())
    }

    /// Read a document written by `to_xml` back into its element tree.
    pub fn from_xml(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // Elements still open, innermost last
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let finished = match reader.read_event()? {
                Event::Start(e) => {
                    stack.push(Self::open(&e)?);
                    None
                }
                Event::Empty(e) => Some(Self::open(&e)?),
                Event::Text(t) => {
                    let text = t.unescape()?.into_owned();
                    if let Some(top) = stack.last_mut() {
                        top.body = Body::Text(text);
                    }
                    None
                }
                Event::End(_) => stack.pop(),
                Event::Eof => break,
                _ => None,
            };
            if let Some(el) = finished {
                match stack.last_mut() {
                    Some(parent) => match &mut parent.body {
                        Body::Children(c) => c.push(el),
                        body => *body = Body::Children(vec![el]),
                    },
                    None => root = Some(el),
                }
            }
        }

        match (root, stack.is_empty()) {
            (Some(root), true) => Ok(root),
            _ => Err(BillboardError::MarkupStructure("document has no complete root element".to_string())),
        }
    }

    fn open(start: &BytesStart) -> Result<Element> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut el = Element::reserved(&name);
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            el.attributes.push((key, value));
        }
        Ok(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::parent("Root", vec![
            Element::text("name", "a & b"),
            Element::value("lodDist", 1000.0),
            Element::vector("position", &Vector3::new(1.5, -2.0, 0.0)),
            Element::reserved("extensions"),
            Element::parent("entities", vec![
                Element::parent("Item", vec![Element::text("archetypeName", "A")])
                    .with_attribute("type", "CEntityDef"),
            ]),
        ])
    }

    #[test]
    fn writes_declaration_and_self_closing_slots() {
        let xml = sample().to_xml().unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains("<extensions/>"));
        assert!(xml.contains(r#"<lodDist value="1000"/>"#));
        assert!(xml.contains(r#"<position x="1.5" y="-2" z="0"/>"#));
        assert!(xml.contains("<name>a &amp; b</name>"));
        assert!(xml.contains(r#"<Item type="CEntityDef">"#));
    }

    #[test]
    fn round_trip_preserves_tree() {
        let el = sample();
        let parsed = Element::from_xml(&el.to_xml().unwrap()).unwrap();
        assert_eq!(parsed, el);
    }

    #[test]
    fn empty_inputs_collapse_to_reserved() {
        assert!(Element::parent("entities", vec![]).is_empty());
        assert!(Element::text("owner", "").is_empty());
    }

    #[test]
    fn path_lookup_and_typed_attributes() {
        let el = sample();
        let item = el.path(&["entities", "Item"]).unwrap();
        assert_eq!(item.attribute("type"), Some("CEntityDef"));
        assert_eq!(item.child("archetypeName").and_then(Element::text_content), Some("A"));
        assert_eq!(
            el.child("position").and_then(Element::vector_attributes),
            Some(Vector3::new(1.5, -2.0, 0.0))
        );
        assert!(el.path(&["entities", "missing"]).is_none());
    }

    #[test]
    fn document_without_root_is_an_error() {
        assert!(Element::from_xml("").is_err());
    }

    #[test]
    fn reserved_marker_serializes_as_self_closing_slot() {
        let slot = Reserved.element("extensions");
        assert!(slot.is_empty());
        assert!(slot.attributes.is_empty());
        assert!(slot.to_xml().unwrap().ends_with("<extensions/>"));
    }
}
