use crate::element::Element;
use crate::error::SvgError;
use crate::number::rounded;
use crate::writer::to_xml_string;
use cbg_types::{ElementId, IdGenerator, Rectangle};
use log::{debug, error};
use std::fs;
use std::path::Path;

pub const NAMESPACE_SVG: &str = "http://www.w3.org/2000/svg";
pub const NAMESPACE_XLINK: &str = "http://www.w3.org/1999/xlink";
pub const NAMESPACE_XML: &str = "http://www.w3.org/XML/1998/namespace";

/// A standalone SVG document measured in millimetres.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    root: Element,
    ids: IdGenerator,
}

impl SvgDocument {
    pub fn new(dimensions: Rectangle) -> Self {
        let root = Element::new("svg")
            .with_attr("xmlns", NAMESPACE_SVG)
            .with_attr("xmlns:xlink", NAMESPACE_XLINK)
            .with_attr("xmlns:xml", NAMESPACE_XML)
            .with_attr("baseProfile", "full")
            .with_attr("version", "1.1")
            .with_attr("width", format!("{}mm", rounded(dimensions.width)))
            .with_attr("height", format!("{}mm", rounded(dimensions.height)))
            .with_attr(
                "viewBox",
                format!("0 0 {} {}", rounded(dimensions.width), rounded(dimensions.height)),
            )
            .with_child(Element::new("defs"));
        Self {
            root,
            ids: IdGenerator::new(),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn push(&mut self, element: Element) {
        self.root.push(element);
    }

    pub fn defs(&self) -> &[Element] {
        self.root
            .child("defs")
            .map(|d| d.children.as_slice())
            .unwrap_or_default()
    }

    /// Reserve a fresh ID for a referenced element, e.g. a clip path.
    pub fn new_id(&mut self, prefix: &str) -> ElementId {
        self.ids.next(prefix)
    }

    /// Add an element to `defs`, keyed by its ID.
    ///
    /// Redefining an ID with an identical element is a no-op. Redefining it
    /// with a different element is an error. Returns whether anything was
    /// added.
    pub fn define(&mut self, element: Element) -> Result<bool, SvgError> {
        let id = element
            .id()
            .ok_or_else(|| SvgError::MissingId(element.name.clone()))?
            .to_string();
        if self.root.child("defs").is_none() {
            self.root.children.insert(0, Element::new("defs"));
        }
        let Some(defs) = self.root.child_mut("defs") else {
            return Ok(false);
        };
        if let Some(existing) = defs.children.iter().find(|e| e.id() == Some(id.as_str())) {
            if *existing == element {
                return Ok(false);
            }
            error!("Conflicting definitions for ID \"{}\".", id);
            return Err(SvgError::ConflictingDefinition(id));
        }
        defs.push(element);
        Ok(true)
    }

    /// Prune empty elements and serialize.
    pub fn to_xml_string(&self) -> Result<String, SvgError> {
        let mut root = self.root.clone();
        root.prune();
        to_xml_string(&root)
    }

    pub fn save(&self, path: &Path) -> Result<(), SvgError> {
        debug!("Saving \"{}\".", path.display());
        fs::write(path, self.to_xml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> SvgDocument {
        SvgDocument::new(Rectangle::new(210.0, 290.0))
    }

    #[test]
    fn test_root_attributes() {
        let d = doc();
        assert_eq!(d.root().attr("width"), Some("210mm"));
        assert_eq!(d.root().attr("viewBox"), Some("0 0 210 290"));
        assert_eq!(d.root().attr("baseProfile"), Some("full"));
        assert!(d.defs().is_empty());
    }

    #[test]
    fn test_define_adds_once() {
        let mut d = doc();
        assert!(d.define(Element::new("e").with_attr("id", "1")).unwrap());
        assert!(d.define(Element::new("f").with_attr("id", "3")).unwrap());
        assert_eq!(d.defs().len(), 2);

        // An equal element under the same ID is not added twice.
        assert!(!d.define(Element::new("e").with_attr("id", "1")).unwrap());
        assert_eq!(d.defs().len(), 2);
    }

    #[test]
    fn test_define_conflict() {
        let mut d = doc();
        d.define(Element::new("e").with_attr("id", "5")).unwrap();
        let result = d.define(Element::new("f").with_attr("id", "5"));
        assert!(matches!(result, Err(SvgError::ConflictingDefinition(id)) if id == "5"));
        assert!(d.define(Element::new("g")).is_err());
    }

    #[test]
    fn test_empty_defs_are_pruned_on_output() {
        let xml = doc().to_xml_string().unwrap();
        assert!(!xml.contains("defs"));
        assert!(xml.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(xml.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
        assert!(xml.contains("xmlns:xml=\"http://www.w3.org/XML/1998/namespace\""));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        doc().save(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }
}
