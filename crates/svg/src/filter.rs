//! Filter effects for softening graphics, e.g. the edges of a map grid.

use crate::element::Element;
use itertools::Itertools;

/// A single filter primitive such as `feGaussianBlur`.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    svg_name: &'static str,
    attributes: Vec<(&'static str, String)>,
    /// Keys whose values distinguish one effect from another in its ID.
    significant: &'static [&'static str],
}

impl Effect {
    pub fn gaussian_blur(horizontal: f64, vertical: Option<f64>) -> Self {
        let deviation = match vertical {
            Some(v) => format!("{} {}", horizontal, v),
            None => horizontal.to_string(),
        };
        Self {
            svg_name: "feGaussianBlur",
            attributes: vec![("stdDeviation", deviation), ("result", "blur".to_string())],
            significant: &["stdDeviation"],
        }
    }

    pub fn composite(in1: Option<&str>, in2: &str, operator: &str, result: &str) -> Self {
        let mut attributes = Vec::new();
        if let Some(in1) = in1 {
            attributes.push(("in", in1.to_string()));
        }
        attributes.push(("in2", in2.to_string()));
        attributes.push(("operator", operator.to_string()));
        attributes.push(("result", result.to_string()));
        Self {
            svg_name: "feComposite",
            attributes,
            significant: &["in", "in2", "operator"],
        }
    }

    pub fn id(&self) -> String {
        let values = self
            .attributes
            .iter()
            .filter(|(k, _)| self.significant.contains(k))
            .map(|(_, v)| v.replace(' ', ""));
        std::iter::once(self.svg_name.to_string())
            .chain(values)
            .join("-")
    }

    pub fn to_element(&self) -> Element {
        let mut e = Element::new(self.svg_name);
        e.extend_attrs(self.attributes.iter().cloned());
        e
    }
}

/// An ordered chain of effects, identified by the effects it contains.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    effects: Vec<Effect>,
}

impl Filter {
    pub fn new(effects: Vec<Effect>) -> Self {
        Self { effects }
    }

    pub fn gaussian_blur(horizontal: f64, vertical: Option<f64>) -> Self {
        Self::new(vec![Effect::gaussian_blur(horizontal, vertical)])
    }

    /// A blur confined to the original graphic, fading its edges.
    pub fn feather(horizontal: f64, vertical: Option<f64>) -> Self {
        Self::new(vec![
            Effect::gaussian_blur(horizontal, vertical),
            Effect::composite(Some("SourceGraphic"), "blur", "atop", "composite1"),
            Effect::composite(None, "composite1", "in", "composite2"),
            Effect::composite(None, "composite2", "in", "composite3"),
        ])
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn id(&self) -> String {
        std::iter::once("f".to_string())
            .chain(self.effects.iter().map(Effect::id))
            .join("_")
    }

    pub fn url(&self) -> String {
        format!("url(#{})", self.id())
    }

    pub fn to_element(&self) -> Element {
        self.effects.iter().fold(
            Element::new("filter").with_attr("id", self.id()),
            |filter, effect| filter.with_child(effect.to_element()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_ids() {
        assert_eq!(Filter::gaussian_blur(1.0, None).id(), "f_feGaussianBlur-1");
        assert_eq!(
            Filter::gaussian_blur(1.0, Some(2.5)).id(),
            "f_feGaussianBlur-12.5"
        );
    }

    #[test]
    fn test_feather_structure() {
        let f = Filter::feather(2.0, None);
        let e = f.to_element();
        assert_eq!(e.name, "filter");
        assert_eq!(e.children.len(), 4);
        assert_eq!(e.children[0].attr("stdDeviation"), Some("2"));
        assert_eq!(e.children[1].attr("in"), Some("SourceGraphic"));
        assert_eq!(e.children[1].attr("operator"), Some("atop"));
        assert_eq!(e.children[3].attr("in2"), Some("composite2"));
        assert_eq!(e.children[3].attr("result"), Some("composite3"));
        assert!(f.id().starts_with("f_feGaussianBlur-2_feComposite-SourceGraphic-blur-atop"));
    }
}
