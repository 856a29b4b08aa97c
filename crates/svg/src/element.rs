/// A node in an SVG document.
///
/// Text follows the ElementTree model: `text` comes before the first child
/// and `tail` comes after the element's own end tag, inside its parent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
    pub tail: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set an attribute, replacing any previous value under the same key.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn extend_attrs<K, V>(&mut self, attrs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: ToString,
    {
        for (k, v) in attrs {
            self.set_attr(k, v);
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let i = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(i).1)
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// True if the element or any descendant carries text or tail text.
    pub fn has_mixed_content(&self) -> bool {
        self.has_text()
            || self
                .children
                .iter()
                .any(|c| c.tail.is_some() || c.has_mixed_content())
    }

    /// Remove descendants that carry nothing: no children, no text and no
    /// attributes. Runs bottom-up so emptied parents go as well.
    pub fn prune(&mut self) {
        for child in self.children.iter_mut() {
            child.prune();
        }
        self.children
            .retain(|c| !(c.children.is_empty() && !c.has_text() && c.attributes.is_empty()));
    }

    /// Count all descendants, excluding the element itself.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_replaces() {
        let mut e = Element::new("rect").with_attr("x", 1);
        e.set_attr("x", 2);
        assert_eq!(e.attr("x"), Some("2"));
        assert_eq!(e.attributes().len(), 1);
    }

    #[test]
    fn test_prune_removes_empty_shells_recursively() {
        let mut root = Element::new("svg")
            .with_child(Element::new("defs"))
            .with_child(Element::new("g").with_child(Element::new("g")))
            .with_child(Element::new("g").with_child(Element::new("rect").with_attr("x", 0)))
            .with_child(Element::new("text").with_text("hi"));
        root.prune();
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["g", "text"]);
    }

    #[test]
    fn test_mixed_content_detection() {
        let plain = Element::new("g").with_child(Element::new("rect"));
        assert!(!plain.has_mixed_content());
        let lead = Element::new("text").with_child(Element::new("tspan").with_text("A").with_tail("b"));
        assert!(lead.has_mixed_content());
    }
}
