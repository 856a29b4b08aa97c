//! Identifiers for SVG elements that are referenced from elsewhere,
//! such as masks, clip paths and filters.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The `id` attribute of a referenced SVG element.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(Arc<str>);

impl ElementId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A local IRI reference, as used in `mask="url(#m1)"`.
    pub fn url(&self) -> String {
        format!("url(#{})", self.0)
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out unique IDs per prefix: `m1`, `m2`, `cP1`, ...
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    counters: HashMap<String, usize>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &str) -> ElementId {
        let n = self.counters.entry(prefix.to_string()).or_insert(0);
        *n += 1;
        ElementId::from(format!("{}{}", prefix, n))
    }
}
