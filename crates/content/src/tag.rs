//! Tags: short categorical words on cards, checked against a game roster.
//!
//! Any property of a card that needs no unique or elaborate text can be a
//! tag. Tags can also drive selection and sorting.

use crate::error::ContentError;
use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Syntactic tags concern the rules ("reaction"); the rest are
    /// semantic ("animal").
    #[serde(default)]
    pub syntactic: bool,
    /// Non-printing tags are invisible on cards.
    #[serde(default = "yes")]
    pub printing: bool,
    #[serde(default)]
    pub subordinate_to: Option<String>,
    /// Sorts tags in printed lists, ahead of their keys.
    #[serde(default)]
    pub sorting_value: i64,
}

impl Tag {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            full_name: None,
            syntactic: false,
            printing: true,
            subordinate_to: None,
            sorting_value: 0,
        }
    }

    pub fn syntactic(mut self) -> Self {
        self.syntactic = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.printing = false;
        self
    }

    pub fn under(mut self, master: impl Into<String>) -> Self {
        self.subordinate_to = Some(master.into());
        self
    }

    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    pub fn with_sorting_value(mut self, value: i64) -> Self {
        self.sorting_value = value;
        self
    }

    pub fn full_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.key)
    }

    pub fn semantic(&self) -> bool {
        !self.syntactic
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// The registry of all tags known to a game.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Tag>")]
pub struct TagRoster {
    tags: BTreeMap<String, Tag>,
}

impl TryFrom<Vec<Tag>> for TagRoster {
    type Error = ContentError;

    fn try_from(tags: Vec<Tag>) -> Result<Self, Self::Error> {
        let mut roster = TagRoster::default();
        for tag in tags {
            roster.register(tag)?;
        }
        Ok(roster)
    }
}

impl TagRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag. Masters must be registered before their subordinates.
    pub fn register(&mut self, tag: Tag) -> Result<(), ContentError> {
        if self.tags.contains_key(&tag.key) {
            return Err(ContentError::Tagging(format!(
                "\"{}\" defined more than once.",
                tag.key
            )));
        }
        if let Some(master_key) = &tag.subordinate_to {
            let master = self.tags.get(master_key).ok_or_else(|| {
                ContentError::Tagging(format!(
                    "Tag \"{}\" refers to unknown master \"{}\".",
                    tag.key, master_key
                ))
            })?;
            if master.syntactic != tag.syntactic {
                return Err(ContentError::Tagging(format!(
                    "Tag \"{}\" does not mix with its master, \"{}\".",
                    tag.key, master_key
                )));
            }
        }
        self.tags.insert(tag.key.clone(), tag);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&Tag, ContentError> {
        self.tags.get(key).ok_or_else(|| {
            ContentError::Tagging(format!("Tag markup \"{}\" does not appear in roster.", key))
        })
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// True when any tag has a master.
    pub fn is_hierarchical(&self) -> bool {
        self.tags.values().any(|t| t.subordinate_to.is_some())
    }
}

/// The tags on one card, kept sorted by key.
#[derive(Debug, Clone, PartialEq)]
pub struct TagField {
    roster: Arc<TagRoster>,
    keys: BTreeSet<String>,
}

impl TagField {
    pub fn empty(roster: Arc<TagRoster>) -> Self {
        Self {
            roster,
            keys: BTreeSet::new(),
        }
    }

    /// Builds a field from a single key or a list of keys.
    pub fn from_value(value: &Value, roster: Arc<TagRoster>) -> Result<Self, ContentError> {
        let mut field = Self::empty(roster);
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    field.add(&scalar_string(item)?)?;
                }
            }
            other => field.add(&scalar_string(other)?)?,
        }
        field.check_masters()?;
        Ok(field)
    }

    pub fn from_keys<I, S>(keys: I, roster: Arc<TagRoster>) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut field = Self::empty(roster);
        for key in keys {
            field.add(key.as_ref())?;
        }
        field.check_masters()?;
        Ok(field)
    }

    /// Adds a registered tag. Adding a tag twice is harmless.
    pub fn add(&mut self, key: &str) -> Result<(), ContentError> {
        self.roster.get(key)?;
        self.keys.insert(key.to_string());
        Ok(())
    }

    fn check_masters(&self) -> Result<(), ContentError> {
        for t in self.subordinates() {
            if let Some(master) = &t.subordinate_to {
                if !self.keys.contains(master) {
                    return Err(ContentError::Tagging(format!(
                        "Tag \"{}\" lacks master \"{}\".",
                        t.key, master
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// True if a tag here has `name` as its key or its full name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.iter().any(|t| t.key == name || t.full_name() == name)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.keys.iter().filter_map(|k| self.roster.get(k).ok())
    }

    pub fn select<F: Fn(&Tag) -> bool>(&self, selector: F) -> Vec<&Tag> {
        self.iter().filter(|t| selector(t)).collect()
    }

    pub fn syntactic(&self) -> Vec<&Tag> {
        self.select(|t| t.syntactic)
    }

    pub fn semantic(&self) -> Vec<&Tag> {
        self.select(Tag::semantic)
    }

    pub fn subordinates(&self) -> Vec<&Tag> {
        self.select(|t| t.subordinate_to.is_some())
    }

    /// Masters with subordinates actually present in the field.
    pub fn masters(&self) -> BTreeSet<&str> {
        self.subordinates()
            .into_iter()
            .filter_map(|t| t.subordinate_to.as_deref())
            .collect()
    }

    /// A printable string of the selected tags, e.g. the semantic ones
    /// only. Subordinates are grouped under their masters.
    pub fn as_string(&self, selection: &[&Tag]) -> String {
        if !self.roster.is_hierarchical() {
            let joined = selection
                .iter()
                .filter(|t| t.printing)
                .map(|t| t.key.as_str())
                .join(", ");
            return capitalize(&joined);
        }

        let subordinates = self.subordinates();
        selection
            .iter()
            .filter(|t| self.contains(&t.key) && t.subordinate_to.is_none() && t.printing)
            .sorted_by(|a, b| (a.sorting_value, &a.key).cmp(&(b.sorting_value, &b.key)))
            .map(|t| {
                let under: Vec<&str> = subordinates
                    .iter()
                    .filter(|s| s.printing && s.subordinate_to.as_deref() == Some(t.key.as_str()))
                    .map(|s| s.key.as_str())
                    .sorted()
                    .collect();
                if under.is_empty() {
                    capitalize(&t.key)
                } else {
                    format!("{} ({})", capitalize(&t.key), under.join(", "))
                }
            })
            .join(", ")
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let all: Vec<&Tag> = self.iter().collect();
        f.write_str(&self.as_string(&all))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn scalar_string(value: &Value) -> Result<String, ContentError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ContentError::spec(format!(
            "Expected a plain value, found {}.",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat_roster() -> Arc<TagRoster> {
        Arc::new(
            TagRoster::try_from(vec![Tag::new("aa"), Tag::new("c c"), Tag::new("2")]).unwrap(),
        )
    }

    fn hierarchy() -> Arc<TagRoster> {
        Arc::new(
            TagRoster::try_from(vec![
                Tag::new("t1"),
                Tag::new("t2").under("t1"),
                Tag::new("t3").under("t1"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_flat_display() {
        let roster = flat_roster();
        let empty = TagField::from_value(&json!([]), roster.clone()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.to_string(), "");

        let mut f = TagField::from_value(&json!(["aa", "c c"]), roster).unwrap();
        assert!(f.contains("aa") && f.contains("c c") && !f.contains("2"));
        assert_eq!(f.to_string(), "Aa, c c");
        f.add("2").unwrap();
        assert_eq!(f.len(), 3);
        assert_eq!(f.to_string(), "2, aa, c c");
    }

    #[test]
    fn test_unknown_tag() {
        let err = TagField::from_value(&json!("zz"), flat_roster()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tagging error: Tag markup \"zz\" does not appear in roster."
        );
    }

    #[test]
    fn test_hierarchy_display() {
        let roster = hierarchy();
        let f = TagField::from_keys(Vec::<&str>::new(), roster.clone()).unwrap();
        assert_eq!((f.masters().len(), f.subordinates().len()), (0, 0));
        assert_eq!(f.to_string(), "");

        let f = TagField::from_keys(["t1"], roster.clone()).unwrap();
        assert_eq!((f.masters().len(), f.subordinates().len()), (0, 0));
        assert_eq!(f.to_string(), "T1");

        let f = TagField::from_keys(["t1", "t3"], roster.clone()).unwrap();
        assert_eq!((f.masters().len(), f.subordinates().len()), (1, 1));
        assert_eq!(f.to_string(), "T1 (t3)");

        let f = TagField::from_keys(["t3", "t2", "t1"], roster).unwrap();
        assert_eq!((f.masters().len(), f.subordinates().len()), (1, 2));
        assert_eq!(f.to_string(), "T1 (t2, t3)");
    }

    #[test]
    fn test_sorting_value_and_printing() {
        let roster = Arc::new(
            TagRoster::try_from(vec![
                Tag::new("beast"),
                Tag::new("spell").with_sorting_value(-1),
                Tag::new("fire").under("spell"),
                Tag::new("secret").hidden(),
            ])
            .unwrap(),
        );
        let f = TagField::from_keys(["beast", "fire", "spell", "secret"], roster).unwrap();
        assert_eq!(f.to_string(), "Spell (fire), Beast");
        assert_eq!(f.as_string(&f.semantic()), "Spell (fire), Beast");
    }

    #[test]
    fn test_safeguards() {
        let mut roster = TagRoster::new();
        roster.register(Tag::new("a").syntactic()).unwrap();
        assert!(roster.register(Tag::new("a")).is_err());
        let err = roster.register(Tag::new("b").under("a")).unwrap_err();
        assert!(err.to_string().contains("does not mix with its master, \"a\""));
        roster.register(Tag::new("b").syntactic().under("a")).unwrap();
        assert!(roster.register(Tag::new("c").under("nobody")).is_err());

        let err = TagField::from_keys(["b"], Arc::new(roster)).unwrap_err();
        assert!(err.to_string().contains("Tag \"b\" lacks master \"a\"."));
    }

    #[test]
    fn test_matches_name() {
        let roster = Arc::new(
            TagRoster::try_from(vec![Tag::new("fx").with_full_name("fire")]).unwrap(),
        );
        let f = TagField::from_keys(["fx"], roster).unwrap();
        assert!(f.matches_name("fx"));
        assert!(f.matches_name("fire"));
        assert!(!f.matches_name("ice"));
    }

    #[test]
    fn test_roster_deserialize() {
        let r: TagRoster = serde_json::from_str(
            r#"[{"key": "spell", "syntactic": true}, {"key": "fire", "syntactic": true, "subordinate_to": "spell"}]"#,
        )
        .unwrap();
        assert_eq!(r.len(), 2);
        assert!(r.is_hierarchical());
        assert!(serde_json::from_str::<TagRoster>(r#"[{"key": "a"}, {"key": "a"}]"#).is_err());
    }
}
