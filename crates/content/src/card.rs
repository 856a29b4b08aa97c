//! Card types and cards.
//!
//! A card type is a plan: an ordered list of field definitions, each with
//! a content kind and a choice of presenter for either side of the card.
//! Fields are populated in plan order, so a later field may depend on an
//! earlier one.

use crate::error::ContentError;
use crate::field::{Field, FieldContent, Table, TextField};
use crate::grid::AreaOfEffect;
use crate::markup::{InterpolationContext, Markup};
use crate::tag::{Tag, TagField, TagRoster};
use cbg_types::{CardSize, Corner};
use log::error;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const KEY_TITLE: &str = "title";
pub const KEY_TAGS: &str = "tags";

static UNTITLED: AtomicUsize = AtomicUsize::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Tags,
    AreaOfEffect,
    Table,
}

/// Which edge of the card a text cursor starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    #[default]
    Top,
    Bottom,
}

/// How a field is drawn on one side of a card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresenterKind {
    /// The field is not drawn on this side.
    #[default]
    None,
    /// Wrapped paragraphs. With a lead delimiter, the part of each
    /// paragraph before the first delimiter is set in bold.
    Text {
        #[serde(default)]
        from: Edge,
        #[serde(default)]
        lead_delimiter: Option<String>,
    },
    /// Tags on a colored band across the card.
    TagBanner {
        #[serde(default)]
        from: Edge,
    },
    /// Short text in a circle in one corner, such as a cost.
    Circle { corner: Corner },
    /// A map of square cells, optionally feathered at the edges.
    Grid {
        #[serde(default)]
        feather: Option<f64>,
    },
    Table {
        #[serde(default)]
        from: Edge,
    },
}

impl PresenterKind {
    pub fn is_none(&self) -> bool {
        matches!(self, PresenterKind::None)
    }

    /// True if this presenter can draw the given content.
    pub fn accepts(&self, content: ContentKind) -> bool {
        match self {
            PresenterKind::None => true,
            PresenterKind::Text { .. } | PresenterKind::Circle { .. } => {
                matches!(content, ContentKind::Text | ContentKind::Tags)
            }
            PresenterKind::TagBanner { .. } => content == ContentKind::Tags,
            PresenterKind::Grid { .. } => content == ContentKind::AreaOfEffect,
            PresenterKind::Table { .. } => content == ContentKind::Table,
        }
    }
}

fn deserialize_presenter<'de, D>(deserializer: D) -> Result<PresenterKind, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PresenterDef {
        Name(String),
        Full(PresenterKind),
    }

    match PresenterDef::deserialize(deserializer)? {
        PresenterDef::Full(p) => Ok(p),
        PresenterDef::Name(name) => {
            let tagged = serde_json::json!({ "kind": name });
            PresenterKind::deserialize(tagged).map_err(serde::de::Error::custom)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDef {
    pub key: String,
    pub content: ContentKind,
    #[serde(default, deserialize_with = "deserialize_presenter")]
    pub front: PresenterKind,
    #[serde(default, deserialize_with = "deserialize_presenter")]
    pub back: PresenterKind,
    /// Wardrobe name; the card type's text wardrobe when absent.
    #[serde(default)]
    pub wardrobe: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl FieldDef {
    pub fn new(key: impl Into<String>, content: ContentKind) -> Self {
        Self {
            key: key.into(),
            content,
            front: PresenterKind::None,
            back: PresenterKind::None,
            wardrobe: None,
            required: false,
        }
    }

    pub fn front(mut self, presenter: PresenterKind) -> Self {
        self.front = presenter;
        self
    }

    pub fn back(mut self, presenter: PresenterKind) -> Self {
        self.back = presenter;
        self
    }

    pub fn wardrobe(mut self, name: impl Into<String>) -> Self {
        self.wardrobe = Some(name.into());
        self
    }

    fn empty_content(&self, roster: &Arc<TagRoster>) -> FieldContent {
        match self.content {
            ContentKind::Text => FieldContent::Text(TextField::default()),
            ContentKind::Tags => FieldContent::Tags(TagField::empty(roster.clone())),
            ContentKind::AreaOfEffect => FieldContent::AreaOfEffect(AreaOfEffect::default()),
            ContentKind::Table => FieldContent::Table(Table::default()),
        }
    }

    fn fill(&self, value: &Value, roster: &Arc<TagRoster>) -> Result<FieldContent, ContentError> {
        Ok(match self.content {
            ContentKind::Text => FieldContent::Text(TextField::from_value(value)?),
            ContentKind::Tags => FieldContent::Tags(TagField::from_value(value, roster.clone())?),
            ContentKind::AreaOfEffect => FieldContent::AreaOfEffect(AreaOfEffect::from_value(value)?),
            ContentKind::Table => FieldContent::Table(Table::from_value(value)?),
        })
    }
}

fn default_frame() -> String {
    "frame".to_string()
}

fn default_text() -> String {
    "text".to_string()
}

/// A kind of card: its size, wardrobes and field plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardType {
    #[serde(default)]
    pub name: String,
    pub size: CardSize,
    /// Wardrobe for the card's frame and background.
    #[serde(default = "default_frame")]
    pub frame_wardrobe: String,
    /// Default wardrobe for fields.
    #[serde(default = "default_text")]
    pub text_wardrobe: String,
    pub fields: Vec<FieldDef>,
}

impl CardType {
    pub fn new(name: impl Into<String>, size: CardSize, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            size,
            frame_wardrobe: default_frame(),
            text_wardrobe: default_text(),
            fields,
        }
    }

    pub fn has_front(&self) -> bool {
        self.fields.iter().any(|f| !f.front.is_none())
    }

    pub fn has_back(&self) -> bool {
        self.fields.iter().any(|f| !f.back.is_none())
    }

    pub fn field_wardrobe<'a>(&'a self, def: &'a FieldDef) -> &'a str {
        def.wardrobe.as_deref().unwrap_or(&self.text_wardrobe)
    }
}

/// Game-wide context needed to interpret card specifications.
#[derive(Debug, Clone, Default)]
pub struct ContentContext {
    pub roster: Arc<TagRoster>,
    pub markup: Arc<Vec<Markup>>,
}

/// The content of a single playing card. Copy counts live in the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub deck: String,
    pub fields: Vec<Field>,
    pub card_type: Arc<CardType>,
}

impl Card {
    /// Builds a card from its data map, following the card type's plan.
    pub fn from_spec(
        spec: Value,
        card_type: Arc<CardType>,
        deck: &str,
        context: &ContentContext,
    ) -> Result<Card, ContentError> {
        let mut data = match spec {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(ContentError::spec("Empty card specification.")),
        };
        let mut card = Card {
            title: format!("untitled card {}", UNTITLED.fetch_add(1, Ordering::Relaxed)),
            deck: deck.to_string(),
            fields: Vec::new(),
            card_type,
        };
        card.process(&mut data, context).inspect_err(|_| {
            error!("An error occurred while processing \"{}\".", card.title);
        })?;
        Ok(card)
    }

    fn process(
        &mut self,
        data: &mut Map<String, Value>,
        context: &ContentContext,
    ) -> Result<(), ContentError> {
        let plan = Arc::clone(&self.card_type);
        for (index, def) in plan.fields.iter().enumerate() {
            let content = match data.shift_remove(&def.key) {
                Some(value) => def.fill(&value, &context.roster)?,
                None if def.required => {
                    return Err(ContentError::spec(format!(
                        "Missing field in data spec for card \"{}\": \"{}\".",
                        self.title, def.key
                    )));
                }
                None => def.empty_content(&context.roster),
            };
            if def.key == KEY_TITLE {
                if let FieldContent::Text(t) = &content {
                    if let Some(first) = t.first() {
                        self.title = first.to_string();
                    }
                }
            }
            self.fields.push(Field {
                key: def.key.clone(),
                index,
                content,
            });
        }

        if let Some((key, value)) = data.iter().next() {
            return Err(ContentError::spec(format!(
                "Unrecognized field in data spec for card \"{}\": \"{}: {}\".",
                self.title, key, value
            )));
        }

        self.apply_markup(&context.markup)
    }

    fn apply_markup(&mut self, markup: &[Markup]) -> Result<(), ContentError> {
        if markup.is_empty() {
            return Ok(());
        }
        for field in &mut self.fields {
            if let FieldContent::Text(t) = &mut field.content {
                t.apply_markup(markup, None)?;
            }
        }
        let interpolation = InterpolationContext {
            title: self.title.clone(),
            deck: self.deck.clone(),
            fields: self
                .fields
                .iter()
                .map(|f| (f.key.clone(), f.content.to_string()))
                .collect(),
        };
        for field in &mut self.fields {
            if let FieldContent::Text(t) = &mut field.content {
                t.apply_markup(markup, Some(&interpolation))?;
            }
        }
        Ok(())
    }

    pub fn sorting_key(&self) -> (&str, &str) {
        (&self.deck, &self.title)
    }

    pub fn field(&self, key: &str) -> Result<&Field, ContentError> {
        self.fields.iter().find(|f| f.key == key).ok_or_else(|| {
            ContentError::spec(format!("No such field on card {}: {}.", self.title, key))
        })
    }

    pub fn field_def(&self, field: &Field) -> Option<&FieldDef> {
        self.card_type.fields.get(field.index)
    }

    /// The card's tags, or nothing if it has no tag field.
    pub fn tags(&self) -> Vec<&Tag> {
        match self.field(KEY_TAGS).map(|f| &f.content) {
            Ok(FieldContent::Tags(t)) => t.iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_tag_named(&self, name: &str) -> bool {
        match self.field(KEY_TAGS).map(|f| &f.content) {
            Ok(FieldContent::Tags(t)) => t.matches_name(name),
            _ => false,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}
