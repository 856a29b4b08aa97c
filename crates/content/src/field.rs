use crate::error::ContentError;
use crate::grid::AreaOfEffect;
use crate::markup::{InterpolationContext, Markup};
use crate::tag::{TagField, scalar_string};
use serde_json::Value;
use std::fmt;

/// One paragraph of text, keeping the raw value it was made from.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub raw: Value,
    pub string: String,
}

impl Paragraph {
    pub fn new(raw: Value) -> Result<Self, ContentError> {
        let string = scalar_string(&raw)?;
        Ok(Self { raw, string })
    }
}

impl From<&str> for Paragraph {
    fn from(s: &str) -> Self {
        Self {
            raw: Value::String(s.to_string()),
            string: s.to_string(),
        }
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

/// Zero or more paragraphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    pub paragraphs: Vec<Paragraph>,
}

impl TextField {
    /// A scalar becomes one paragraph, a list becomes several.
    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        let paragraphs = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .iter()
                .cloned()
                .map(Paragraph::new)
                .collect::<Result<_, _>>()?,
            other => vec![Paragraph::new(other.clone())?],
        };
        Ok(Self { paragraphs })
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.paragraphs.first().map(|p| p.string.as_str())
    }

    pub fn apply_markup(
        &mut self,
        markup: &[Markup],
        context: Option<&InterpolationContext>,
    ) -> Result<(), ContentError> {
        for p in &mut self.paragraphs {
            for m in markup {
                match (m, context) {
                    (Markup::Shorthand(s), _) => {
                        s.apply_to(&mut p.string)?;
                    }
                    (Markup::Interpolation(i), Some(ctx)) => {
                        i.apply_to(&mut p.string, ctx)?;
                    }
                    (Markup::Interpolation(_), None) => {}
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for p in &self.paragraphs {
            if !first {
                f.write_str("\n  ")?;
            }
            first = false;
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

/// Rows of string cells, all of the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        let rows = match value {
            Value::Null => Vec::new(),
            Value::Array(rows) => rows
                .iter()
                .map(|row| match row {
                    Value::Array(cells) => cells.iter().map(scalar_string).collect(),
                    other => Ok(vec![scalar_string(other)?]),
                })
                .collect::<Result<Vec<Vec<String>>, _>>()?,
            other => {
                return Err(ContentError::spec(format!(
                    "A table must be a list of rows, found {}.",
                    other
                )));
            }
        };
        if let Some(first) = rows.first() {
            if rows.iter().any(|r| r.len() != first.len()) {
                return Err(ContentError::spec("Table rows differ in length."));
            }
        }
        Ok(Self { rows })
    }

    pub fn n_columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.rows.iter().map(|r| r.join(" | ")).collect();
        f.write_str(&lines.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldContent {
    Text(TextField),
    Tags(TagField),
    AreaOfEffect(AreaOfEffect),
    Table(Table),
}

impl FieldContent {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldContent::Text(t) => t.is_empty(),
            FieldContent::Tags(t) => t.is_empty(),
            FieldContent::AreaOfEffect(m) => m.is_empty(),
            FieldContent::Table(t) => t.is_empty(),
        }
    }
}

impl fmt::Display for FieldContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldContent::Text(t) => t.fmt(f),
            FieldContent::Tags(t) => t.fmt(f),
            FieldContent::AreaOfEffect(m) => m.fmt(f),
            FieldContent::Table(t) => t.fmt(f),
        }
    }
}

/// A populated field on a card. `index` points into the card type's plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub index: usize,
    pub content: FieldContent,
}
