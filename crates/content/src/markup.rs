//! Shorthand markup: short tokens in specification text expanded into
//! richer text before layout.
//!
//! A token such as `_gold:3_` is written between a lead-in and a lead-out,
//! with optional parameters after a separator.

use crate::error::ContentError;
use log::error;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

fn default_lead() -> String {
    "_".to_string()
}

fn default_separator() -> String {
    ":".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shorthand {
    pub token: String,
    pub replacement: String,
    #[serde(default = "default_lead")]
    pub lead_in: String,
    #[serde(default = "default_lead")]
    pub lead_out: String,
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Shorthand {
    pub fn new(token: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            replacement: replacement.into(),
            lead_in: default_lead(),
            lead_out: default_lead(),
            separator: default_separator(),
        }
    }

    pub fn with_delimiters(mut self, lead_in: &str, lead_out: &str, separator: &str) -> Self {
        self.lead_in = lead_in.to_string();
        self.lead_out = lead_out.to_string();
        self.separator = separator.to_string();
        self
    }

    pub fn pattern(&self) -> Result<Regex, ContentError> {
        let sep = regex::escape(&self.separator);
        let out = regex::escape(&self.lead_out);
        Ok(Regex::new(&format!(
            "{}{}(|{}|{}[^{}]*){}",
            regex::escape(&self.lead_in),
            regex::escape(&self.token),
            sep,
            sep,
            out,
            out
        ))?)
    }

    fn parameters<'t>(&self, caps: &Captures<'t>) -> Vec<&'t str> {
        let block = caps
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or("")
            .trim_start_matches(self.separator.as_str());
        if block.is_empty() {
            Vec::new()
        } else {
            block.split(self.separator.as_str()).collect()
        }
    }

    fn substitute(&self, parameters: &[&str]) -> Result<String, ContentError> {
        if parameters.is_empty() {
            return Ok(self.replacement.clone());
        }
        // A one-character symbol may take an amount as a prefix.
        if self.replacement.chars().count() == 1 && parameters.len() == 1 {
            return Ok(format!("{}{}", parameters[0], self.replacement));
        }
        fill_placeholders(&self.replacement, parameters).ok_or_else(|| {
            error!(
                "Failed to place token parameters {:?} in \"{}\".",
                parameters, self.replacement
            );
            ContentError::Markup(format!(
                "Token {} cannot take parameters {:?}.",
                self, parameters
            ))
        })
    }

    /// Rewrites `text` in place. Returns whether anything changed.
    pub fn apply_to(&self, text: &mut String) -> Result<bool, ContentError> {
        let pattern = self.pattern()?;
        replace_all(&pattern, text, |caps| self.substitute(&self.parameters(caps)))
    }
}

impl fmt::Display for Shorthand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lead_in, self.token, self.lead_out)
    }
}

/// Fills `%s` placeholders in order. `None` on a count mismatch.
fn fill_placeholders(template: &str, parameters: &[&str]) -> Option<String> {
    let pieces: Vec<&str> = template.split("%s").collect();
    if pieces.len() != parameters.len() + 1 {
        return None;
    }
    let mut out = String::from(pieces[0]);
    for (param, piece) in parameters.iter().zip(&pieces[1..]) {
        out.push_str(param);
        out.push_str(piece);
    }
    Some(out)
}

fn replace_all<F>(pattern: &Regex, text: &mut String, mut f: F) -> Result<bool, ContentError>
where
    F: FnMut(&Captures) -> Result<String, ContentError>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in pattern.captures_iter(text) {
        if let Some(m) = caps.get(0) {
            out.push_str(&text[last..m.start()]);
            out.push_str(&f(&caps)?);
            last = m.end();
        }
    }
    out.push_str(&text[last..]);
    if out == *text {
        return Ok(false);
    }
    *text = out;
    Ok(true)
}

/// What an interpolation can see of the card being built.
#[derive(Debug, Clone, Default)]
pub struct InterpolationContext {
    pub title: String,
    pub deck: String,
    pub fields: HashMap<String, String>,
}

/// A shorthand whose replacement is computed from the surrounding card.
///
/// The template may refer to `{title}`, `{deck}` and `{field:KEY}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interpolation {
    pub token: String,
    #[serde(rename = "interpolate")]
    pub template: String,
    #[serde(default = "default_lead")]
    pub lead_in: String,
    #[serde(default = "default_lead")]
    pub lead_out: String,
}

impl Interpolation {
    pub fn new(token: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            template: template.into(),
            lead_in: default_lead(),
            lead_out: default_lead(),
        }
    }

    fn render(&self, context: &InterpolationContext) -> Result<String, ContentError> {
        let placeholder = Regex::new(r"\{(title|deck|field:([^}]+))\}")?;
        let mut rendered = self.template.clone();
        replace_all(&placeholder, &mut rendered, |caps| {
            match (caps.get(1).map(|m| m.as_str()), caps.get(2)) {
                (_, Some(key)) => context.fields.get(key.as_str()).cloned().ok_or_else(|| {
                    error!("Unable to interpolate from shorthand.");
                    ContentError::Markup(format!(
                        "No field \"{}\" to interpolate into {}{}{}.",
                        key.as_str(),
                        self.lead_in,
                        self.token,
                        self.lead_out
                    ))
                }),
                (Some("title"), None) => Ok(context.title.clone()),
                _ => Ok(context.deck.clone()),
            }
        })?;
        Ok(rendered)
    }

    pub fn apply_to(
        &self,
        text: &mut String,
        context: &InterpolationContext,
    ) -> Result<bool, ContentError> {
        let pattern = Regex::new(&format!(
            "{}{}{}",
            regex::escape(&self.lead_in),
            regex::escape(&self.token),
            regex::escape(&self.lead_out)
        ))?;
        if !pattern.is_match(text) {
            return Ok(false);
        }
        let replacement = self.render(context)?;
        replace_all(&pattern, text, |_| Ok(replacement.clone()))
    }
}

/// One entry in a game's markup list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Markup {
    Shorthand(Shorthand),
    Interpolation(Interpolation),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(s: &Shorthand, text: &str) -> (bool, String) {
        let mut t = text.to_string();
        let changed = s.apply_to(&mut t).unwrap();
        (changed, t)
    }

    #[test]
    fn test_plain_token() {
        let s = Shorthand::new("gold", "₲");
        assert_eq!(applied(&s, "Gain _gold_."), (true, "Gain ₲.".to_string()));
        assert_eq!(applied(&s, "Gain gold."), (false, "Gain gold.".to_string()));
        assert_eq!(s.to_string(), "_gold_");
    }

    #[test]
    fn test_single_character_takes_prefix() {
        let s = Shorthand::new("gold", "₲");
        assert_eq!(applied(&s, "Gain _gold:3_."), (true, "Gain 3₲.".to_string()));
        // A bare separator means no parameters.
        assert_eq!(applied(&s, "_gold:_"), (true, "₲".to_string()));
    }

    #[test]
    fn test_placeholders() {
        let s = Shorthand::new("range", "%s to %s squares");
        assert_eq!(
            applied(&s, "Range _range:2:4_, twice _range:1:1_."),
            (true, "Range 2 to 4 squares, twice 1 to 1 squares.".to_string())
        );
        let mut t = "_range:2_".to_string();
        assert!(matches!(s.apply_to(&mut t), Err(ContentError::Markup(_))));
        assert_eq!(t, "_range:2_");
    }

    #[test]
    fn test_custom_delimiters() {
        let s = Shorthand::new("x", "[%s]").with_delimiters("{", "}", "|");
        assert_eq!(applied(&s, "a {x|b} c"), (true, "a [b] c".to_string()));
    }

    #[test]
    fn test_interpolation() {
        let i = Interpolation::new("self", "{title} ({field:cost})");
        let mut ctx = InterpolationContext {
            title: "Orc".to_string(),
            deck: "Monsters".to_string(),
            ..Default::default()
        };
        ctx.fields.insert("cost".to_string(), "3".to_string());
        let mut t = "Discard _self_.".to_string();
        assert!(i.apply_to(&mut t, &ctx).unwrap());
        assert_eq!(t, "Discard Orc (3).");

        let missing = Interpolation::new("x", "{field:nope}");
        let mut t = "_x_".to_string();
        assert!(missing.apply_to(&mut t, &ctx).is_err());
    }

    #[test]
    fn test_markup_deserialize() {
        let list: Vec<Markup> = serde_json::from_str(
            r#"[{"token": "gold", "replacement": "G"}, {"token": "me", "interpolate": "{deck}"}]"#,
        )
        .unwrap();
        assert!(matches!(list[0], Markup::Shorthand(_)));
        assert!(matches!(list[1], Markup::Interpolation(_)));
    }
}
