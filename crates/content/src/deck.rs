use crate::card::{Card, CardType, ContentContext, KEY_TITLE};
use crate::error::ContentError;
use crate::selection::Selection;
use crate::serialization;
use log::debug;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

const KEY_METADATA: &str = "metadata";
const KEY_DATA: &str = "data";
const KEY_COPIES: &str = "copies";
const KEY_DEFAULTS: &str = "defaults";

/// A card with its number of copies in the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckEntry {
    pub card: Card,
    pub copies: usize,
}

/// The right number of copies of every card that belongs in a deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub title: String,
    pub card_type: Arc<CardType>,
    entries: Vec<DeckEntry>,
}

impl Deck {
    /// Reads `<dir>/<base>.<ext>` for the first supported extension found.
    pub fn from_file(
        dir: &Path,
        base: &str,
        card_type: Arc<CardType>,
        context: &ContentContext,
    ) -> Result<Deck, ContentError> {
        let path = serialization::find_deck(dir, base)?;
        let raw = serialization::load(&path)?;
        Deck::from_value(raw, base, card_type, context)
    }

    pub fn from_value(
        raw: Value,
        base: &str,
        card_type: Arc<CardType>,
        context: &ContentContext,
    ) -> Result<Deck, ContentError> {
        let (metadata, card_specs) = match raw {
            Value::Object(mut map) => {
                let metadata = match map.shift_remove(KEY_METADATA) {
                    Some(Value::Object(m)) => m,
                    _ => Map::new(),
                };
                let specs = map.shift_remove(KEY_DATA).unwrap_or(Value::Object(map));
                (metadata, specs)
            }
            Value::Array(items) => (Map::new(), Value::Array(items)),
            _ => {
                return Err(ContentError::spec(format!(
                    "Cannot interpret {} as a deck specification.",
                    base
                )));
            }
        };

        let title = metadata
            .get(KEY_TITLE)
            .and_then(Value::as_str)
            .unwrap_or(base)
            .to_string();
        let mut deck = Deck {
            title,
            card_type,
            entries: Vec::new(),
        };
        deck.populate(card_specs, &metadata, context)?;
        debug!("{} unique card(s) in {} deck.", deck.entries.len(), deck);
        Ok(deck)
    }

    fn populate(
        &mut self,
        card_specs: Value,
        metadata: &Map<String, Value>,
        context: &ContentContext,
    ) -> Result<(), ContentError> {
        let specs: Vec<(Option<String>, Value)> = match card_specs {
            Value::Object(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
            Value::Array(items) => items.into_iter().map(|v| (None, v)).collect(),
            _ => Vec::new(),
        };
        if specs.is_empty() {
            return Err(ContentError::spec("No cards."));
        }
        let defaults = metadata.get(KEY_DEFAULTS);
        for (backup_title, spec) in specs {
            self.add_card(spec, backup_title, defaults, context)?;
        }
        Ok(())
    }

    fn add_card(
        &mut self,
        spec: Value,
        backup_title: Option<String>,
        defaults: Option<&Value>,
        context: &ContentContext,
    ) -> Result<(), ContentError> {
        let mut spec = match spec {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(ContentError::spec(format!(
                    "Cannot interpret {} as a card specification.",
                    other
                )));
            }
        };
        let card_metadata = spec.shift_remove(KEY_METADATA);
        let mut data = match spec.shift_remove(KEY_DATA) {
            Some(Value::Object(d)) => d,
            Some(Value::Null) => Map::new(),
            Some(other) => {
                return Err(ContentError::spec(format!(
                    "Cannot interpret {} as card data.",
                    other
                )));
            }
            None => spec,
        };

        if let Some(title) = backup_title {
            if !data.contains_key(KEY_TITLE) {
                data.insert(KEY_TITLE.to_string(), Value::String(title));
            }
        }

        let copies = copies_in(card_metadata.as_ref())
            .or_else(|| copies_in(defaults))
            .or_else(|| {
                data.shift_remove(KEY_COPIES)
                    .and_then(|v| v.as_u64())
                    .inspect(|_| debug!("Pulled number of copies from data section of specs."))
            })
            .unwrap_or(1) as usize;

        let card = Card::from_spec(Value::Object(data), self.card_type.clone(), &self.title, context)?;
        self.entries.push(DeckEntry { card, copies });
        Ok(())
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_copies(&self) -> usize {
        self.entries.iter().map(|e| e.copies).sum()
    }

    fn sorted_entries(&self) -> Vec<&DeckEntry> {
        let mut entries: Vec<&DeckEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.card.sorting_key().cmp(&b.card.sorting_key()));
        entries
    }

    pub fn singles_sorted(&self) -> Vec<&Card> {
        self.sorted_entries().into_iter().map(|e| &e.card).collect()
    }

    /// Every copy of every card, in order.
    pub fn all_sorted(&self) -> Vec<Card> {
        self.sorted_entries()
            .into_iter()
            .flat_map(|e| std::iter::repeat_n(e.card.clone(), e.copies))
            .collect()
    }

    pub fn control_selection(&mut self, selection: &Selection) {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            self.entries[a]
                .card
                .sorting_key()
                .cmp(&self.entries[b].card.sorting_key())
        });
        let mut counts: Vec<usize> = order.iter().map(|&i| self.entries[i].copies).collect();
        let cards: Vec<&Card> = order.iter().map(|&i| &self.entries[i].card).collect();
        selection.apply(cards.into_iter().zip(counts.iter_mut()));
        for (&i, n) in order.iter().zip(counts) {
            self.entries[i].copies = n;
        }
    }
}

fn copies_in(map: Option<&Value>) -> Option<u64> {
    map?.get(KEY_COPIES)?.as_u64()
}

impl PartialOrd for Deck {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.title.cmp(&other.title))
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{ContentKind, FieldDef};
    use cbg_types::size::MINI_EURO;
    use serde_json::json;

    fn card_type() -> Arc<CardType> {
        Arc::new(CardType::new(
            "plain",
            MINI_EURO,
            vec![
                FieldDef::new("title", ContentKind::Text),
                FieldDef::new("body", ContentKind::Text),
            ],
        ))
    }

    fn deck(raw: Value) -> Result<Deck, ContentError> {
        Deck::from_value(raw, "basic", card_type(), &ContentContext::default())
    }

    #[test]
    fn test_copies_precedence() {
        let d = deck(json!({
            "metadata": {"defaults": {"copies": 2}},
            "Third": {"data": {}, "metadata": {}},
            "First": {"data": {}, "metadata": {"copies": 3}},
            "Second": {"data": {}, "metadata": {"copies": 1}}
        }))
        .unwrap();
        let titles: Vec<&str> = d.singles_sorted().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        let all: Vec<String> = d.all_sorted().into_iter().map(|c| c.title).collect();
        assert_eq!(all, vec!["First", "First", "First", "Second", "Third", "Third"]);
        assert_eq!(d.title, "basic");
    }

    #[test]
    fn test_copies_in_data() {
        let d = deck(json!([{"title": "A", "copies": 4}, {"title": "B"}])).unwrap();
        assert_eq!(d.total_copies(), 5);
        assert!(d.entries()[0].card.field("body").is_ok());
    }

    #[test]
    fn test_data_section_and_title() {
        let d = deck(json!({
            "metadata": {"title": "Spells"},
            "data": {"Zap": {"body": "Ouch."}}
        }))
        .unwrap();
        assert_eq!(d.title, "Spells");
        assert_eq!(d.entries()[0].card.title, "Zap");
        assert_eq!(d.entries()[0].card.deck, "Spells");
    }

    #[test]
    fn test_bad_decks() {
        assert_eq!(
            deck(json!("cards")).unwrap_err().to_string(),
            "Specification error: Cannot interpret basic as a deck specification."
        );
        assert_eq!(
            deck(json!({"metadata": {}})).unwrap_err().to_string(),
            "Specification error: No cards."
        );
        assert_eq!(deck(json!([])).unwrap_err().to_string(), "Specification error: No cards.");
    }

    #[test]
    fn test_selection() {
        let mut d = deck(json!({"B": {"copies": 2}, "A": {"copies": 3}, "C": {}})).unwrap();
        d.control_selection(&Selection::new(&["^[AB]$"], &[], false, true).unwrap());
        let counts: Vec<(String, usize)> = d
            .entries()
            .iter()
            .map(|e| (e.card.title.clone(), e.copies))
            .collect();
        assert_eq!(
            counts,
            vec![("B".to_string(), 0), ("A".to_string(), 1), ("C".to_string(), 0)]
        );
    }

    #[test]
    fn test_deck_ordering() {
        let a = Deck::from_value(json!(["x"]), "a", card_type(), &ContentContext::default());
        assert!(a.is_err());
        let a = deck(json!([{"title": "x"}])).unwrap();
        let mut b = a.clone();
        b.title = "zeta".to_string();
        assert!(a < b);
    }
}
