//! Command-line restrictions on which cards, and how many copies, to draw.

use crate::card::Card;
use crate::error::ContentError;
use cbg_style::parsers::parse_restriction;
use regex::Regex;

const TAG_PREFIX: &str = "tag=";

#[derive(Debug, Clone)]
pub enum Matcher {
    /// A tag key or full name.
    Tag(String),
    /// A regular expression searched for in the card title.
    Title(Regex),
}

/// One `[N:]pattern` restriction. Without a count, a match leaves the copy
/// count unchanged on a whitelist and sets it to zero on a blacklist.
#[derive(Debug, Clone)]
pub struct Restriction {
    pub count: Option<usize>,
    pub matcher: Matcher,
}

impl Restriction {
    pub fn parse(input: &str) -> Result<Self, ContentError> {
        let (count, pattern) = parse_restriction(input)?;
        let matcher = match pattern.strip_prefix(TAG_PREFIX) {
            Some(tag) => Matcher::Tag(tag.to_string()),
            None => Matcher::Title(Regex::new(&pattern)?),
        };
        Ok(Self { count, matcher })
    }

    pub fn matches(&self, card: &Card) -> bool {
        match &self.matcher {
            Matcher::Tag(name) => card.has_tag_named(name),
            Matcher::Title(re) => re.is_match(&card.title),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub whitelist: Vec<Restriction>,
    pub blacklist: Vec<Restriction>,
    /// At most one copy of each card.
    pub card_max1: bool,
    /// At most one card per deck.
    pub deck_max1: bool,
}

impl Selection {
    pub fn new<S: AsRef<str>>(
        whitelist: &[S],
        blacklist: &[S],
        card_max1: bool,
        deck_max1: bool,
    ) -> Result<Self, ContentError> {
        let parse = |list: &[S]| {
            list.iter()
                .map(|s| Restriction::parse(s.as_ref()))
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            whitelist: parse(whitelist)?,
            blacklist: parse(blacklist)?,
            card_max1,
            deck_max1,
        })
    }

    pub fn is_noop(&self) -> bool {
        self.whitelist.is_empty() && self.blacklist.is_empty() && !self.card_max1 && !self.deck_max1
    }

    /// Applies the selection to cards in order, updating their counts.
    pub fn apply<'a, I>(&self, cards: I)
    where
        I: IntoIterator<Item = (&'a Card, &'a mut usize)>,
    {
        let mut deck_slot_taken = false;
        for (card, count) in cards {
            let mut whitelisted = false;
            if let Some(r) = self.whitelist.iter().find(|r| r.matches(card)) {
                whitelisted = true;
                if let Some(n) = r.count {
                    *count = n;
                }
            }
            if !self.whitelist.is_empty() && !whitelisted {
                *count = 0;
            }

            if let Some(r) = self.blacklist.iter().find(|r| r.matches(card)) {
                *count = r.count.unwrap_or(0);
            }

            if *count > 0 {
                if self.card_max1 {
                    *count = 1;
                }
                if self.deck_max1 {
                    *count = if deck_slot_taken { 0 } else { 1 };
                    deck_slot_taken = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardType, ContentContext, ContentKind, FieldDef};
    use crate::tag::{Tag, TagRoster};
    use cbg_types::size::MINI_EURO;
    use serde_json::json;
    use std::sync::Arc;

    fn cards() -> Vec<Card> {
        let card_type = Arc::new(CardType::new(
            "t",
            MINI_EURO,
            vec![
                FieldDef::new("title", ContentKind::Text),
                FieldDef::new("tags", ContentKind::Tags),
            ],
        ));
        let ctx = ContentContext {
            roster: Arc::new(
                TagRoster::try_from(vec![Tag::new("fire").with_full_name("Fire magic")]).unwrap(),
            ),
            ..Default::default()
        };
        ["Fireball", "Frost", "Firewall"]
            .iter()
            .map(|t| {
                let tags = if t.starts_with("Fire") { json!(["fire"]) } else { json!([]) };
                Card::from_spec(json!({"title": t, "tags": tags}), card_type.clone(), "d", &ctx)
                    .unwrap()
            })
            .collect()
    }

    fn run(selection: &Selection, counts: &[usize]) -> Vec<usize> {
        let cards = cards();
        let mut counts = counts.to_vec();
        selection.apply(cards.iter().zip(counts.iter_mut()));
        counts
    }

    fn sel(white: &[&str], black: &[&str], card_max1: bool, deck_max1: bool) -> Selection {
        Selection::new(white, black, card_max1, deck_max1).unwrap()
    }

    #[test]
    fn test_no_restrictions() {
        let s = sel(&[], &[], false, false);
        assert!(s.is_noop());
        assert_eq!(run(&s, &[2, 3, 1]), vec![2, 3, 1]);
    }

    #[test]
    fn test_whitelist() {
        assert_eq!(run(&sel(&["^Fire"], &[], false, false), &[2, 3, 1]), vec![2, 0, 1]);
        assert_eq!(run(&sel(&["5:ball", "wall"], &[], false, false), &[2, 3, 1]), vec![5, 0, 1]);
    }

    #[test]
    fn test_blacklist() {
        assert_eq!(run(&sel(&[], &["ball"], false, false), &[2, 3, 1]), vec![0, 3, 1]);
        assert_eq!(run(&sel(&[], &["1:^F"], false, false), &[2, 3, 1]), vec![1, 1, 1]);
    }

    #[test]
    fn test_tag_restriction() {
        assert_eq!(run(&sel(&["tag=fire"], &[], false, false), &[2, 3, 1]), vec![2, 0, 1]);
        assert_eq!(run(&sel(&[], &["tag=Fire magic"], false, false), &[2, 3, 1]), vec![0, 3, 0]);
    }

    #[test]
    fn test_maxima() {
        assert_eq!(run(&sel(&[], &[], true, false), &[2, 3, 0]), vec![1, 1, 0]);
        assert_eq!(run(&sel(&[], &[], false, true), &[0, 3, 2]), vec![0, 1, 0]);
    }

    #[test]
    fn test_bad_pattern() {
        assert!(Selection::new(&["("], &[], false, false).is_err());
        assert!(Selection::new(&["2:"], &[], false, false).is_err());
    }
}
