use crate::presenter::Wardrobes;
use cbg_content::{Card, CardType, ContentContext, ContentKind, Edge, FieldDef, PresenterKind};
use cbg_style::Wardrobe;
use cbg_style::samples::{arial_centred, card_frame};
use cbg_types::size::{MINI_EURO, mini_euro_fonts};
use cbg_types::{CardSize, Corner};
use serde_json::json;
use std::sync::Arc;

pub fn mini() -> CardSize {
    MINI_EURO
}

pub fn body_wardrobe() -> Wardrobe {
    arial_centred(mini_euro_fonts::BODY)
}

pub fn wardrobes() -> Wardrobes {
    Wardrobes::from([
        ("frame".to_string(), card_frame()),
        ("text".to_string(), body_wardrobe()),
    ])
}

fn top_text() -> PresenterKind {
    PresenterKind::Text {
        from: Edge::Top,
        lead_delimiter: None,
    }
}

/// A mini euro monster type: title on both sides, everything else in front.
pub fn monster_type() -> Arc<CardType> {
    Arc::new(CardType::new(
        "monster",
        MINI_EURO,
        vec![
            FieldDef::new("title", ContentKind::Text)
                .front(top_text())
                .back(top_text()),
            FieldDef::new("tags", ContentKind::Tags)
                .front(PresenterKind::TagBanner { from: Edge::Bottom }),
            FieldDef::new("body", ContentKind::Text).front(PresenterKind::Text {
                from: Edge::Bottom,
                lead_delimiter: Some(":".to_string()),
            }),
            FieldDef::new("cost", ContentKind::Text).front(PresenterKind::Circle {
                corner: Corner::UpperRight,
            }),
        ],
    ))
}

pub fn card(title: &str) -> Card {
    Card::from_spec(
        json!({ "title": title }),
        monster_type(),
        "Monsters",
        &ContentContext::default(),
    )
    .unwrap()
}

pub fn cards(n: usize) -> Vec<Card> {
    (0..n).map(|i| card(&format!("Goblin {}", i))).collect()
}
