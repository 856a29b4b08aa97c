//! The game file: metadata, folders, tags, markup, wardrobes and card types.

use crate::error::CbgError;
use cbg_content::{CardType, ContentContext, Markup, PresenterKind, TagRoster, serialization};
use cbg_layout::Wardrobes;
use cbg_style::Wardrobe;
use cbg_style::samples::{arial_centred, card_frame};
use cbg_types::size::mini_euro_fonts;
use log::debug;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const FRAME_WARDROBE: &str = "frame";
pub const TEXT_WARDROBE: &str = "text";

/// Folders relative to the game file, unless absolute.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Folders {
    /// Deck specifications.
    pub specs: PathBuf,
    /// SVG output.
    pub svg: PathBuf,
    /// Raster images made for printing.
    pub printing: PathBuf,
}

impl Default for Folders {
    fn default() -> Self {
        Self {
            specs: PathBuf::from("specs"),
            svg: PathBuf::from("svg"),
            printing: PathBuf::from("printing"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub title: String,
    /// Used in output filenames. Defaults to the lowercase initials of the
    /// title.
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub folders: Folders,
    #[serde(default)]
    pub tags: TagRoster,
    #[serde(default)]
    pub markup: Vec<Markup>,
    #[serde(default)]
    pub wardrobes: BTreeMap<String, Wardrobe>,
    pub card_types: BTreeMap<String, CardType>,
    /// Deck file base names mapped to card type names.
    pub decks: BTreeMap<String, String>,
    /// Directory of the game file.
    #[serde(skip)]
    pub root: PathBuf,
}

/// Lowercase initials of each word.
pub fn initials(title: &str) -> String {
    title
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_lowercase)
        .collect()
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, CbgError> {
        debug!("Reading game file {}.", path.display());
        let mut game: GameConfig = serialization::load_as(path)?;
        game.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        game.finish()
    }

    /// Fill in defaults and check the result.
    pub fn finish(mut self) -> Result<Self, CbgError> {
        for (name, card_type) in &mut self.card_types {
            card_type.name = name.clone();
        }
        self.wardrobes
            .entry(FRAME_WARDROBE.to_string())
            .or_insert_with(card_frame);
        self.wardrobes
            .entry(TEXT_WARDROBE.to_string())
            .or_insert_with(|| arial_centred(mini_euro_fonts::BODY));
        if self.short_name.as_deref().is_none_or(str::is_empty) {
            self.short_name = Some(initials(&self.title));
        }
        self.validate()?;
        Ok(self)
    }

    /// Check references between the parts of the game.
    pub fn validate(&self) -> Result<(), CbgError> {
        for (deck, type_name) in &self.decks {
            if !self.card_types.contains_key(type_name) {
                return Err(CbgError::Config(format!(
                    "Deck \"{}\" refers to unknown card type \"{}\".",
                    deck, type_name
                )));
            }
        }
        for card_type in self.card_types.values() {
            self.validate_card_type(card_type)?;
        }
        Ok(())
    }

    fn validate_card_type(&self, card_type: &CardType) -> Result<(), CbgError> {
        let wardrobe = |name: &str| {
            self.wardrobes.get(name).ok_or_else(|| {
                CbgError::Config(format!(
                    "Card type \"{}\" refers to unknown wardrobe \"{}\".",
                    card_type.name, name
                ))
            })
        };
        wardrobe(&card_type.frame_wardrobe)?;
        wardrobe(&card_type.text_wardrobe)?;

        let mut keys = HashSet::new();
        for def in &card_type.fields {
            if !keys.insert(def.key.as_str()) {
                return Err(CbgError::Config(format!(
                    "Field \"{}\" appears twice in card type \"{}\".",
                    def.key, card_type.name
                )));
            }
            for presenter in [&def.front, &def.back] {
                if !presenter.accepts(def.content) {
                    return Err(CbgError::Config(format!(
                        "Field \"{}\" of card type \"{}\" holds {:?} content, which {:?} cannot draw.",
                        def.key, card_type.name, def.content, presenter
                    )));
                }
                let sets_text = !matches!(presenter, PresenterKind::None | PresenterKind::Grid { .. });
                if sets_text && !wardrobe(card_type.field_wardrobe(def))?.literate() {
                    return Err(CbgError::Config(format!(
                        "Field \"{}\" of card type \"{}\" needs a wardrobe with a font size.",
                        def.key, card_type.name
                    )));
                }
            }
            if let Some(name) = &def.wardrobe {
                wardrobe(name)?;
            }
        }
        Ok(())
    }

    pub fn short_name(&self) -> String {
        self.short_name
            .clone()
            .unwrap_or_else(|| initials(&self.title))
    }

    pub fn folder(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn specs_folder(&self) -> PathBuf {
        self.folder(&self.folders.specs)
    }

    pub fn svg_folder(&self) -> PathBuf {
        self.folder(&self.folders.svg)
    }

    pub fn printing_folder(&self) -> PathBuf {
        self.folder(&self.folders.printing)
    }

    pub fn context(&self) -> ContentContext {
        ContentContext {
            roster: Arc::new(self.tags.clone()),
            markup: Arc::new(self.markup.clone()),
        }
    }

    pub fn wardrobes(&self) -> Wardrobes {
        self.wardrobes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Shared card types, by name.
    pub fn card_types(&self) -> HashMap<String, Arc<CardType>> {
        self.card_types
            .iter()
            .map(|(k, v)| (k.clone(), Arc::new(v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbg_content::serialization::Format;

    const GAME: &str = r#"
title: Dungeon Crawl Deluxe
tags:
  - key: monster
  - key: undead
    subordinate_to: monster
card_types:
  monster:
    size: mini_euro
    fields:
      - key: title
        content: text
        front: text
      - key: tags
        content: tags
        front: {kind: tag_banner, from: bottom}
decks:
  monsters: monster
"#;

    fn parse(text: &str) -> Result<GameConfig, CbgError> {
        Format::Yaml.parse::<GameConfig>(text)?.finish()
    }

    #[test]
    fn test_defaults() {
        let game = parse(GAME).unwrap();
        assert_eq!(game.short_name(), "dcd");
        assert_eq!(game.folders, Folders::default());
        assert!(game.wardrobes.contains_key(FRAME_WARDROBE));
        assert!(game.wardrobes.contains_key(TEXT_WARDROBE));
        assert_eq!(game.card_types["monster"].name, "monster");
        assert_eq!(game.tags.len(), 2);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Dungeon Crawl Deluxe"), "dcd");
        assert_eq!(initials("  Über  alles "), "üa");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_folders_are_relative_to_game_file() {
        let mut game = parse(GAME).unwrap();
        game.root = PathBuf::from("/games/dcd");
        assert_eq!(game.svg_folder(), PathBuf::from("/games/dcd/svg"));
        game.folders.specs = PathBuf::from("/elsewhere");
        assert_eq!(game.specs_folder(), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_unknown_card_type() {
        let text = GAME.replace("monsters: monster", "monsters: spell");
        let err = parse(&text).unwrap_err();
        assert!(err.to_string().contains("unknown card type \"spell\""), "{}", err);
    }

    #[test]
    fn test_unknown_wardrobe() {
        let text = GAME.replace("size: mini_euro", "size: mini_euro\n    frame_wardrobe: gilded");
        let err = parse(&text).unwrap_err();
        assert!(err.to_string().contains("\"gilded\""), "{}", err);
    }

    #[test]
    fn test_presenter_must_fit_content() {
        let text = GAME.replace("front: {kind: tag_banner, from: bottom}", "front: table");
        assert!(matches!(parse(&text), Err(CbgError::Config(_))));
    }

    #[test]
    fn test_unknown_tag_master() {
        let text = GAME.replace("subordinate_to: monster", "subordinate_to: beast");
        assert!(matches!(parse(&text), Err(CbgError::Content(_))));
    }
}
