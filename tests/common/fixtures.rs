use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small game with monster and spell cards.
pub fn game() -> Value {
    json!({
        "title": "Dungeon Crawl Deluxe",
        "tags": [
            {"key": "beast"},
            {"key": "undead", "full_name": "Undead Horror"},
            {"key": "fire", "syntactic": true}
        ],
        "markup": [
            {"token": "gold", "replacement": "₲"}
        ],
        "wardrobes": {
            "title": {
                "font_size": 4.0,
                "modes": {
                    "main": {"font": "Arial", "fill": "#000000", "anchor": "middle", "weight": "bold"}
                }
            }
        },
        "card_types": {
            "monster": {
                "size": "mini_euro",
                "fields": [
                    {"key": "title", "content": "text", "front": "text", "back": "text", "wardrobe": "title"},
                    {"key": "tags", "content": "tags", "front": {"kind": "tag_banner", "from": "bottom"}},
                    {"key": "body", "content": "text", "front": {"kind": "text", "from": "bottom", "lead_delimiter": ":"}},
                    {"key": "cost", "content": "text", "front": {"kind": "circle", "corner": "upper_right"}}
                ]
            },
            "spell": {
                "size": "mini_euro",
                "fields": [
                    {"key": "title", "content": "text", "front": "text", "wardrobe": "title"},
                    {"key": "area", "content": "area_of_effect", "front": {"kind": "grid", "feather": 0.4}},
                    {"key": "effects", "content": "table", "front": "table"}
                ]
            }
        },
        "decks": {
            "monsters": "monster",
            "spells": "spell"
        }
    })
}

pub fn monsters() -> Value {
    json!({
        "metadata": {"defaults": {"copies": 2}},
        "Goblin": {"tags": "beast", "body": ["Sneaky: moves first.", "Drops _gold_."], "cost": 1},
        "Skeleton": {"tags": ["undead"], "body": "Rattles.", "cost": 2},
        "Lich": {"metadata": {"copies": 1}, "data": {"tags": "undead", "cost": 9}}
    })
}

const SPELLS: &str = "\
Fireball:
  area: [[0, 0], [1, 0], [0, 1], [1, 1]]
  effects:
    - [Roll, Effect]
    - [1, Fizzle]
    - [6, Everything burns]
Frost:
  area: [[0, 0]]
";

/// A temporary game folder with a game file and deck specifications.
pub struct GameDir {
    pub dir: TempDir,
    pub game_file: PathBuf,
}

impl GameDir {
    pub fn svg_folder(&self) -> PathBuf {
        self.dir.path().join("svg")
    }

    pub fn printing_folder(&self) -> PathBuf {
        self.dir.path().join("printing")
    }
}

pub fn game_dir() -> Result<GameDir, Box<dyn std::error::Error>> {
    game_dir_with(game())
}

pub fn game_dir_with(game: Value) -> Result<GameDir, Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let specs = dir.path().join("specs");
    fs::create_dir(&specs)?;
    fs::write(specs.join("monsters.json"), serde_json::to_string_pretty(&monsters())?)?;
    fs::write(specs.join("spells.yaml"), SPELLS)?;
    let game_file = dir.path().join("game.json");
    fs::write(&game_file, serde_json::to_string_pretty(&game)?)?;
    Ok(GameDir { dir, game_file })
}
