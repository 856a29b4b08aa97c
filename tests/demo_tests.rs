mod common;

use cbg::{Application, GameConfig};
use common::{TestResult, cli};
use std::path::Path;

fn demo() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/dungeon/game.yaml"))
}

#[test]
fn test_demo_game_reads() -> TestResult {
    let game = GameConfig::load(demo())?;
    assert_eq!(game.short_name(), "dcd");
    assert_eq!(game.tags.len(), 4);

    let app = Application::new(game, cli(&[], demo()));
    let decks = app.read_decks()?;
    assert_eq!(decks.len(), 2);

    let cards = app.select_cards(decks)?;
    let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Goblin", "Goblin", "Lich", "Skeleton", "Skeleton", "Fireball", "Frost Nova"]
    );
    let lich = &cards[2];
    assert!(lich.field("body")?.content.to_string().contains("Lich heals every turn."));
    Ok(())
}

#[test]
fn test_demo_selection() -> TestResult {
    let game = GameConfig::load(demo())?;
    let app = Application::new(game.clone(), cli(&["-o", "3:Goblin"], demo()));
    let cards = app.select_cards(app.read_decks()?)?;
    let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Goblin", "Goblin", "Goblin"]);

    let app = Application::new(game, cli(&["--deck-max1"], demo()));
    let cards = app.select_cards(app.read_decks()?)?;
    let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Goblin", "Fireball"]);
    Ok(())
}
