//! One run of the program: read decks, select cards, lay out, save, then
//! display or print.

use crate::cli::Cli;
use crate::config::GameConfig;
use crate::error::CbgError;
use cbg_content::{Card, Deck, Selection};
use cbg_layout::Layouter;
use log::{debug, info};
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

const PRINT_DPI: u32 = 600;
const PRINT_MEDIA: &str = "media=A4";

pub struct Application {
    game: GameConfig,
    cli: Cli,
}

impl Application {
    pub fn new(game: GameConfig, cli: Cli) -> Self {
        Self { game, cli }
    }

    pub fn game(&self) -> &GameConfig {
        &self.game
    }

    /// Returns the paths of the saved SVG images.
    pub fn execute(&self) -> Result<Vec<PathBuf>, CbgError> {
        let svg_folder = self.game.svg_folder();
        let printing_folder = self.game.printing_folder();
        delete_old_files(&svg_folder)?;
        delete_old_files(&printing_folder)?;
        if self.cli.clean {
            info!("Cleaned out old output.");
            return Ok(Vec::new());
        }

        let cards = self.select_cards(self.read_decks()?)?;
        let wardrobes = self.game.wardrobes();
        let mut layouter =
            Layouter::new(self.game.short_name(), &cards, &wardrobes, self.cli.layout_config())?;
        layouter.run()?;
        let paths = layouter.save(&svg_folder)?;

        if self.cli.display {
            self.display(&paths)?;
        } else if self.cli.print {
            self.print(&paths, &printing_folder)?;
        }
        Ok(paths)
    }

    pub fn read_decks(&self) -> Result<Vec<Deck>, CbgError> {
        let folder = self.game.specs_folder();
        let card_types = self.game.card_types();
        let context = self.game.context();
        self.game
            .decks
            .iter()
            .map(|(base, type_name)| {
                let card_type = card_types.get(type_name).cloned().ok_or_else(|| {
                    CbgError::Config(format!("No card type named \"{}\".", type_name))
                })?;
                let deck = Deck::from_file(&folder, base, card_type, &context)?;
                debug!("{} card(s) in \"{}\" deck.", deck.total_copies(), deck);
                Ok(deck)
            })
            .collect()
    }

    /// Apply the command-line selection, then flatten the decks in order.
    pub fn select_cards(&self, mut decks: Vec<Deck>) -> Result<Vec<Card>, CbgError> {
        let selection = Selection::new(
            &self.cli.only,
            &self.cli.exclude,
            self.cli.card_max1,
            self.cli.deck_max1,
        )?;
        if !selection.is_noop() {
            for deck in &mut decks {
                deck.control_selection(&selection);
            }
        }
        decks.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Ok(decks.iter().flat_map(Deck::all_sorted).collect())
    }

    fn display(&self, paths: &[PathBuf]) -> Result<(), CbgError> {
        let Some(first) = paths.first() else {
            return Ok(());
        };
        run(Command::new(&self.cli.viewer).arg(first))
    }

    /// Rasterize each image and send it to the default printer.
    fn print(&self, paths: &[PathBuf], folder: &Path) -> Result<(), CbgError> {
        fs::create_dir_all(folder)?;
        for svg in paths {
            let stem = svg.file_stem().unwrap_or_else(|| OsStr::new("image"));
            let png = folder.join(stem).with_extension("png");
            run(Command::new("inkscape")
                .arg("--export-type=png")
                .arg(format!("--export-dpi={}", PRINT_DPI))
                .arg(format!("--export-filename={}", png.display()))
                .arg(svg))?;
            run(Command::new("lp").args(["-o", PRINT_MEDIA]).arg(&png))?;
        }
        Ok(())
    }
}

/// Delete the files in a folder. A missing folder is already clean.
pub fn delete_old_files(folder: &Path) -> Result<usize, CbgError> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };
    let mut deleted = 0;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            debug!("Deleting \"{}\".", path.display());
            fs::remove_file(&path)?;
            deleted += 1;
        }
    }
    Ok(deleted)
}

fn run(command: &mut Command) -> Result<(), CbgError> {
    debug!("Running {:?}.", command);
    let status = command
        .status()
        .map_err(|e| CbgError::Command(format!("{:?}: {}", command.get_program(), e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(CbgError::Command(format!(
            "{:?} exited with {}.",
            command.get_program(),
            status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_old_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.svg"), "x").unwrap();
        fs::write(dir.path().join("b.png"), "x").unwrap();
        fs::create_dir(dir.path().join("keep")).unwrap();
        assert_eq!(delete_old_files(dir.path()).unwrap(), 2);
        assert!(dir.path().join("keep").exists());
        // Idempotent.
        assert_eq!(delete_old_files(dir.path()).unwrap(), 0);
        assert_eq!(delete_old_files(&dir.path().join("missing")).unwrap(), 0);
    }

    #[test]
    fn test_failing_command() {
        let result = run(Command::new("cbg-no-such-program-anywhere").arg("x"));
        assert!(matches!(result, Err(CbgError::Command(_))));
    }
}
