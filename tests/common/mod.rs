pub mod fixtures;

use cbg::{Application, CbgError, Cli, GameConfig};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Parse command-line arguments, with the game file last.
pub fn cli(args: &[&str], game_file: &Path) -> Cli {
    let game_file = game_file.to_string_lossy().into_owned();
    let argv = std::iter::once("cbg")
        .chain(args.iter().copied())
        .chain(["--", game_file.as_str()]);
    Cli::parse_from(argv)
}

/// Load the game and run the whole application.
pub fn run(args: &[&str], game_file: &Path) -> Result<Vec<PathBuf>, CbgError> {
    let _ = env_logger::builder().is_test(true).try_init();
    let cli = cli(args, game_file);
    let game = GameConfig::load(&cli.game_file)?;
    Application::new(game, cli).execute()
}

/// Sorted names of the files in a folder.
pub fn file_names(folder: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(folder)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}
