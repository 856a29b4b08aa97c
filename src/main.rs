use cbg::{Application, CbgError, Cli, GameConfig};
use clap::Parser;
use log::{LevelFilter, info};

fn main() -> Result<(), CbgError> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over the verbosity flag.
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let game = GameConfig::load(&cli.game_file)?;
    info!("Generating card graphics for {}.", game.title);
    let paths = Application::new(game, cli).execute()?;
    for path in &paths {
        info!("Wrote {}.", path.display());
    }
    Ok(())
}
