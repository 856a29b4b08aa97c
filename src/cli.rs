use cbg_layout::{LayoutConfig, LayoutMode};
use cbg_style::parsers::{parse_margins, parse_page_size};
use cbg_types::{PageSize, Point};
use clap::Parser;
use std::path::PathBuf;

/// Generate playing card graphics from a game file and its deck
/// specifications.
#[derive(Debug, Clone, Parser)]
#[command(name = "cbg", version)]
#[command(about = "Generate playing card graphics as SVG")]
pub struct Cli {
    /// Game file in YAML, JSON or TOML.
    pub game_file: PathBuf,

    /// Extra logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Draw only cards matching "[<copies>:]<regex>", or "tag=<name>".
    #[arg(short, long, num_args = 1.., value_name = "[N:]REGEX")]
    pub only: Vec<String>,

    /// Skip cards matching "[<copies>:]<regex>", or "tag=<name>".
    #[arg(short = 'x', long, num_args = 1.., value_name = "[N:]REGEX")]
    pub exclude: Vec<String>,

    /// At most one copy of each selected card.
    #[arg(long = "card-max1")]
    pub card_max1: bool,

    /// At most one card from each deck.
    #[arg(long = "deck-max1")]
    pub deck_max1: bool,

    /// How cards are distributed over images: default, neighbours, duplex,
    /// singles or fan.
    #[arg(short, long, default_value_t = LayoutMode::Default)]
    pub layout: LayoutMode,

    /// Skip card fronts.
    #[arg(long)]
    pub no_obverse: bool,

    /// Skip card backs.
    #[arg(long)]
    pub no_reverse: bool,

    /// Angle in radians spanned by a fan of cards.
    #[arg(long, value_name = "RADIANS")]
    pub arc: Option<f64>,

    /// Image size: "a4" or "<width>x<height>" in mm.
    #[arg(long, value_parser = page_size)]
    pub page: Option<PageSize>,

    /// Image padding in mm: one value, or horizontal then vertical.
    #[arg(long, value_parser = margins, value_name = "MM[ MM]")]
    pub margins: Option<Point>,

    /// Send output to a printer.
    #[arg(short, long, conflicts_with = "display")]
    pub print: bool,

    /// Show the first image in a viewer.
    #[arg(short, long)]
    pub display: bool,

    /// Image viewer for --display.
    #[arg(long, default_value = "eog")]
    pub viewer: String,

    /// Delete old output files and exit.
    #[arg(long)]
    pub clean: bool,
}

fn page_size(s: &str) -> Result<PageSize, String> {
    parse_page_size(s).map_err(|e| e.to_string())
}

fn margins(s: &str) -> Result<Point, String> {
    parse_margins(s).map_err(|e| e.to_string())
}

impl Cli {
    pub fn layout_config(&self) -> LayoutConfig {
        let mut page = self.page.unwrap_or_default();
        if let Some(margins) = self.margins {
            page.margins = margins;
        }
        LayoutConfig {
            mode: self.layout,
            obverse: !self.no_obverse,
            reverse: !self.no_reverse,
            page,
            arc: self.arc,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cbg").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["game.yaml"]);
        assert_eq!(cli.game_file, PathBuf::from("game.yaml"));
        assert_eq!(cli.viewer, "eog");
        assert_eq!(cli.layout_config(), LayoutConfig::default());
    }

    #[test]
    fn test_layout_options() {
        let cli = parse(&[
            "-l", "duplex", "--no-reverse", "--page", "100x150", "--margins", "5 7", "game.yaml",
        ]);
        let config = cli.layout_config();
        assert_eq!(config.mode, LayoutMode::Duplex);
        assert!(config.obverse && !config.reverse);
        assert_eq!(config.page, PageSize::new(100.0, 150.0, 5.0, 7.0));
    }

    #[test]
    fn test_selection_lists() {
        let cli = parse(&["-o", "2:^Orc", "tag=undead", "-x", "Lich", "--", "game.yaml"]);
        assert_eq!(cli.only, vec!["2:^Orc", "tag=undead"]);
        assert_eq!(cli.exclude, vec!["Lich"]);
    }

    #[test]
    fn test_print_and_display_conflict() {
        let result = Cli::try_parse_from(["cbg", "-p", "-d", "game.yaml"]);
        assert!(result.is_err());
        assert!(Cli::try_parse_from(["cbg", "-l", "spiral", "game.yaml"]).is_err());
    }
}
