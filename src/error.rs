use cbg_content::ContentError;
use cbg_layout::LayoutError;
use cbg_style::StyleError;
use thiserror::Error;

/// Everything that can stop a run, from reading the game to printing.
#[derive(Error, Debug)]
pub enum CbgError {
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Invalid game configuration: {0}")]
    Config(String),

    #[error("External command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
