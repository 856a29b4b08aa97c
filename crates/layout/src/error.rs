use cbg_content::ContentError;
use cbg_style::StyleError;
use cbg_svg::SvgError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Card can never fit image of selected size.")]
    TooSmall,
    /// Not a failure as such: the current image has no room for the card.
    #[error("Cannot add another card to image: Image full.")]
    Full,
    #[error("No cards selected for layouting.")]
    NoCards,
    #[error("Minimal column widths too large for available space.")]
    ColumnsTooWide,
    #[error("No wardrobe named \"{0}\".")]
    NoSuchWardrobe(String),
    #[error("Wardrobe \"{0}\" has no font to set text with.")]
    Illiterate(String),
    #[error("Unknown layout mode \"{0}\".")]
    UnknownMode(String),
    #[error("Generic layout error: {0}")]
    Generic(String),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error(transparent)]
    Svg(#[from] SvgError),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
