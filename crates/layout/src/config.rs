use crate::error::LayoutError;
use cbg_types::PageSize;
use std::fmt;
use std::str::FromStr;

/// How card copies are distributed over images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// All fronts, then all backs, packed onto pages.
    #[default]
    Default,
    /// Front and back of each card side by side.
    Neighbours,
    /// Fronts and backs on alternating pages, backs mirrored for duplex
    /// printing.
    Duplex,
    /// One image per card side, cropped to the card.
    Singles,
    /// All cards in one image, rotated into a fan as if held in a hand.
    Fan,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 5] = [
        LayoutMode::Default,
        LayoutMode::Neighbours,
        LayoutMode::Duplex,
        LayoutMode::Singles,
        LayoutMode::Fan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutMode::Default => "default",
            LayoutMode::Neighbours => "neighbours",
            LayoutMode::Duplex => "duplex",
            LayoutMode::Singles => "singles",
            LayoutMode::Fan => "fan",
        }
    }
}

impl FromStr for LayoutMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| LayoutError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub mode: LayoutMode,

    /// Draw the front of each card.
    ///
    /// Defaults to `true`.
    pub obverse: bool,

    /// Draw the back of each card, where its type has one.
    ///
    /// Defaults to `true`.
    pub reverse: bool,

    /// Image size and padding. Ignored by the singles and fan modes, which
    /// size their images to fit the cards with no padding.
    ///
    /// Defaults to A4 with printer margins.
    pub page: PageSize,

    /// The angle in radians spanned by a fan of cards.
    ///
    /// Defaults to `None`, meaning 0.15 per card after the first, capped at 1.
    pub arc: Option<f64>,

    /// Filename parts. See `Layouter::filenames`.
    pub game_in_filename: bool,
    pub deck_in_filename: bool,
    pub card_in_filename: bool,
    pub side_in_filename: bool,
    pub filename_suffix: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Default,
            obverse: true,
            reverse: true,
            page: PageSize::default(),
            arc: None,
            game_in_filename: true,
            deck_in_filename: false,
            card_in_filename: false,
            side_in_filename: false,
            filename_suffix: None,
        }
    }
}

impl LayoutConfig {
    pub fn with_mode(mode: LayoutMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Filename settings implied by the mode.
    ///
    /// One image per card side is only useful when the name says which
    /// card and side it is. A fan is marked with a suffix.
    pub fn with_mode_defaults(mut self) -> Self {
        match self.mode {
            LayoutMode::Singles => {
                self.card_in_filename = true;
                self.side_in_filename = true;
            }
            LayoutMode::Fan => {
                self.filename_suffix = Some("fan".to_string());
            }
            _ => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        assert_eq!("Duplex".parse::<LayoutMode>().unwrap(), LayoutMode::Duplex);
        assert_eq!(LayoutMode::Neighbours.to_string(), "neighbours");
        assert!(matches!(
            "spiral".parse::<LayoutMode>(),
            Err(LayoutError::UnknownMode(m)) if m == "spiral"
        ));
    }

    #[test]
    fn test_mode_defaults() {
        let singles = LayoutConfig::with_mode(LayoutMode::Singles).with_mode_defaults();
        assert!(singles.card_in_filename && singles.side_in_filename);
        let fan = LayoutConfig::with_mode(LayoutMode::Fan).with_mode_defaults();
        assert_eq!(fan.filename_suffix.as_deref(), Some("fan"));
        let plain = LayoutConfig::default().with_mode_defaults();
        assert_eq!(plain, LayoutConfig::default());
    }
}
