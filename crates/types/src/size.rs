//! Physical sizes of cards, pages and fonts, all in millimetres.

use crate::geometry::{Point, Rectangle};
use serde::{Deserialize, Deserializer, Serialize, de};

/// The footprint of a card together with its two border widths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardSize {
    pub footprint: Rectangle,
    pub outer: f64,
    pub inner: f64,
}

impl CardSize {
    pub const fn new(width: f64, height: f64, outer: f64, inner: f64) -> Self {
        Self {
            footprint: Rectangle::new(width, height),
            outer,
            inner,
        }
    }

    /// A frameless size, for images and other regions without borders.
    pub const fn plain(width: f64, height: f64) -> Self {
        Self::new(width, height, 0.0, 0.0)
    }

    pub fn tilted(&self) -> Self {
        Self {
            footprint: self.footprint.tilted(),
            ..*self
        }
    }

    pub fn width(&self) -> f64 {
        self.footprint.width
    }

    pub fn height(&self) -> f64 {
        self.footprint.height
    }

    /// Horizontal space left for text inside both borders on both sides.
    pub fn interior_width(&self) -> f64 {
        self.footprint.width - 2.0 * self.outer - 2.0 * self.inner
    }

    /// Look up one of the standard sizes by name.
    pub fn named(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "mini_euro" => Some(MINI_EURO),
            "standard_euro" => Some(STANDARD_EURO),
            "short_euro" => Some(SHORT_EURO),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for CardSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum CardSizeDef {
            Named(String),
            Custom {
                width: f64,
                height: f64,
                #[serde(default)]
                outer: f64,
                #[serde(default)]
                inner: f64,
            },
        }

        match CardSizeDef::deserialize(deserializer)? {
            CardSizeDef::Named(name) => CardSize::named(&name)
                .ok_or_else(|| de::Error::custom(format!("Unknown card size: {}", name))),
            CardSizeDef::Custom {
                width,
                height,
                outer,
                inner,
            } => Ok(CardSize::new(width, height, outer, inner)),
        }
    }
}

/// A sheet of paper with uniform margins on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub footprint: Rectangle,
    pub margins: Point,
}

impl PageSize {
    pub const fn new(width: f64, height: f64, margin_x: f64, margin_y: f64) -> Self {
        Self {
            footprint: Rectangle::new(width, height),
            margins: Point::new(margin_x, margin_y),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        A4
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Named(String),
            Custom {
                width: f64,
                height: f64,
                #[serde(default)]
                margins: Option<Point>,
            },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Named(name) => match name.trim().to_ascii_lowercase().as_str() {
                "a4" => Ok(A4),
                _ => Err(de::Error::custom(format!("Unknown page size: {}", name))),
            },
            PageSizeDef::Custom {
                width,
                height,
                margins,
            } => {
                let m = margins.unwrap_or_default();
                Ok(PageSize::new(width, height, m.x, m.y))
            }
        }
    }
}

/// A font size with the factors used to derive related spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSize {
    pub base: f64,
    pub stroke_factor: f64,
    pub line_height_factor: f64,
    pub after_paragraph_factor: f64,
}

impl FontSize {
    pub const fn new(base: f64) -> Self {
        Self {
            base,
            stroke_factor: 0.02,
            line_height_factor: 1.17,
            after_paragraph_factor: 0.3,
        }
    }

    pub const fn with_after_paragraph(mut self, factor: f64) -> Self {
        self.after_paragraph_factor = factor;
        self
    }

    pub fn stroke(&self) -> f64 {
        self.base * self.stroke_factor
    }

    pub fn line_height(&self) -> f64 {
        self.base * self.line_height_factor
    }

    pub fn after_paragraph(&self) -> f64 {
        self.base * self.after_paragraph_factor
    }
}

impl<'de> Deserialize<'de> for FontSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontSizeDef {
            Base(f64),
            Full {
                base: f64,
                stroke_factor: Option<f64>,
                line_height_factor: Option<f64>,
                after_paragraph_factor: Option<f64>,
            },
        }

        Ok(match FontSizeDef::deserialize(deserializer)? {
            FontSizeDef::Base(base) => FontSize::new(base),
            FontSizeDef::Full {
                base,
                stroke_factor,
                line_height_factor,
                after_paragraph_factor,
            } => {
                let default = FontSize::new(base);
                FontSize {
                    base,
                    stroke_factor: stroke_factor.unwrap_or(default.stroke_factor),
                    line_height_factor: line_height_factor.unwrap_or(default.line_height_factor),
                    after_paragraph_factor: after_paragraph_factor
                        .unwrap_or(default.after_paragraph_factor),
                }
            }
        })
    }
}

// Paper.
pub const A4: PageSize = PageSize::new(210.0, 290.0, 16.0, 9.0);

// Cards.
pub const MINI_EURO: CardSize = CardSize::new(44.0, 68.0, 1.9, 0.8);
pub const STANDARD_EURO: CardSize = CardSize::new(59.0, 92.0, 1.9, 1.0);
pub const SHORT_EURO: CardSize = CardSize::new(59.0, 90.0, 1.9, 1.0);

/// Font sizes suited to the mini euro card.
pub mod mini_euro_fonts {
    use super::FontSize;

    pub const TITLE: FontSize = FontSize::new(4.0);
    pub const TAGS: FontSize = FontSize::new(2.9).with_after_paragraph(0.0);
    pub const BODY: FontSize = FontSize::new(2.9);
    pub const FINEPRINT: FontSize = FontSize::new(2.6);
}

/// Font sizes suited to the standard and short euro cards.
pub mod standard_euro_fonts {
    use super::FontSize;

    pub const TITLE: FontSize = FontSize::new(5.0);
    pub const TAGS: FontSize = FontSize::new(3.4).with_after_paragraph(0.0);
    pub const BODY: FontSize = FontSize::new(3.4);
    pub const FINEPRINT: FontSize = FontSize::new(2.6);
}
