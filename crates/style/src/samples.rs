//! Ready-made wardrobes for games that do not define their own.

use crate::font::{Anchor, Font, FontWeight};
use crate::mode::Mode;
use crate::wardrobe::{ACCENT, BACKGROUND, CONTRAST, EMPHASIS, INACTIVE, MAIN, Wardrobe};
use cbg_types::color::{BLACK, GRAY_50, WHITE};
use cbg_types::{FontSize, Paint};
use std::collections::HashMap;

/// Centred Arial text: black, with gray accents and white contrast.
pub fn arial_centred(font_size: FontSize) -> Wardrobe {
    let main = Mode::new()
        .with_font(Font::arial())
        .with_anchor(Some(Anchor::Middle))
        .with_fill(BLACK.into());
    let modes = HashMap::from([
        (ACCENT.to_string(), main.clone().with_fill(GRAY_50.into())),
        (CONTRAST.to_string(), main.clone().with_fill(WHITE.into())),
        (INACTIVE.to_string(), main.clone().with_fill(GRAY_50.into())),
        (
            EMPHASIS.to_string(),
            main.clone().with_weight(Some(FontWeight::Bold)),
        ),
        (MAIN.to_string(), main),
    ]);
    Wardrobe::new(Some(font_size), modes)
}

/// Shapes without text: a thin black frame on a white background.
pub fn card_frame() -> Wardrobe {
    let modes = HashMap::from([
        (
            MAIN.to_string(),
            Mode::new().with_fill(Paint::None).with_stroke(BLACK.into()).with_thickness(0.3),
        ),
        (BACKGROUND.to_string(), Mode::new().with_fill(WHITE.into())),
        (ACCENT.to_string(), Mode::new().with_fill(GRAY_50.into())),
        (CONTRAST.to_string(), Mode::new().with_fill(WHITE.into())),
        (
            INACTIVE.to_string(),
            Mode::new()
                .with_fill(Paint::None)
                .with_stroke(GRAY_50.into())
                .with_thickness(0.2),
        ),
    ]);
    Wardrobe::new(None, modes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbg_types::size::standard_euro_fonts;

    #[test]
    fn test_arial_centred() {
        let mut w = arial_centred(standard_euro_fonts::TITLE);
        assert!(w.literate());
        w.set_mode(CONTRAST).unwrap();
        let attrs = w.to_svg_attributes(None);
        assert_eq!(
            attrs[0].1,
            "fill:#ffffff;font-family:Arial;font-size:5px"
        );
        assert!(w.set_mode(BACKGROUND).is_err());
    }

    #[test]
    fn test_card_frame() {
        let w = card_frame();
        assert!(!w.literate());
        assert_eq!(
            w.to_svg_attributes(None)[0].1,
            "fill:none;stroke:#000000;stroke-width:0.3"
        );
    }
}
