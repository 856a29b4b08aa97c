use crate::parsers::{parse_anchor, parse_font_style, parse_font_variant, parse_font_weight};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

/// A font family as handled by a wardrobe.
///
/// There is no real typesetting here. The ratios are rough estimates of a
/// slightly broader than average character, used to guess where to wrap
/// lines. A higher width-to-height ratio means a squat, broad font.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub name: String,
    pub width_to_height: f64,
    pub bold_to_roman: f64,
}

impl Font {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width_to_height: 0.6,
            bold_to_roman: 1.1,
        }
    }

    pub fn with_ratios(name: impl Into<String>, width_to_height: f64, bold_to_roman: f64) -> Self {
        Self {
            name: name.into(),
            width_to_height,
            bold_to_roman,
        }
    }

    pub fn arial() -> Self {
        Self::new("Arial")
    }

    pub fn bitstream_charter() -> Self {
        Self::with_ratios("Bitstream Charter", 0.52, 1.1)
    }

    pub fn bitstream_vera_sans() -> Self {
        Self::new("Bitstream Vera Sans")
    }

    /// A known family with calibrated ratios, or any other family with the
    /// default ratios.
    pub fn named(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "arial" => Self::arial(),
            "bitstream charter" => Self::bitstream_charter(),
            "bitstream vera sans" => Self::bitstream_vera_sans(),
            _ => Self::new(name.trim()),
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for Font {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontDef {
            Name(String),
            Full {
                name: String,
                width_to_height: Option<f64>,
                bold_to_roman: Option<f64>,
            },
        }

        Ok(match FontDef::deserialize(deserializer)? {
            FontDef::Name(name) => Font::named(&name),
            FontDef::Full {
                name,
                width_to_height,
                bold_to_roman,
            } => {
                let base = Font::named(&name);
                Font {
                    width_to_height: width_to_height.unwrap_or(base.width_to_height),
                    bold_to_roman: bold_to_roman.unwrap_or(base.bold_to_roman),
                    name: base.name,
                }
            }
        })
    }
}

macro_rules! keyword_enum {
    ($name:ident, $parser:path, { $($variant:ident => $svg:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_svg(&self) -> &'static str {
                match self {
                    $($name::$variant => $svg),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_svg())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $parser(&s).map_err(de::Error::custom)
            }
        }
    };
}

keyword_enum!(FontStyle, parse_font_style, {
    Italic => "italic",
    Oblique => "oblique",
});

keyword_enum!(FontWeight, parse_font_weight, {
    Bold => "bold",
    Bolder => "bolder",
    Lighter => "lighter",
});

keyword_enum!(FontVariant, parse_font_variant, {
    SmallCaps => "small-caps",
});

keyword_enum!(Anchor, parse_anchor, {
    Start => "start",
    Middle => "middle",
    End => "end",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_fonts() {
        assert_eq!(Font::named("bitstream charter").width_to_height, 0.52);
        let unknown = Font::named(" Wax ");
        assert_eq!(unknown.name, "Wax");
        assert_eq!(unknown.width_to_height, 0.6);
        assert_eq!(unknown.bold_to_roman, 1.1);
    }

    #[test]
    fn test_font_deserialize() {
        let f: Font = serde_json::from_str("\"Arial\"").unwrap();
        assert_eq!(f, Font::arial());
        let f: Font = serde_json::from_str(r#"{"name": "Googe Light", "width_to_height": 0.5}"#).unwrap();
        assert_eq!(f.width_to_height, 0.5);
        assert_eq!(f.bold_to_roman, 1.1);
    }

    #[test]
    fn test_keywords() {
        let a: Anchor = serde_json::from_str("\"middle\"").unwrap();
        assert_eq!(a, Anchor::Middle);
        assert_eq!(FontVariant::SmallCaps.to_string(), "small-caps");
        assert!(serde_json::from_str::<FontWeight>("\"heavy\"").is_err());
    }
}
