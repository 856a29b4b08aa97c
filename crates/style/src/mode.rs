use crate::font::{Anchor, Font, FontStyle, FontVariant, FontWeight};
use cbg_types::Paint;
use serde::{Deserialize, Deserializer, Serialize};

/// One operating mode of a wardrobe.
///
/// A simple wardrobe has a single mode. Commonly there are two, one of them
/// for emphasis. Colors are sequences so that gradients and ribbons can be
/// added later; only the first color of each is used in output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mode {
    pub font: Option<Font>,
    pub fill_colors: Vec<Paint>,
    pub stroke_colors: Vec<Paint>,
    pub dasharray: Option<String>,
    /// Stroke width, relative to font size when the wardrobe is literate.
    pub thickness: f64,
    pub style: Option<FontStyle>,
    pub weight: Option<FontWeight>,
    pub variant: Option<FontVariant>,
    pub anchor: Option<Anchor>,
}

impl Mode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn without_font(mut self) -> Self {
        self.font = None;
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fill_colors = vec![paint];
        self
    }

    /// Sets stroke colors. A mode without a font and without an explicit
    /// thickness gets a thickness of 1, which is handy for plain shapes.
    pub fn with_stroke(mut self, paint: Paint) -> Self {
        self.stroke_colors = vec![paint];
        if self.thickness == 0.0 && self.font.is_none() {
            self.thickness = 1.0;
        }
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_dasharray(mut self, dasharray: impl Into<String>) -> Self {
        self.dasharray = Some(dasharray.into());
        self
    }

    pub fn with_style(mut self, style: Option<FontStyle>) -> Self {
        self.style = style;
        self
    }

    pub fn with_weight(mut self, weight: Option<FontWeight>) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_variant(mut self, variant: Option<FontVariant>) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_anchor(mut self, anchor: Option<Anchor>) -> Self {
        self.anchor = anchor;
        self
    }

    /// The ratio of character width to height, used to decide where to wrap
    /// lines. Any set style or weight is treated as bold.
    pub fn character_width_to_height(&self) -> Option<f64> {
        let font = self.font.as_ref()?;
        let mut factor = font.width_to_height;
        if self.style.is_some() || self.weight.is_some() {
            factor *= font.bold_to_roman;
        }
        Some(factor)
    }
}

/// Field-level overrides for every mode of a wardrobe. Unset fields leave
/// the mode untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModeOverride {
    pub font: Option<Font>,
    pub fill_colors: Option<Vec<Paint>>,
    pub stroke_colors: Option<Vec<Paint>>,
    pub thickness: Option<f64>,
    pub style: Option<FontStyle>,
    pub weight: Option<FontWeight>,
    pub variant: Option<FontVariant>,
    pub anchor: Option<Anchor>,
}

impl ModeOverride {
    pub fn apply(&self, mode: &Mode) -> Mode {
        let mut m = mode.clone();
        if let Some(font) = &self.font {
            m.font = Some(font.clone());
        }
        if let Some(colors) = &self.fill_colors {
            m.fill_colors = colors.clone();
        }
        if let Some(colors) = &self.stroke_colors {
            m.stroke_colors = colors.clone();
        }
        if let Some(t) = self.thickness {
            m.thickness = t;
        }
        m.style = self.style.or(m.style);
        m.weight = self.weight.or(m.weight);
        m.variant = self.variant.or(m.variant);
        m.anchor = self.anchor.or(m.anchor);
        m
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ModeDef {
    font: Option<Font>,
    #[serde(alias = "fill")]
    fill_colors: Option<OneOrMany<Paint>>,
    #[serde(alias = "stroke")]
    stroke_colors: Option<OneOrMany<Paint>>,
    dasharray: Option<String>,
    thickness: Option<f64>,
    style: Option<FontStyle>,
    weight: Option<FontWeight>,
    variant: Option<FontVariant>,
    anchor: Option<Anchor>,
    italic: bool,
    oblique: bool,
    bold: bool,
    bolder: bool,
    lighter: bool,
    small_caps: bool,
    start: bool,
    middle: bool,
    end: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(v: OneOrMany<T>) -> Self {
        match v {
            OneOrMany::One(t) => vec![t],
            OneOrMany::Many(ts) => ts,
        }
    }
}

/// The first flag that is set, unless a value was given directly.
fn pick<T: Copy>(direct: Option<T>, flags: &[(bool, T)]) -> Option<T> {
    direct.or_else(|| flags.iter().find(|(set, _)| *set).map(|(_, v)| *v))
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let def = ModeDef::deserialize(deserializer)?;
        let stroke_colors: Vec<Paint> = def.stroke_colors.map(Into::into).unwrap_or_default();
        let thickness = match def.thickness {
            Some(t) => t,
            None if !stroke_colors.is_empty() && def.font.is_none() => 1.0,
            None => 0.0,
        };
        Ok(Mode {
            style: pick(
                def.style,
                &[(def.italic, FontStyle::Italic), (def.oblique, FontStyle::Oblique)],
            ),
            weight: pick(
                def.weight,
                &[
                    (def.bold, FontWeight::Bold),
                    (def.bolder, FontWeight::Bolder),
                    (def.lighter, FontWeight::Lighter),
                ],
            ),
            variant: pick(def.variant, &[(def.small_caps, FontVariant::SmallCaps)]),
            anchor: pick(
                def.anchor,
                &[
                    (def.start, Anchor::Start),
                    (def.middle, Anchor::Middle),
                    (def.end, Anchor::End),
                ],
            ),
            font: def.font,
            fill_colors: def.fill_colors.map(Into::into).unwrap_or_default(),
            stroke_colors,
            dasharray: def.dasharray,
            thickness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbg_types::Color;

    #[test]
    fn test_flags_and_direct_values() {
        let m: Mode = serde_json::from_str(r#"{"italic": true}"#).unwrap();
        assert_eq!(m.style, Some(FontStyle::Italic));
        let m: Mode = serde_json::from_str(r#"{"style": "oblique"}"#).unwrap();
        assert_eq!(m.style, Some(FontStyle::Oblique));
        let m: Mode = serde_json::from_str(r#"{"style": "oblique", "italic": true}"#).unwrap();
        assert_eq!(m.style, Some(FontStyle::Oblique));
    }

    #[test]
    fn test_default_thickness() {
        let m: Mode = serde_json::from_str(r##"{"stroke": "#f1eece"}"##).unwrap();
        assert_eq!(m.thickness, 1.0);
        assert_eq!(m.stroke_colors, vec![Paint::Color(Color::rgb(0xf1, 0xee, 0xce))]);
        let m: Mode = serde_json::from_str(r##"{"font": "Wax", "stroke": ["#ffffff"]}"##).unwrap();
        assert_eq!(m.thickness, 0.0);
    }

    #[test]
    fn test_copies_are_independent() {
        let m0 = Mode::new().with_weight(Some(FontWeight::Bolder));
        let m1 = m0
            .clone()
            .with_weight(Some(FontWeight::Bold))
            .with_style(Some(FontStyle::Italic));
        let m2 = m0.clone().with_weight(None).with_style(Some(FontStyle::Oblique));
        assert_eq!(m0.weight, Some(FontWeight::Bolder));
        assert_eq!(m0.style, None);
        assert_eq!(m1.weight, Some(FontWeight::Bold));
        assert_eq!(m1.style, Some(FontStyle::Italic));
        assert_eq!(m2.weight, None);
        assert_eq!(m2.style, Some(FontStyle::Oblique));
    }

    #[test]
    fn test_character_width_to_height() {
        assert_eq!(Mode::new().character_width_to_height(), None);
        let roman = Mode::new().with_font(Font::arial());
        assert_eq!(roman.character_width_to_height(), Some(0.6));
        let bold = roman.clone().with_weight(Some(FontWeight::Bold));
        assert!((bold.character_width_to_height().unwrap() - 0.66).abs() < 1e-9);
        let light = roman.clone().with_weight(Some(FontWeight::Lighter));
        assert!((light.character_width_to_height().unwrap() - 0.66).abs() < 1e-9);
        let italic = roman.with_style(Some(FontStyle::Italic));
        assert!((italic.character_width_to_height().unwrap() - 0.66).abs() < 1e-9);
    }

    #[test]
    fn test_override() {
        let base = Mode::new().with_font(Font::new("Vot")).with_weight(Some(FontWeight::Bold));
        let o = ModeOverride {
            weight: Some(FontWeight::Lighter),
            ..Default::default()
        };
        let m = o.apply(&base);
        assert_eq!(m.weight, Some(FontWeight::Lighter));
        assert_eq!(m.font, base.font);
    }
}
