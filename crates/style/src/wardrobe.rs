//! Wardrobes: sets of fonts, colors and transformations with a current mode.
//!
//! The font size unit is `px`. SVG treats px like a bare user unit, which in
//! our documents is a millimetre. Using `mm` explicitly disturbs baselines in
//! some viewers.

use crate::error::StyleError;
use crate::font::Anchor;
use crate::mode::{Mode, ModeOverride};
use cbg_svg::{Element, Transform, rounded};
use cbg_types::{FontSize, Point};
use itertools::Itertools;
use log::error;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

pub const MAIN: &str = "main";
pub const INACTIVE: &str = "inactive";
pub const BACKGROUND: &str = "background";
pub const CONTRAST: &str = "contrast";
pub const ACCENT: &str = "accent";
pub const EMPHASIS: &str = "emphasis";

const FONT_SIZE_UNIT: &str = "px";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WardrobeDef")]
pub struct Wardrobe {
    pub font_size: Option<FontSize>,
    modes: HashMap<String, Mode>,
    pub transformations: Vec<Transform>,
    mode_key: String,
    mode: Mode,
}

impl Default for Wardrobe {
    fn default() -> Self {
        Self::new(None, HashMap::from([(MAIN.to_string(), Mode::default())]))
    }
}

impl Wardrobe {
    /// A wardrobe in its main mode. A main mode is added if missing.
    pub fn new(font_size: Option<FontSize>, mut modes: HashMap<String, Mode>) -> Self {
        let mode = modes.entry(MAIN.to_string()).or_default().clone();
        Self {
            font_size,
            modes,
            transformations: Vec::new(),
            mode_key: MAIN.to_string(),
            mode,
        }
    }

    /// Builder-style constructor for one mode at a time.
    pub fn with_mode(mut self, key: impl Into<String>, mode: Mode) -> Self {
        let key = key.into();
        if key == self.mode_key {
            self.mode = mode.clone();
        }
        self.modes.insert(key, mode);
        self
    }

    pub fn with_transformations(mut self, transformations: Vec<Transform>) -> Self {
        self.transformations = transformations;
        self
    }

    pub fn has_mode(&self, key: &str) -> bool {
        self.modes.contains_key(key)
    }

    pub fn mode_keys(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str).sorted()
    }

    pub fn reset(&mut self) {
        if let Some(main) = self.modes.get(MAIN) {
            self.mode = main.clone();
            self.mode_key = MAIN.to_string();
        }
    }

    pub fn set_mode(&mut self, key: &str) -> Result<(), StyleError> {
        match self.modes.get(key) {
            Some(mode) => {
                self.mode = mode.clone();
                self.mode_key = key.to_string();
                Ok(())
            }
            None => {
                error!("Wardrobe has no mode keyed by {}.", key);
                Err(StyleError::NoSuchMode(key.to_string()))
            }
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_key(&self) -> &str {
        &self.mode_key
    }

    /// A copy of this wardrobe with an override applied to every mode.
    pub fn copy_modes(&self, over: &ModeOverride) -> Self {
        let modes = self
            .modes
            .iter()
            .map(|(k, m)| (k.clone(), over.apply(m)))
            .collect();
        let mut copy = Self::new(self.font_size, modes)
            .with_transformations(self.transformations.clone());
        // Keep the same mode selected; the key exists by construction.
        let _ = copy.set_mode(&self.mode_key);
        copy
    }

    /// True if the wardrobe can handle text.
    pub fn literate(&self) -> bool {
        self.font_size.is_some() && self.mode.font.is_some()
    }

    pub fn character_width(&self) -> Option<f64> {
        if !self.literate() {
            return None;
        }
        Some(self.font_size?.base * self.mode.character_width_to_height()?)
    }

    pub fn line_height(&self) -> Option<f64> {
        self.font_size.map(|f| f.line_height())
    }

    pub fn after_paragraph(&self) -> Option<f64> {
        self.font_size.map(|f| f.after_paragraph())
    }

    /// The x coordinate for a text element in `space`, given the current
    /// alignment. Text is assumed to run left to right.
    pub fn horizontal_anchor(&self, space: f64, margin: f64) -> f64 {
        match self.mode.anchor {
            None | Some(Anchor::Start) => margin,
            Some(Anchor::Middle) => space / 2.0,
            Some(Anchor::End) => space - margin,
        }
    }

    fn style_pairs(&self) -> BTreeMap<&'static str, String> {
        let mut style = BTreeMap::new();
        let m = &self.mode;

        if let (Some(size), Some(font)) = (self.font_size, &m.font) {
            style.insert("font-family", font.name.clone());
            style.insert("font-size", format!("{}{}", rounded(size.base), FONT_SIZE_UNIT));
            if let Some(w) = m.weight {
                style.insert("font-weight", w.to_string());
            }
            if let Some(s) = m.style {
                style.insert("font-style", s.to_string());
            }
            if let Some(v) = m.variant {
                style.insert("font-variant", v.to_string());
            }
        }

        if let Some(fill) = m.fill_colors.first() {
            if !fill.is_black() {
                style.insert("fill", fill.to_string());
            }
        }

        if m.thickness != 0.0 {
            // Black is the default stroke here, but not in SVG.
            let stroke = m
                .stroke_colors
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "#000000".to_string());
            style.insert("stroke", stroke);
            if let Some(dash) = &m.dasharray {
                style.insert("stroke-dasharray", dash.clone());
            }
            let width = match self.font_size {
                Some(size) if self.literate() => size.base * m.thickness,
                _ => m.thickness,
            };
            style.insert("stroke-width", rounded(width));
        }
        style
    }

    /// Presentation attributes for the current mode. `position` resolves
    /// locally centred rotations.
    pub fn to_svg_attributes(&self, position: Option<Point>) -> Vec<(String, String)> {
        let mut attributes = Vec::new();

        let style = self.style_pairs();
        if !style.is_empty() {
            let value = style.iter().map(|(k, v)| format!("{}:{}", k, v)).join(";");
            attributes.push(("style".to_string(), value));
        }

        if self.literate() {
            if let Some(anchor) = self.mode.anchor {
                attributes.push(("text-anchor".to_string(), anchor.to_string()));
            }
        }

        if !self.transformations.is_empty() {
            attributes.push((
                "transform".to_string(),
                Transform::join(&self.transformations, position),
            ));
        }
        attributes
    }

    pub fn apply_to(&self, element: &mut Element, position: Option<Point>) {
        element.extend_attrs(self.to_svg_attributes(position));
    }

    /// Attributes for a line of the given stroke width, such as a banner.
    ///
    /// The stroke takes the current mode's stroke color, falling back to
    /// its fill color and then to black. A given dash pattern replaces the
    /// mode's own.
    pub fn line_attributes(&self, width: f64, dasharray: Option<&str>) -> Vec<(String, String)> {
        let m = &self.mode;
        let color = m
            .stroke_colors
            .first()
            .or_else(|| m.fill_colors.first())
            .map(ToString::to_string)
            .unwrap_or_else(|| "#000000".to_string());
        let mut style = BTreeMap::from([
            ("stroke", color),
            ("stroke-width", rounded(width)),
        ]);
        if let Some(dash) = dasharray.or(m.dasharray.as_deref()) {
            style.insert("stroke-dasharray", dash.to_string());
        }
        let mut attributes = vec![(
            "style".to_string(),
            style.iter().map(|(k, v)| format!("{}:{}", k, v)).join(";"),
        )];
        if !self.transformations.is_empty() {
            attributes.push((
                "transform".to_string(),
                Transform::join(&self.transformations, None),
            ));
        }
        attributes
    }
}

#[derive(Deserialize)]
struct WardrobeDef {
    #[serde(default)]
    font_size: Option<FontSize>,
    #[serde(default)]
    modes: HashMap<String, Mode>,
    #[serde(default)]
    transformations: Vec<Transform>,
}

impl TryFrom<WardrobeDef> for Wardrobe {
    type Error = StyleError;

    fn try_from(def: WardrobeDef) -> Result<Self, Self::Error> {
        for t in &def.transformations {
            t.validate()
                .map_err(|e| StyleError::InvalidWardrobe(e.to_string()))?;
        }
        Ok(Wardrobe::new(def.font_size, def.modes).with_transformations(def.transformations))
    }
}
