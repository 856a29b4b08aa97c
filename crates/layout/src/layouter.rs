//! Distribution of card sides over images, and naming of the results.

use crate::config::{LayoutConfig, LayoutMode};
use crate::error::LayoutError;
use crate::image::{Image, Subject};
use crate::presenter::{Side, Wardrobes, present_card};
use cbg_content::Card;
use cbg_svg::Transform;
use cbg_types::{Point, Rectangle};
use log::{debug, info};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Default fan arc per card after the first, in radians.
const FAN_ARC_PER_CARD: f64 = 0.15;
const FAN_ARC_MAX: f64 = 1.0;

/// Feature scaling of a card number to 0..=1, or 0.5 for a single card.
pub fn n_normal(n: usize, n_min: usize, n_max: usize) -> f64 {
    if n_max == n_min {
        return 0.5;
    }
    (n as f64 - n_min as f64) / (n_max as f64 - n_min as f64)
}

/// Trigonometry for a fan of cards rotated about a common pivot below
/// the image, sized so that the whole fan just fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanGeometry {
    pub arc: f64,
    pub radial_margin: f64,
    pub pivot: Point,
    pub size: Rectangle,
    n_min: usize,
    n_max: usize,
}

impl FanGeometry {
    pub fn new(card: Rectangle, arc: Option<f64>, n_min: usize, n_max: usize) -> Self {
        let arc = arc.unwrap_or_else(|| {
            (FAN_ARC_PER_CARD * n_max.saturating_sub(n_min) as f64).min(FAN_ARC_MAX)
        });
        let (cx, cy) = (card.width, card.height);
        // The top edge midpoints of the cards trace the outer arc.
        let outer_radius = 3.0 * cy;
        let inner_radius = outer_radius - cy;

        let mut fan = Self {
            arc,
            radial_margin: 0.0,
            pivot: Point::zero(),
            size: Rectangle::default(),
            n_min,
            n_max,
        };

        let corner_height = |n: usize| {
            let angle = fan.angle(n);
            (cx / 2.0) * angle.sin() + outer_radius * angle.cos() - outer_radius
        };
        let radial_margin = (n_min..n_max)
            .map(corner_height)
            .reduce(f64::max)
            .unwrap_or(0.0);

        let half = arc / 2.0;
        let outer_chord = 2.0 * outer_radius * half.sin();
        let chord_margin = (cx / 2.0) * half.cos();
        let inner_sagitta = inner_radius * (1.0 - half.cos());
        let sagitta_margin = (cx / 2.0) * half.sin();

        fan.radial_margin = radial_margin;
        fan.pivot = Point::new(
            outer_chord / 2.0 + chord_margin,
            outer_radius + radial_margin,
        );
        fan.size = Rectangle::new(
            outer_chord + 2.0 * chord_margin,
            radial_margin + cy + inner_sagitta + sagitta_margin,
        );
        fan
    }

    /// Rotation of card number `n`, in radians.
    pub fn angle(&self, n: usize) -> f64 {
        (n_normal(n, self.n_min, self.n_max) - 0.5) * self.arc
    }

    /// Every card is drawn at the top middle, then rotated into place.
    pub fn origin(&self, card: Rectangle) -> Point {
        Point::new((self.size.width - card.width) / 2.0, self.radial_margin)
    }

    pub fn transform(&self, n: usize) -> Transform {
        Transform::rotate_about(self.angle(n).to_degrees(), self.pivot)
    }
}

/// A queue of images, populated by laying out cards in one of the modes.
pub struct Layouter<'a> {
    game_title: String,
    cards: &'a [Card],
    wardrobes: &'a Wardrobes,
    config: LayoutConfig,
    images: Vec<Image>,
    n_min: usize,
    n_max: usize,
    fan: Option<FanGeometry>,
    /// Index of the first image of the reverse pass, for duplex sorting.
    reverse_start: Option<usize>,
}

impl<'a> Layouter<'a> {
    pub fn new(
        game_title: impl Into<String>,
        cards: &'a [Card],
        wardrobes: &'a Wardrobes,
        config: LayoutConfig,
    ) -> Result<Self, LayoutError> {
        let Some(first) = cards.first() else {
            return Err(LayoutError::NoCards);
        };
        let config = config.with_mode_defaults();
        let (n_min, n_max) = (1, cards.len());
        // Cards in a fan are assumed to be uniform in size.
        let fan = (config.mode == LayoutMode::Fan)
            .then(|| FanGeometry::new(first.card_type.size.footprint, config.arc, n_min, n_max));

        Ok(Self {
            game_title: game_title.into(),
            cards,
            wardrobes,
            config,
            images: Vec::new(),
            n_min,
            n_max,
            fan,
            reverse_start: None,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn fan(&self) -> Option<&FanGeometry> {
        self.fan.as_ref()
    }

    pub fn n_normal(&self, n: usize) -> f64 {
        n_normal(n, self.n_min, self.n_max)
    }

    /// The name of exactly one side.
    pub fn name_side(obverse: bool, reverse: bool) -> Result<&'static str, LayoutError> {
        match (obverse, reverse) {
            (true, false) => Ok(Side::Obverse.name()),
            (false, true) => Ok(Side::Reverse.name()),
            (true, true) => Err(LayoutError::Generic(
                "Both sides are not to be named.".to_string(),
            )),
            (false, false) => Err(LayoutError::Generic(
                "Neither side cannot be named.".to_string(),
            )),
        }
    }

    /// Lay out all cards according to the mode.
    pub fn run(&mut self) -> Result<(), LayoutError> {
        let (obverse, reverse) = (self.config.obverse, self.config.reverse);
        match self.config.mode {
            LayoutMode::Neighbours => {
                if obverse || reverse {
                    self.layout(obverse, reverse)?;
                }
            }
            LayoutMode::Fan => {
                // A fan shows one side only.
                if obverse || reverse {
                    self.layout(obverse, !obverse)?;
                }
            }
            _ => {
                if obverse {
                    self.layout(true, false)?;
                }
                if reverse {
                    self.layout(false, true)?;
                }
            }
        }
        self.sort_images();
        info!("Laid out {} card(s) on {} image(s).", self.cards.len(), self.images.len());
        Ok(())
    }

    /// Outside duplex mode, a pass continues on the last image.
    fn layout(&mut self, obverse: bool, reverse: bool) -> Result<(), LayoutError> {
        if self.config.mode == LayoutMode::Duplex {
            self.drop_trailing_blank();
            if !obverse {
                self.reverse_start = Some(self.images.len());
            }
            // Never mix the sides on one sheet.
            self.new_image(None, obverse);
        }

        let cards = self.cards;
        for (number, card) in (self.n_min..).zip(cards) {
            if obverse {
                self.consider_copy(number, card, Side::Obverse)?;
            }
            if reverse {
                self.consider_copy(number, card, Side::Reverse)?;
            }
        }
        if self.config.mode == LayoutMode::Duplex {
            self.drop_trailing_blank();
        }
        Ok(())
    }

    fn drop_trailing_blank(&mut self) {
        if self.images.last().is_some_and(Image::is_empty) {
            debug!("Dropping a blank image.");
            self.images.pop();
        }
    }

    fn consider_copy(&mut self, number: usize, card: &Card, side: Side) -> Result<(), LayoutError> {
        let drawn = match side {
            Side::Obverse => card.card_type.has_front(),
            Side::Reverse => card.card_type.has_back(),
        };
        if !drawn {
            debug!("{} has no presenter for the {} side.", card, side);
            return Ok(());
        }

        let footprint = card.card_type.size.footprint;
        let obverse = side == Side::Obverse;
        // Fan cards are never packed, so one image holds them all.
        let needs_image = match self.images.last() {
            None => true,
            Some(_) if self.fan.is_some() => false,
            Some(image) => !image.can_fit(footprint)?,
        };
        if needs_image {
            self.new_image(Some(card), obverse);
        }
        let Some(image) = self.images.last_mut() else {
            return Err(LayoutError::Generic("No image to draw on.".to_string()));
        };

        if let Some(fan) = &self.fan {
            let origin = fan.origin(footprint);
            if let Some(mut group) =
                present_card(card, side, origin, self.wardrobes, image.document_mut())?
            {
                group.set_attr("transform", fan.transform(number));
                image.append_unplaced(group);
            }
            return Ok(());
        }

        let origin = image.free_spot(footprint)?.ok_or(LayoutError::Full)?;
        if let Some(group) = present_card(card, side, origin, self.wardrobes, image.document_mut())? {
            image.add(footprint, group)?;
        }
        Ok(())
    }

    fn new_image(&mut self, card: Option<&Card>, obverse: bool) {
        let page = self.config.page;
        let (dimensions, padding) = match (self.config.mode, card, &self.fan) {
            (LayoutMode::Fan, _, Some(fan)) => (fan.size, Point::zero()),
            (LayoutMode::Singles, Some(card), _) => (card.card_type.size.footprint, Point::zero()),
            _ => (page.footprint, page.margins),
        };
        debug!(
            "Creating image {} for the {} side.",
            self.images.len() + 1,
            if obverse { Side::Obverse } else { Side::Reverse }
        );
        self.images.push(Image::new(
            dimensions,
            padding,
            obverse,
            card.map(Subject::from),
        ));
    }

    /// In duplex mode, alternate front sheets with back sheets.
    fn sort_images(&mut self) {
        if self.config.mode != LayoutMode::Duplex {
            return;
        }
        let Some(split) = self.reverse_start else {
            return;
        };
        let split = split.min(self.images.len());
        let backs = self.images.split_off(split);
        let fronts = std::mem::take(&mut self.images);
        self.images = itertools::interleave(fronts, backs).collect();
    }

    /// One filename per image, in queue order.
    pub fn filenames(&self) -> Result<Vec<String>, LayoutError> {
        let hard_cleaner = Regex::new(r"[\W_]+")?;
        let soft_cleaner = Regex::new(r"[\W]+")?;
        let width = self.images.len().to_string().len();
        let config = &self.config;

        self.images
            .iter()
            .enumerate()
            .map(|(i, image)| {
                let clean = |item: &str| hard_cleaner.replace_all(item, "").into_owned();
                let mut name = format!("{:0width$}", i + 1);
                if config.game_in_filename {
                    name = format!("{}_{}", clean(&self.game_title), name);
                }
                if let Some(subject) = &image.subject {
                    if config.deck_in_filename {
                        name = format!("{}_{}", name, clean(&subject.deck));
                    }
                    if config.card_in_filename {
                        name = format!("{}_{}", name, clean(&subject.title));
                    }
                }
                if config.side_in_filename {
                    let side = Self::name_side(image.left_to_right, !image.left_to_right)?;
                    name = format!("{}_{}", name, clean(side));
                }
                if let Some(suffix) = config.filename_suffix.as_deref().filter(|s| !s.is_empty()) {
                    name = format!("{}_{}", name, clean(suffix));
                }
                let name = name.to_lowercase();
                Ok(format!("{}.svg", soft_cleaner.replace_all(&name, "")))
            })
            .collect()
    }

    /// Save every image into `folder`, creating it if needed.
    pub fn save(&self, folder: &Path) -> Result<Vec<PathBuf>, LayoutError> {
        fs::create_dir_all(folder)?;
        let names = self.filenames()?;
        let mut paths = Vec::with_capacity(names.len());
        for (image, name) in self.images.iter().zip(names) {
            let path = folder.join(name);
            image.save(&path)?;
            paths.push(path);
        }
        info!("Saved {} image(s) to {}.", paths.len(), folder.display());
        Ok(paths)
    }
}
