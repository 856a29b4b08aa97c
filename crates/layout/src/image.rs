//! A single SVG image that packs card footprints into rows.

use crate::error::LayoutError;
use cbg_content::Card;
use cbg_svg::{Element, SvgDocument};
use cbg_types::{Point, Rectangle};
use log::debug;
use std::path::Path;

/// The card an image was made for, used in filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub title: String,
    pub deck: String,
}

impl From<&Card> for Subject {
    fn from(card: &Card) -> Self {
        Self {
            title: card.title.clone(),
            deck: card.deck.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Image {
    doc: SvgDocument,
    pub dimensions: Rectangle,
    pub padding: Point,
    pub printable: Rectangle,
    /// Fill rows from the left. Reverse sides run right to left so that
    /// they line up with their fronts on a duplex print.
    pub left_to_right: bool,
    pub subject: Option<Subject>,
    row_heights: Vec<f64>,
    row: Rectangle,
}

impl Image {
    pub fn new(
        dimensions: Rectangle,
        padding: Point,
        left_to_right: bool,
        subject: Option<Subject>,
    ) -> Self {
        let printable = Rectangle::new(
            dimensions.width - 2.0 * padding.x,
            dimensions.height - 2.0 * padding.y,
        );
        Self {
            doc: SvgDocument::new(dimensions),
            dimensions,
            padding,
            printable,
            left_to_right,
            subject,
            row_heights: Vec::new(),
            row: Rectangle::default(),
        }
    }

    fn occupied_height(&self) -> f64 {
        self.row_heights.iter().sum()
    }

    /// Where the top left corner of a card with this footprint would go.
    ///
    /// `Ok(None)` means the image is full. A footprint that would not fit
    /// even an empty image is an error.
    pub fn free_spot(&self, footprint: Rectangle) -> Result<Option<Point>, LayoutError> {
        let space = self.printable;
        if space.width < footprint.width || space.height < footprint.height {
            return Err(LayoutError::TooSmall);
        }

        let mut row_x = self.row.width;
        let mut occupied_y = self.occupied_height();
        if space.width < row_x + footprint.width {
            // Would need a new row.
            occupied_y += self.row.height;
            row_x = 0.0;
        }
        if space.height < occupied_y + footprint.height {
            return Ok(None);
        }

        let x = if self.left_to_right {
            row_x
        } else {
            space.width - row_x - footprint.width
        };
        Ok(Some(self.padding + Point::new(x, occupied_y)))
    }

    /// True until a card has been packed.
    pub fn is_empty(&self) -> bool {
        self.row_heights.is_empty() && self.row.width == 0.0
    }

    pub fn can_fit(&self, footprint: Rectangle) -> Result<bool, LayoutError> {
        Ok(self.free_spot(footprint)?.is_some())
    }

    /// Place a drawn card, which must have been drawn at `free_spot`.
    pub fn add(&mut self, footprint: Rectangle, group: Element) -> Result<(), LayoutError> {
        if !self.can_fit(footprint)? {
            return Err(LayoutError::Full);
        }
        if self.printable.width < self.row.width + footprint.width {
            self.row_heights.push(self.row.height);
            self.row = Rectangle::default();
        }
        self.doc.push(group);

        self.row.width += footprint.width;
        self.row.height = self.row.height.max(footprint.height);
        Ok(())
    }

    /// Add an element without packing it, e.g. a rotated card in a fan.
    pub fn append_unplaced(&mut self, element: Element) {
        self.doc.push(element);
    }

    pub fn define(&mut self, element: Element) -> Result<bool, LayoutError> {
        Ok(self.doc.define(element)?)
    }

    pub fn document(&self) -> &SvgDocument {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut SvgDocument {
        &mut self.doc
    }

    pub fn save(&self, path: &Path) -> Result<(), LayoutError> {
        debug!("Saving image {}.", path.display());
        Ok(self.doc.save(path)?)
    }
}
