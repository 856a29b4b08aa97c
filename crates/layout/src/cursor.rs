//! Insertion cursors: where the next element goes on a card.
//!
//! A cursor measures its displacement from one edge of the card. Offsets
//! it reports are always measured from the top.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    FromTop,
    /// Stacking upward from the bottom of a space of the given height.
    FromBottom { space: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub direction: Direction,
    displacement: f64,
}

impl Cursor {
    pub fn from_top() -> Self {
        Self {
            direction: Direction::FromTop,
            displacement: 0.0,
        }
    }

    pub fn from_bottom(space: f64) -> Self {
        Self {
            direction: Direction::FromBottom { space },
            displacement: 0.0,
        }
    }

    /// A fresh cursor with the same direction, for a smaller space.
    pub fn local(&self, space: f64) -> Self {
        match self.direction {
            Direction::FromTop => Self::from_top(),
            Direction::FromBottom { .. } => Self::from_bottom(space),
        }
    }

    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    /// The current position, measured from the top.
    pub fn offset(&self) -> f64 {
        match self.direction {
            Direction::FromTop => self.displacement,
            Direction::FromBottom { space } => space - self.displacement,
        }
    }

    pub fn jump(&mut self, position: f64) {
        self.displacement = position;
    }

    /// Move by `height` and return an offset for the next insertion.
    ///
    /// From the top, the move comes first. From the bottom, the offset is
    /// taken before moving up.
    pub fn slide(&mut self, height: f64) -> f64 {
        match self.direction {
            Direction::FromTop => {
                self.displacement += height;
                self.offset()
            }
            Direction::FromBottom { .. } => {
                let ret = self.offset();
                self.displacement += height;
                ret
            }
        }
    }

    /// A line feed for `n_lines` of text. Returns the baseline of the
    /// first (topmost) line and leaves the cursor past the whole block.
    pub fn text(&mut self, font_size: f64, line_height: f64, n_lines: usize) -> f64 {
        let envelope = n_lines as f64 * line_height;
        match self.direction {
            Direction::FromTop => {
                let relevant = self.slide(font_size);
                self.slide(envelope - font_size);
                relevant
            }
            Direction::FromBottom { .. } => {
                self.slide(envelope - font_size);
                self.slide(font_size)
            }
        }
    }

    /// Lines inserted from the bottom must be inserted last line first.
    pub fn flip_line_order(&self) -> bool {
        matches!(self.direction, Direction::FromBottom { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_top() {
        let mut c = Cursor::from_top();
        assert_eq!(c.slide(5.0), 5.0);
        assert_eq!(c.slide(2.0), 7.0);
        assert_eq!(c.offset(), 7.0);
        assert!(!c.flip_line_order());
    }

    #[test]
    fn test_from_bottom() {
        let mut c = Cursor::from_bottom(100.0);
        assert_eq!(c.slide(5.0), 100.0);
        assert_eq!(c.slide(2.0), 95.0);
        assert_eq!(c.offset(), 93.0);
        assert!(c.flip_line_order());
    }

    #[test]
    fn test_text_line_feed() {
        let mut top = Cursor::from_top();
        top.jump(2.0);
        assert_eq!(top.text(3.0, 4.0, 1), 5.0);
        assert_eq!(top.displacement(), 6.0);

        let mut bottom = Cursor::from_bottom(100.0);
        bottom.jump(2.0);
        // Baseline of the top line of a two-line block resting 2 up.
        assert_eq!(bottom.text(3.0, 4.0, 2), 93.0);
        assert_eq!(bottom.displacement(), 10.0);
    }

    #[test]
    fn test_local_keeps_direction() {
        let c = Cursor::from_bottom(50.0).local(8.0);
        assert_eq!(c.offset(), 8.0);
        assert_eq!(Cursor::from_top().local(8.0).offset(), 0.0);
    }
}
