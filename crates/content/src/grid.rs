//! Two-dimensional maps, such as the area affected by a spell.

use crate::error::ContentError;
use cbg_types::PointList;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Affected,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Affected => 'A',
        }
    }
}

/// Largest number of cells an area may span on either axis.
pub const MAX_SPREAD: usize = 100;

/// A diagram of an affected area, padded with one layer of empty cells
/// on every side. The first possibly affected cell is at row 1, column 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaOfEffect {
    rows: Vec<Vec<Cell>>,
}

impl AreaOfEffect {
    pub fn from_points(points: &PointList) -> Result<Self, ContentError> {
        if points.is_empty() {
            return Ok(Self::default());
        }
        let (rows, cols) = points
            .shape()
            .filter(|&(rows, cols)| rows <= MAX_SPREAD && cols <= MAX_SPREAD)
            .ok_or_else(|| {
                ContentError::spec(format!(
                    "Area of effect too large: at most {} cells on each axis.",
                    MAX_SPREAD
                ))
            })?;
        let mut grid = vec![vec![Cell::Empty; cols + 2]; rows + 2];
        let (min_x, min_y) = (points.min_x(), points.min_y());
        // The spread fits, so these differences cannot overflow.
        for &(x, y) in points.points() {
            let col = (x - min_x + 1) as usize;
            let row = (y - min_y + 1) as usize;
            grid[row][col] = Cell::Affected;
        }
        Ok(Self { rows: grid })
    }

    /// Parses a list of `[x, y]` pairs.
    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        let items = match value {
            Value::Null => return Ok(Self::default()),
            Value::Array(items) => items,
            other => {
                return Err(ContentError::spec(format!(
                    "Area of effect must be a list of [x, y] points, found {}.",
                    other
                )));
            }
        };
        let points = items
            .iter()
            .map(|item| match item.as_array().map(Vec::as_slice) {
                Some([x, y]) => match (x.as_i64(), y.as_i64()) {
                    (Some(x), Some(y)) => Ok((x, y)),
                    _ => Err(ContentError::spec(format!("Invalid map point: {}.", item))),
                },
                _ => Err(ContentError::spec(format!("Invalid map point: {}.", item))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_points(&PointList::new(points))
    }

    /// (rows, columns), including padding.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map_or(0, Vec::len))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Every cell with its (row, column) position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, cell)| ((r, c), *cell))
        })
    }
}

impl fmt::Display for AreaOfEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(0,) map: []");
        }
        let (rows, cols) = self.shape();
        let body: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
                format!("[{}]", cells.join(" "))
            })
            .collect();
        write!(f, "({}, {}) map: [{}]", rows, cols, body.join("\n "))
    }
}
