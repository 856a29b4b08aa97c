//! Tables with automatic column widths, measured in characters.

use super::{Canvas, TextMetrics};
use crate::cursor::Cursor;
use crate::error::LayoutError;
use cbg_content::Table;
use cbg_style::Wardrobe;
use cbg_svg::shapes;
use cbg_types::Point;
use log::debug;

fn longest_word(cell: &str) -> usize {
    cell.split_whitespace().map(|w| w.chars().count()).max().unwrap_or(0)
}

fn longest_line(cell: &str) -> usize {
    cell.lines().map(|l| l.chars().count()).max().unwrap_or(0)
}

/// For each column, the length of its longest word and of its longest line.
pub fn requirements_by_column(rows: &[Vec<String>]) -> Vec<(usize, usize)> {
    let n_columns = rows.first().map_or(0, Vec::len);
    (0..n_columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .fold((0, 0), |(word, line), cell| {
                    (word.max(longest_word(cell)), line.max(longest_line(cell)))
                })
        })
        .collect()
}

/// Greedily break a string into lines of at most `width` characters.
/// A word longer than that gets a line of its own.
pub fn line_break(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

/// Break cells into lines until every row fits `characters_per_line`.
///
/// The column with the most to gain, i.e. the largest difference between
/// its longest line and its longest word, is narrowed by one character at
/// a time.
pub fn adapt_to_space(
    rows: &[Vec<String>],
    characters_per_line: usize,
) -> Result<(Vec<Vec<String>>, Vec<(usize, usize)>), LayoutError> {
    let mut cells = rows.to_vec();
    let mut requirements = requirements_by_column(&cells);

    if requirements.iter().map(|r| r.0).sum::<usize>() > characters_per_line {
        return Err(LayoutError::ColumnsTooWide);
    }

    while requirements.iter().map(|r| r.1).sum::<usize>() > characters_per_line {
        let Some((col, &(min, max))) = requirements
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, (min, max))| max - min)
        else {
            break;
        };
        if max <= min {
            return Err(LayoutError::ColumnsTooWide);
        }
        debug!("Narrowing table column {} to {} characters.", col, max - 1);
        for (original, row) in rows.iter().zip(cells.iter_mut()) {
            if original[col].chars().count() > min {
                row[col] = line_break(&row[col], max - 1);
            }
        }
        requirements = requirements_by_column(&cells);
    }
    Ok((cells, requirements))
}

pub fn present_table(
    canvas: &mut Canvas<'_>,
    table: &Table,
    wardrobe: &mut Wardrobe,
    name: &str,
) -> Result<(), LayoutError> {
    if table.is_empty() {
        return Ok(());
    }
    wardrobe.reset();
    let metrics = TextMetrics::of(wardrobe, name)?;
    let (mut rows, requirements) =
        adapt_to_space(&table.rows, metrics.characters_per_line(&canvas.size))?;
    if canvas.cursor().flip_line_order() {
        rows.reverse();
    }
    for row in &rows {
        insert_row(canvas, row, &requirements, wardrobe, &metrics);
    }
    canvas.cursor().slide(metrics.font.after_paragraph());
    Ok(())
}

fn insert_row(
    canvas: &mut Canvas<'_>,
    row: &[String],
    requirements: &[(usize, usize)],
    wardrobe: &Wardrobe,
    metrics: &TextMetrics,
) {
    let base = metrics.font.base;
    let line_height = metrics.font.line_height();
    let n_lines = row.iter().map(|c| c.lines().count()).max().unwrap_or(0).max(1);
    let top = canvas.cursor().text(base, line_height, n_lines);

    let mut column_start = canvas.size.outer + canvas.size.inner;
    for (cell, &(_, width)) in row.iter().zip(requirements) {
        let space = metrics.character_width * width as f64;
        let x = column_start + wardrobe.horizontal_anchor(space, 0.0);

        let mut local = Cursor::from_top();
        for line in cell.lines() {
            let y = top + local.text(base, line_height, 1) - base;
            let position = canvas.origin + Point::new(x, y);
            let mut element = shapes::text(position);
            wardrobe.apply_to(&mut element, Some(position));
            canvas.append(element.with_text(line));
        }
        column_start += space;
    }
}
