//! Grid size, per-cell coordinates and grid attribute parsing.

use std::fmt;

use logos::Logos;
use serde::Serialize;

/// Smallest allowed extent on either axis.
pub const MIN_EXTENT: u32 = 1;
/// Largest allowed extent on either axis.
pub const MAX_EXTENT: u32 = 16;

/// Coordinates of one grid cell, handed to every function evaluated for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coords {
    /// 1-based row.
    pub row: u32,
    /// 1-based column.
    pub col: u32,
    /// 1-based position in row-major order.
    pub index: u32,
}

impl Coords {
    pub fn new(row: u32, col: u32, index: u32) -> Self {
        Self { row, col, index }
    }
}

/// Rows × columns of the grid, each clamped to `[1, 16]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(MIN_EXTENT, MIN_EXTENT)
    }
}

impl GridSize {
    /// Create a grid, clamping both axes into range.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: rows.clamp(MIN_EXTENT, MAX_EXTENT),
            cols: cols.clamp(MIN_EXTENT, MAX_EXTENT),
        }
    }

    /// Total number of cells.
    pub fn count(&self) -> u32 {
        self.rows * self.cols
    }

    /// Iterate the cells in row-major order (rows outer, columns inner).
    ///
    /// Selector numbering and keyframe namespacing depend on this order.
    pub fn cells(&self) -> impl Iterator<Item = Coords> + '_ {
        (1..=self.rows).flat_map(move |row| {
            (1..=self.cols).map(move |col| Coords::new(row, col, (row - 1) * self.cols + col))
        })
    }

    /// Parse a grid attribute such as `"5"`, `"3x4"`, `"3, 4"`, `"3 × 4"`.
    ///
    /// A single value is used for both axes. Missing, zero or malformed values
    /// fall back to 1; fractional values are truncated.
    pub fn parse(attr: &str) -> Self {
        let mut numbers = GridToken::lexer(attr).spanned().filter_map(|(token, span)| {
            match token {
                Ok(GridToken::Number) => Some(extent(&attr[span])),
                Ok(GridToken::Separator) => None,
                Err(()) => {
                    tracing::debug!(attr, ?span, "ignoring unexpected text in grid size");
                    None
                }
            }
        });

        let rows = numbers.next().flatten();
        let cols = numbers.next().flatten().or(rows);
        Self::new(rows.unwrap_or(MIN_EXTENT), cols.unwrap_or(MIN_EXTENT))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Tokens of a grid attribute.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum GridToken {
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,

    #[regex(r"[,，xX×/]+")]
    Separator,
}

/// A positive extent, or `None` for zero/unparseable text.
fn extent(text: &str) -> Option<u32> {
    let n: f64 = text.parse().ok()?;
    let n = n.trunc().min(f64::from(MAX_EXTENT));
    (n >= 1.0).then_some(n as u32)
}
