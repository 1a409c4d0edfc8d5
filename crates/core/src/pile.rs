//! Pile module - importing an initial board layout from text
//!
//! Layout files draw the bottom of the board, top row first:
//!
//! ```text
//!     aa
//! bbb aa cc
//! bdddd cccc
//! ```
//!
//! The last line lands on the floor row. Every non-space character is an
//! occupied cell, and all cells sharing a character become one piece. Shapes
//! for those pieces are cosmetic and drawn at random when the board installs
//! the layout.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cell::Cell;

/// Why a layout could not be used
#[derive(Debug)]
pub enum PileError {
    /// The file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The layout has more lines than the board has rows
    TooManyRows { rows: usize, height: i32 },
    /// A character sits at or beyond the right edge
    ColumnOutOfRange { row: i32, column: usize, width: i32 },
}

impl fmt::Display for PileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileError::Io { path, source } => {
                write!(f, "cannot read pile file {}: {}", path.display(), source)
            }
            PileError::TooManyRows { rows, height } => {
                write!(f, "pile has {} rows but the board is {} rows high", rows, height)
            }
            PileError::ColumnOutOfRange { row, column, width } => write!(
                f,
                "pile cell at column {} (row {}) is outside a board {} columns wide",
                column, row, width
            ),
        }
    }
}

impl std::error::Error for PileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PileError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parsed layout: occupied cells grouped by the character that drew them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PileLayout {
    groups: BTreeMap<char, Vec<Cell>>,
}

impl PileLayout {
    /// Parse layout text for a `width` x `height` board
    pub fn parse(text: &str, width: i32, height: i32) -> Result<Self, PileError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() > height.max(0) as usize {
            return Err(PileError::TooManyRows {
                rows: lines.len(),
                height,
            });
        }

        let top = height - lines.len() as i32;
        let mut groups: BTreeMap<char, Vec<Cell>> = BTreeMap::new();
        for (k, line) in lines.iter().enumerate() {
            let y = top + k as i32;
            for (column, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                if column as i64 >= width as i64 {
                    return Err(PileError::ColumnOutOfRange {
                        row: y,
                        column,
                        width,
                    });
                }
                groups
                    .entry(ch)
                    .or_default()
                    .push(Cell::new(column as i32, y));
            }
        }

        Ok(Self { groups })
    }

    /// Read and parse a layout file
    pub fn load(path: impl AsRef<Path>, width: i32, height: i32) -> Result<Self, PileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, width, height)
    }

    /// Cell groups in character order
    pub fn groups(&self) -> impl Iterator<Item = (char, &[Cell])> {
        self.groups.iter().map(|(&ch, cells)| (ch, cells.as_slice()))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn cell_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
