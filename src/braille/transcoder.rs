//! Text to Braille transcoding with numeric mode.
//!
//! The numeric indicator is emitted once when a digit follows a non-digit.
//! Numeric mode then stays on until a character that is neither a digit nor
//! mapped to the blank cell. Spaces and unmapped characters both produce the
//! blank cell, so neither ends a number.
//!
//! ```text
//! "a5b"   →  ⠁ ⠼⠑ ⠃
//! "5 5"   →  ⠼⠑ ⠀ ⠑
//! "5a5"   →  ⠼⠑ ⠁ ⠼⠑
//! ```

use super::cell::Cell;
use super::table::lookup_or_blank;

/// Transcodes text into a string of Braille pattern characters.
///
/// Never fails. Input is lower-cased first; every resulting character yields
/// one cell, plus one numeric indicator per digit run.
#[must_use]
pub fn transcode(text: &str) -> String {
    let mut output = String::with_capacity(text.len() * 3);
    for cell in Cells::new(text) {
        output.push(cell.as_char());
    }
    output
}

/// Transcodes text into typed cells.
#[must_use]
pub fn cells(text: &str) -> Vec<Cell> {
    Cells::new(text).collect()
}

// ============================================================================
// Cells
// ============================================================================

/// Iterator over the cells of a lower-cased input.
struct Cells {
    chars: std::vec::IntoIter<char>,
    numeric_mode: bool,
    /// Cell held back while the numeric indicator is yielded.
    queued: Option<Cell>,
}

impl Cells {
    fn new(text: &str) -> Self {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        Self {
            chars: chars.into_iter(),
            numeric_mode: false,
            queued: None,
        }
    }
}

impl Iterator for Cells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if let Some(cell) = self.queued.take() {
            return Some(cell);
        }

        let ch = self.chars.next()?;
        let cell = lookup_or_blank(ch);
        let is_digit = ch.is_ascii_digit();

        if is_digit && !self.numeric_mode {
            self.numeric_mode = true;
            self.queued = Some(cell);
            return Some(Cell::NUMERIC);
        }

        if !is_digit && self.numeric_mode && !cell.is_blank() {
            self.numeric_mode = false;
        }

        Some(cell)
    }
}

// ============================================================================
// Tests
// ============================================================================
