//! Six-dot Braille cell.
//!
//! A [`Cell`] wraps a character from the Unicode Braille Patterns block
//! restricted to the six-dot range (U+2800..=U+283F). The low six bits of
//! the code point offset are the raised dots, dot 1 in bit 0 through dot 6
//! in bit 5.
//!
//! ```text
//!   1 ● ● 4
//!   2 ● ● 5
//!   3 ● ● 6
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// First code point of the Braille Patterns block (the empty cell).
const BLOCK_START: u32 = 0x2800;

/// Highest dot mask a six-dot cell can carry.
const SIX_DOT_MASK: u8 = 0x3F;

// ============================================================================
// Cell
// ============================================================================

/// One tactile cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell(char);

impl Cell {
    /// The cell with no raised dots. Used for space and unmapped input.
    pub const BLANK: Cell = Cell('\u{2800}');

    /// Numeric indicator, dots 3-4-5-6.
    pub const NUMERIC: Cell = Cell('\u{283C}');

    /// Creates a cell from a Braille pattern character.
    ///
    /// Returns `None` for anything outside the six-dot range, including the
    /// eight-dot patterns.
    #[must_use]
    pub const fn new(ch: char) -> Option<Self> {
        let code = ch as u32;
        if code >= BLOCK_START && code <= BLOCK_START + SIX_DOT_MASK as u32 {
            Some(Self(ch))
        } else {
            None
        }
    }

    /// Creates a cell from a dot mask (dot 1 = bit 0 ... dot 6 = bit 5).
    #[must_use]
    pub const fn from_mask(mask: u8) -> Option<Self> {
        if mask > SIX_DOT_MASK {
            return None;
        }
        match char::from_u32(BLOCK_START + mask as u32) {
            Some(ch) => Some(Self(ch)),
            None => None,
        }
    }

    /// Returns the Braille pattern character.
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Returns the dot mask.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        (self.0 as u32 - BLOCK_START) as u8
    }

    /// Returns `true` if no dot is raised.
    #[inline]
    #[must_use]
    pub const fn is_blank(self) -> bool {
        self.mask() == 0
    }

    /// Returns the raised dot numbers in ascending order.
    #[must_use]
    pub fn raised_dots(self) -> Vec<u8> {
        let mask = self.mask();
        (0..6u8).filter(|&bit| mask & (1 << bit) != 0).map(|bit| bit + 1).collect()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Cell> for char {
    #[inline]
    fn from(cell: Cell) -> Self {
        cell.0
    }
}

// ============================================================================
// Tests
// ============================================================================
