//! Grade 1 Braille transcoding.
//!
//! Pure functions with no state beyond a single call.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `cell` | Six-dot [`Cell`] newtype |
//! | `table` | Character to cell mapping |
//! | `transcoder` | [`transcode`] with numeric mode |

// ============================================================================
// Submodules
// ============================================================================

/// Six-dot cell type.
pub mod cell;

/// Character to cell symbol table.
pub mod table;

/// Text transcoding.
pub mod transcoder;

// ============================================================================
// Re-exports
// ============================================================================

pub use cell::Cell;
pub use table::{lookup, lookup_or_blank};
pub use transcoder::{cells, transcode};
