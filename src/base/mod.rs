//! Foundation types for the Relevance toolchain.
//!
//! This module provides fundamental types used throughout the compiler:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`Name`] - Cheap-to-clone names for phrases, types and operators
//! - Domain constants (reserved type names, literal types)
//!
//! This module has NO dependencies on other relevance modules.

pub mod constants;

pub use smol_str::SmolStr as Name;
pub use text_size::{TextRange, TextSize};

/// Convert a byte offset into a [`TextSize`].
///
/// Expression text is always far below `u32::MAX`; longer inputs saturate.
pub fn text_size(offset: usize) -> TextSize {
    TextSize::new(u32::try_from(offset).unwrap_or(u32::MAX))
}
