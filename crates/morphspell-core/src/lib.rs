//! Shared leaf types for the morphspell workspace.
//!
//! - [`analysis`] -- morphological analysis records (`st:`, `pa:`, ... fields)
//! - [`case`] -- case pattern detection and case-folded lookup variants
//! - [`character`] -- simple one-to-one case mapping helpers
//! - [`enums`] -- lookup results, overlay status codes, limits

pub mod analysis;
pub mod case;
pub mod character;
pub mod enums;
