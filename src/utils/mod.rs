//! Shared text-processing utilities.
//!
//! - [`tokenizer`] - Normalization and token extraction for indexing and
//!   query matching

pub mod tokenizer;

pub use tokenizer::*;
