//! Typed key/value documents rendered as JSON.
//!
//! A [`Document`] is an insertion-ordered map from non-empty keys to
//! [`ScalarValue`]s. Values enter either through [`Document::insert`], which
//! coerces raw text according to a declared [`ValueType`], or through
//! [`Document::load`], which reads a flat JSON object from disk.
//!
//! # Value Types
//!
//! - [`ValueType::Text`] -- stored verbatim after trimming
//! - [`ValueType::Number`] -- all-digit input becomes an integer and must
//!   fit in `i64`, anything else must parse as a finite float
//! - [`ValueType::Boolean`] -- `true`/`yes`/`1` and `false`/`no`/`0`,
//!   case-insensitive
//!
//! # Design Rules
//!
//! 1. Every stored value is a string, integer, float or boolean; nested
//!    objects, arrays, nulls and blank keys are rejected on load.
//! 2. Re-inserting a key overwrites its value and keeps its position.
//! 3. A failed insert or load leaves the document unchanged.
//! 4. Rendering and saving produce the same 4-space-indented JSON text.
//! 5. All I/O errors are propagated with the offending path.

pub mod document;
pub mod error;
pub mod persist;
pub mod value;

// Re-export primary types at crate root for ergonomic imports.
pub use document::{Document, INDENT};
pub use error::{StoreError, StoreResult};
pub use value::{ScalarValue, UnknownValueType, ValueType, FALSE_WORDS, TRUE_WORDS};
