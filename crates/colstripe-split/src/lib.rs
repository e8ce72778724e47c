#![forbid(unsafe_code)]
//! colstripe-split: the record shredder.
//!
//! Converts one schema-typed record into a column-striped representation:
//! for every leaf field of the schema, an ordered sequence of
//! `(value-or-absent, repetition level, definition level)` triples, as
//! described in the Dremel paper (Melnik et al., VLDB 2010).
//!
//! Design intent:
//! - Pure and synchronous; no I/O, no shared state. Each [`Splitter`] owns
//!   its accumulator, so distinct records can be split on distinct threads.
//! - Absence is represented, never omitted: every schema leaf gets a stripe
//!   even when nothing in the record populates it.

pub mod column;
pub mod error;
pub mod splitter;

pub use column::{ColumnMap, ColumnRecord, ColumnStripe};
pub use error::{Error, Result};
pub use splitter::{split, Splitter};
