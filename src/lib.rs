#![forbid(unsafe_code)]
//! colstripe: umbrella crate re-exporting the workspace pieces.
//!
//! Most users want [`split`] (or [`Splitter`] for the cached per-record
//! form) together with the schema and record types from the core crate.

pub use colstripe_core::{
    Cardinality, Field, FieldKind, Record, Scalar, ScalarKind, Schema, Value,
};
pub use colstripe_split::{split, ColumnMap, ColumnRecord, ColumnStripe, Splitter};
