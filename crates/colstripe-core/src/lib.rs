#![forbid(unsafe_code)]
//! colstripe-core: schema model, runtime record values, and error types.
//!
//! This crate is pure data: it describes *what* a nested record looks like
//! (`schema`) and holds one materialized instance of it (`value`). The
//! shredding algorithm itself lives in `colstripe-split` and only reads
//! these types.

pub mod error;
pub mod prelude;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use schema::{Cardinality, Field, FieldKind, ScalarKind, Schema};
pub use value::{Record, Scalar, Value};
