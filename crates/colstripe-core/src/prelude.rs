//! Convenient re-exports for downstream crates.

pub use crate::error::{Error, Result};
pub use crate::schema::{join_path, Cardinality, Field, FieldKind, ScalarKind, Schema};
pub use crate::value::{Record, Scalar, Value};
