use thiserror::Error;

/// Result type local to colstripe-split.
pub type Result<T> = std::result::Result<T, Error>;

/// Ways a record can fail to satisfy the structural guarantees promised by
/// its schema. The first violation encountered (depth-first, schema field
/// order) aborts the whole split; no partial output is produced.
#[derive(Debug, Error)]
pub enum Error {
    /// A REQUIRED field has no value in the record.
    #[error("missing required field `{path}`")]
    MissingRequiredField { path: String },

    /// A field's runtime value disagrees with its schema-declared kind
    /// (leaf vs group vs repeated list) or scalar type.
    #[error("type mismatch at `{path}`: expected {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// Two column maps with different leaf path sets cannot be concatenated.
    #[error("cannot append column maps: {0}")]
    ColumnMismatch(String),
}
