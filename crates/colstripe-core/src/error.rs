use thiserror::Error;

/// Result type local to colstripe-core.
pub type Result<T> = std::result::Result<T, Error>;

/// Schema construction failures. Violations of a valid schema by a record
/// are reported by the splitter crate, not here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("root field `{0}` must be a group")]
    NonGroupRoot(String),

    #[error("duplicate field `{0}`")]
    DuplicateField(String),

    #[error("invalid field name `{0}`: names must be non-empty and must not contain `.`")]
    InvalidFieldName(String),
}
