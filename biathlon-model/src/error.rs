use thiserror::Error;

/// Domain-level errors raised while validating or constructing model values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
