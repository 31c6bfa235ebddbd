use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed time stamp: {0}")]
    BadTimeStamp(String),

    #[error("malformed event line: {0}")]
    BadEventLine(String),

    #[error("unknown event kind id: {0}")]
    UnknownEventKind(u16),

    #[error("event kind {0} is derived-only and cannot appear in the event log")]
    DerivedOnlyKind(u16),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid integer field: {0}")]
    BadInteger(#[from] std::num::ParseIntError),

    #[error("invalid config: {0}")]
    BadConfig(String),

    #[error("failed to parse config JSON")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] biathlon_model::ModelError),
}

pub type ParseResult<T> = Result<T, ParseError>;
