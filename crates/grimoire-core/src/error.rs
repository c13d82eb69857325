#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("cannot average the success rate of a spellbook with no spells")]
    EmptyAggregate,
    #[error("invalid spell effect: {0}")]
    InvalidCategory(String),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Malformed flat-text input. Ingestion stops at the first one of these, so no partially
/// populated record ever reaches the engine.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("unexpected end of input while reading {field} of {record}")]
    UnexpectedEnd { record: String, field: &'static str },
    #[error("invalid {field} `{token}` in {record}")]
    InvalidNumber { record: String, field: &'static str, token: String },
}
