use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("record {index} is missing required field '{field}'")]
    MissingRequiredField { index: usize, field: String },
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
