use thiserror::Error;

/// Errors that can occur while selecting modes or parsing style values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("No such wardrobe mode: \"{0}\".")]
    NoSuchMode(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Invalid wardrobe: {0}")]
    InvalidWardrobe(String),
}
