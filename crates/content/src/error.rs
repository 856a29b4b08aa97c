use cbg_style::StyleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    /// A human error in a deck or game specification.
    #[error("Specification error: {0}")]
    Specification(String),

    #[error("Markup error: {0}")]
    Markup(String),

    #[error("Tagging error: {0}")]
    Tagging(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid selection pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub fn spec(message: impl Into<String>) -> Self {
        ContentError::Specification(message.into())
    }
}
