use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("Color must start with #, got: {0}")]
    MissingHash(String),

    #[error("Hex color must be ASCII, got: {0}")]
    NotAscii(String),

    #[error("Invalid hex color length: expected 3 or 6, got {0}")]
    HexLength(usize),

    #[error("Invalid {component} component: {source}")]
    Component {
        component: &'static str,
        source: ParseIntError,
    },
}
