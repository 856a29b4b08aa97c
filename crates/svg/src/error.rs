use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvgError {
    #[error("Path error: {0}")]
    Path(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Conflicting definitions for ID \"{0}\".")]
    ConflictingDefinition(String),

    #[error("Cannot define an element without an ID: <{0}>")]
    MissingId(String),

    #[error("XML writer error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
