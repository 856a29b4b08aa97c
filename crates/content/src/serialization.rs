//! Format-agnostic loading of specification files.

use crate::error::ContentError;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions tried, in order, when looking for a deck specification.
pub const DECK_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    pub fn from_extension(extension: &str) -> Option<Format> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Format, ContentError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Format::from_extension(extension).ok_or_else(|| {
            ContentError::Serialization(format!(
                "Filename extension \"{}\" not a registered serialization format.",
                extension
            ))
        })
    }

    pub fn parse<T: DeserializeOwned>(&self, text: &str) -> Result<T, ContentError> {
        let result = match self {
            Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        };
        result.map_err(ContentError::Serialization)
    }
}

/// Reads a file into a generic value tree, picking the format by extension.
pub fn load(path: &Path) -> Result<Value, ContentError> {
    load_as(path)
}

pub fn load_as<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path)?;
    format.parse(&text).map_err(|e| match e {
        ContentError::Serialization(msg) => {
            ContentError::Serialization(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Locates `<dir>/<base>.<ext>` for the first deck extension that exists.
pub fn find_deck(dir: &Path, base: &str) -> Result<PathBuf, ContentError> {
    DECK_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", base, ext)))
        .find(|p| p.exists())
        .inspect(|p| debug!("Reading raw specifications from {}.", p.display()))
        .ok_or_else(|| {
            ContentError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Could not locate {}.", base),
            ))
        })
}
