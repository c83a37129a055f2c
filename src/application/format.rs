//! ToC serialization formats
//!
//! YAML is the native format of documentation sites; JSON and TOML carry the
//! same `toc` / `title` / `path` / `section` keys.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{RawDocument, TocDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Toml => "toml",
        };
        f.write_str(name)
    }
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    /// Conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Toml => "toml",
        }
    }
}

/// Parse ToC text into a validated document.
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn parse(text: &str, format: Format) -> ApplicationResult<TocDocument> {
    let raw: RawDocument = match format {
        Format::Yaml => serde_yaml::from_str(text).map_err(|e| parse_err(format, e))?,
        Format::Json => serde_json::from_str(text).map_err(|e| parse_err(format, e))?,
        Format::Toml => toml::from_str(text).map_err(|e| parse_err(format, e))?,
    };
    debug!("parsed {} top-level entries", raw.toc.len());
    Ok(TocDocument::try_from(raw)?)
}

/// Serialize a document; JSON and TOML are pretty-printed.
#[instrument(level = "debug", skip(doc))]
pub fn serialize(doc: &TocDocument, format: Format) -> ApplicationResult<String> {
    let raw = RawDocument::from(doc);
    let text = match format {
        Format::Yaml => serde_yaml::to_string(&raw).map_err(|e| serialize_err(format, e))?,
        Format::Json => {
            let mut text =
                serde_json::to_string_pretty(&raw).map_err(|e| serialize_err(format, e))?;
            text.push('\n');
            text
        }
        Format::Toml => toml::to_string_pretty(&raw).map_err(|e| serialize_err(format, e))?,
    };
    Ok(text)
}

fn parse_err(format: Format, e: impl fmt::Display) -> ApplicationError {
    ApplicationError::Parse {
        format,
        message: e.to_string(),
    }
}

fn serialize_err(format: Format, e: impl fmt::Display) -> ApplicationError {
    ApplicationError::Serialize {
        format,
        message: e.to_string(),
    }
}
