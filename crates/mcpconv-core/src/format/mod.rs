//! On-disk document formats shared by agent parsers and writers.
//!
//! Every agent format is loaded into a `serde_json::Map<String, Value>` as
//! the intermediate document, whatever its serialization (JSON, TOML), so
//! agent code only deals with one tree shape.

mod json;
mod toml;

use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ConversionError, Result};

pub use json::JsonSerializer;
pub use toml::TomlSerializer;

/// Document serialization used by an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => f.write_str("JSON"),
            ConfigFormat::Toml => f.write_str("TOML"),
        }
    }
}

/// A decoded document together with the text it was decoded from.
#[derive(Debug, Clone)]
pub struct Document {
    format: ConfigFormat,
    source: String,
    root: Map<String, Value>,
}

impl Document {
    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_root(self) -> Map<String, Value> {
        self.root
    }

    /// Entries of the object stored under `key`, in source order. A name
    /// repeated in the source yields one entry per occurrence.
    pub fn table_entries(&self, key: &str) -> Result<Vec<(String, Value)>> {
        match self.root.get(key) {
            None => Err(ConversionError::MissingProperty(key.to_string())),
            Some(Value::Object(table)) => match self.format {
                ConfigFormat::Json => json::ordered_table(&self.source, key),
                // TOML rejects repeated keys while decoding
                ConfigFormat::Toml => Ok(table
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()),
            },
            Some(_) => Err(ConversionError::NotAnObject(key.to_string())),
        }
    }
}

/// Trait for decoding/encoding agent configuration documents.
pub trait ConfigSerializer: Send + Sync {
    /// Decode document text into a map. The root must be an object/table.
    fn decode(&self, content: &str) -> Result<Map<String, Value>>;

    /// Encode a map as document text.
    fn encode(&self, map: &Map<String, Value>) -> Result<String>;

    /// Get the format this serializer handles.
    fn format(&self) -> ConfigFormat;

    /// Decode document text, keeping the text for order-sensitive reads.
    fn decode_document(&self, content: String) -> Result<Document> {
        let root = self.decode(&content)?;
        Ok(Document {
            format: self.format(),
            source: content,
            root,
        })
    }

    /// Read and decode a document. A missing file is an error.
    fn load_document(&self, path: &Path) -> Result<Document> {
        if !path.is_file() {
            return Err(ConversionError::InputNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConversionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.decode_document(content)
    }

    fn load(&self, path: &Path) -> Result<Map<String, Value>> {
        self.load_document(path).map(Document::into_root)
    }

    /// Encode and write a document, creating parent directories and
    /// replacing any existing file.
    fn save(&self, path: &Path, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| ConversionError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = self.encode(map)?;
        std::fs::write(path, content).map_err(|source| ConversionError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Create a serializer for the given format.
pub fn serializer_for_format(format: ConfigFormat) -> Box<dyn ConfigSerializer> {
    match format {
        ConfigFormat::Json => Box::new(JsonSerializer),
        ConfigFormat::Toml => Box::new(TomlSerializer),
    }
}
