//! Typed failures raised inside parsers, writers and document formats.
//!
//! The pipeline reports errors as strings; these variants exist so each
//! component can use `?` internally and convert once at its boundary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::ConfigFormat;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid {format} format: {message}")]
    Syntax {
        format: ConfigFormat,
        message: String,
    },

    #[error("Expected {format} object at document root")]
    RootNotObject { format: ConfigFormat },

    #[error("Missing required property '{0}'")]
    MissingProperty(String),

    #[error("Property '{0}' must be an object")]
    NotAnObject(String),

    #[error("Server '{0}' must be an object")]
    ServerNotObject(String),

    #[error("Server '{0}' is missing required field 'command'")]
    MissingCommand(String),

    #[error("Server '{0}' field 'command' must be a string")]
    InvalidCommand(String),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize {format} config: {message}")]
    Serialize {
        format: ConfigFormat,
        message: String,
    },

    #[error("Failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConversionError>;
