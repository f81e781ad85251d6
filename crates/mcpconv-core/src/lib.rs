//! mcpconv Core Library
//!
//! Converts MCP server configurations between AI coding agent formats
//! through an agent-agnostic model, with structural validation and an
//! optional strict mode that rejects lossy conversions.

pub mod client;
pub mod engine;
pub mod error;
pub mod format;
pub mod model;
pub mod validate;

/// Re-exports of commonly used types
pub mod prelude {
    // Model
    pub use crate::model::{Configuration, ConversionOutcome, Server, ValidationOutcome};

    // Agents
    pub use crate::client::{Agent, AgentRegistry, ConfigParser, ConfigWriter};

    // Pipeline
    pub use crate::engine::ConversionEngine;
    pub use crate::validate::{ConfigValidator, StructuralValidator};

    // Formats
    pub use crate::error::ConversionError;
    pub use crate::format::{ConfigFormat, ConfigSerializer};
}
