//! Codex client implementation.
//!
//! Codex uses TOML (`~/.codex/config.toml`) with one table per server:
//!
//! ```toml
//! [mcp_servers.name]
//! command = "..."
//! args = [...]
//!
//! [mcp_servers.name.env]
//! KEY = "VALUE"
//! ```

use std::path::Path;

use serde_json::Value;

use crate::client::{
    Agent, ConfigParser, ConfigWriter, check_keyed_servers, decode_stdio_entry, parse_document,
    servers_document, stdio_entry, write_document,
};
use crate::format::ConfigFormat;
use crate::model::{Configuration, ConversionOutcome, Server, ValidationOutcome};

const SERVERS_KEY: &str = "mcp_servers";
const ENTRY_FIELDS: &[&str] = &["command", "args", "env"];

#[derive(Debug, Default)]
pub struct CodexClient;

impl CodexClient {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for CodexClient {
    fn id(&self) -> &'static str {
        "codex"
    }
}

impl ConfigParser for CodexClient {
    fn parse(&self, path: &Path) -> ConversionOutcome {
        parse_document(self.id(), path, ConfigFormat::Toml, |document, warnings| {
            document.table_entries(SERVERS_KEY)?
                .iter()
                .map(|(name, value)| decode_stdio_entry(name, value, ENTRY_FIELDS, warnings))
                .collect()
        })
    }
}

impl ConfigWriter for CodexClient {
    fn validate_compat(&self, config: &Configuration) -> ValidationOutcome {
        check_keyed_servers(self.id(), config)
    }

    fn write(&self, config: &Configuration, path: &Path) -> ConversionOutcome {
        write_document(self, config, path, ConfigFormat::Toml, |config| {
            servers_document(SERVERS_KEY, config, render_server)
        })
    }
}

fn render_server(server: &Server) -> Value {
    Value::Object(stdio_entry(server))
}
