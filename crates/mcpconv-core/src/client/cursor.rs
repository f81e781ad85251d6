//! Cursor client implementation.
//!
//! Cursor reads `.cursor/mcp.json` (project) or `~/.cursor/mcp.json` (global):
//! `{ "mcpServers": { "<name>": { "command", "args", "env" } } }`

use std::path::Path;

use serde_json::Value;

use crate::client::{
    Agent, ConfigParser, ConfigWriter, check_keyed_servers, decode_stdio_entry, parse_document,
    servers_document, stdio_entry, write_document,
};
use crate::format::ConfigFormat;
use crate::model::{Configuration, ConversionOutcome, Server, ValidationOutcome};

const SERVERS_KEY: &str = "mcpServers";
const ENTRY_FIELDS: &[&str] = &["command", "args", "env"];

#[derive(Debug, Default)]
pub struct CursorClient;

impl CursorClient {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for CursorClient {
    fn id(&self) -> &'static str {
        "cursor"
    }
}

impl ConfigParser for CursorClient {
    fn parse(&self, path: &Path) -> ConversionOutcome {
        parse_document(self.id(), path, ConfigFormat::Json, |document, warnings| {
            document.table_entries(SERVERS_KEY)?
                .iter()
                .map(|(name, value)| decode_stdio_entry(name, value, ENTRY_FIELDS, warnings))
                .collect()
        })
    }
}

impl ConfigWriter for CursorClient {
    fn validate_compat(&self, config: &Configuration) -> ValidationOutcome {
        check_keyed_servers(self.id(), config)
    }

    fn write(&self, config: &Configuration, path: &Path) -> ConversionOutcome {
        write_document(self, config, path, ConfigFormat::Json, |config| {
            servers_document(SERVERS_KEY, config, render_server)
        })
    }
}

fn render_server(server: &Server) -> Value {
    Value::Object(stdio_entry(server))
}
