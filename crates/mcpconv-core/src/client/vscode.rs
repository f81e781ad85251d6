//! VS Code (GitHub Copilot) client implementation.
//!
//! VS Code reads `.vscode/mcp.json` and uses `servers` instead of
//! `mcpServers`:
//! `{ "servers": { "<name>": { "type": "stdio", "command", "args", "env" } } }`

use std::path::Path;

use serde_json::Value;

use crate::client::{
    Agent, ConfigParser, ConfigWriter, check_keyed_servers, decode_typed_stdio_entry,
    parse_document, servers_document, typed_stdio_entry, write_document,
};
use crate::format::ConfigFormat;
use crate::model::{Configuration, ConversionOutcome, Server, ValidationOutcome};

const SERVERS_KEY: &str = "servers";
const STDIO_TYPE: &str = "stdio";
const ENTRY_FIELDS: &[&str] = &["type", "command", "args", "env"];

#[derive(Debug, Default)]
pub struct VsCodeClient;

impl VsCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for VsCodeClient {
    fn id(&self) -> &'static str {
        "vscode"
    }
}

impl ConfigParser for VsCodeClient {
    fn parse(&self, path: &Path) -> ConversionOutcome {
        parse_document(self.id(), path, ConfigFormat::Json, |document, warnings| {
            // Top-level `inputs` (prompted secrets) have no common equivalent
            if document.root().contains_key("inputs") {
                warnings.push("Top-level 'inputs' is not supported and will be dropped".to_string());
            }
            document.table_entries(SERVERS_KEY)?
                .iter()
                .map(|(name, value)| {
                    decode_typed_stdio_entry(name, value, STDIO_TYPE, ENTRY_FIELDS, warnings)
                })
                .collect()
        })
    }
}

impl ConfigWriter for VsCodeClient {
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
    Value::Object(typed_stdio_entry(server, STDIO_TYPE))
}
