//! Roo Code client implementation.
//!
//! Roo Code keeps servers in `.roo/mcp.json` (project) or its global
//! `mcp_settings.json`, both shaped as
//! `{ "mcpServers": { "<name>": { "command", "args", "env", ... } } }`.
//! Roo-specific fields (`disabled`, `alwaysAllow`, `timeout`) have no common
//! equivalent and are reported as dropped.

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
pub struct RooCodeClient;

impl RooCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for RooCodeClient {
    fn id(&self) -> &'static str {
        "roocode"
    }
}

impl ConfigParser for RooCodeClient {
    fn parse(&self, path: &Path) -> ConversionOutcome {
        parse_document(self.id(), path, ConfigFormat::Json, |document, warnings| {
            document.table_entries(SERVERS_KEY)?
                .iter()
                .map(|(name, value)| decode_stdio_entry(name, value, ENTRY_FIELDS, warnings))
                .collect()
        })
    }
}

impl ConfigWriter for RooCodeClient {
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
