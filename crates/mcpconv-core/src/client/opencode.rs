//! OpenCode client implementation.
//!
//! OpenCode keeps servers under `mcp` in `opencode.json`. Local servers put
//! the executable and its arguments in one `command` array and call the
//! environment `environment`:
//! `{ "mcp": { "<name>": { "type": "local", "command": [...], "environment": {...} } } }`

use std::path::Path;

use serde_json::{Map, Value, json};

use crate::client::{
    Agent, ConfigParser, ConfigWriter, check_keyed_servers, collect_strings, entry_object,
    parse_document, read_string_map, servers_document, warn_unsupported_fields,
    write_document,
};
use crate::error::{ConversionError, Result};
use crate::format::ConfigFormat;
use crate::model::{Configuration, ConversionOutcome, Server, ValidationOutcome};

const SCHEMA_URL: &str = "https://opencode.ai/config.json";
const SERVERS_KEY: &str = "mcp";
const LOCAL_TYPE: &str = "local";
const ENTRY_FIELDS: &[&str] = &["type", "command", "environment"];

#[derive(Debug, Default)]
pub struct OpenCodeClient;

impl OpenCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for OpenCodeClient {
    fn id(&self) -> &'static str {
        "opencode"
    }
}

impl ConfigParser for OpenCodeClient {
    fn parse(&self, path: &Path) -> ConversionOutcome {
        parse_document(self.id(), path, ConfigFormat::Json, |document, warnings| {
            document.table_entries(SERVERS_KEY)?
                .iter()
                .map(|(name, value)| decode_entry(name, value, warnings))
                .collect()
        })
    }
}

impl ConfigWriter for OpenCodeClient {
    fn validate_compat(&self, config: &Configuration) -> ValidationOutcome {
        check_keyed_servers(self.id(), config)
    }

    fn write(&self, config: &Configuration, path: &Path) -> ConversionOutcome {
        write_document(self, config, path, ConfigFormat::Json, |config| {
            let mut root = Map::new();
            root.insert("$schema".to_string(), json!(SCHEMA_URL));
            root.extend(servers_document(SERVERS_KEY, config, render_server));
            root
        })
    }
}

fn decode_entry(name: &str, value: &Value, warnings: &mut Vec<String>) -> Result<Server> {
    let entry = entry_object(name, value)?;
    if let Some(kind) = entry.get("type").and_then(Value::as_str)
        && kind != LOCAL_TYPE
    {
        warnings.push(format!(
            "Server '{name}': transport type '{kind}' is not supported and will be treated as {LOCAL_TYPE}"
        ));
    }
    warn_unsupported_fields(name, entry, ENTRY_FIELDS, warnings);

    let (command, args) = match entry.get("command") {
        None => return Err(ConversionError::MissingCommand(name.to_string())),
        Some(Value::Null) => (String::new(), Vec::new()),
        Some(Value::String(command)) => (command.clone(), Vec::new()),
        // The first element is the executable and must be a string; later
        // non-strings are dropped like any other argument
        Some(Value::Array(items)) => match items.split_first() {
            None => (String::new(), Vec::new()),
            Some((Value::String(command), rest)) => (
                command.clone(),
                collect_strings(name, "command", rest, warnings),
            ),
            Some(_) => return Err(ConversionError::InvalidCommand(name.to_string())),
        },
        Some(_) => return Err(ConversionError::InvalidCommand(name.to_string())),
    };

    Ok(Server {
        name: name.to_string(),
        command,
        args,
        env: read_string_map(name, entry, "environment", warnings),
    })
}

fn render_server(server: &Server) -> Value {
    let mut command = vec![server.command.clone()];
    command.extend(server.args.iter().cloned());

    let mut obj = Map::new();
    obj.insert("type".to_string(), json!(LOCAL_TYPE));
    obj.insert("command".to_string(), json!(command));
    if !server.env.is_empty() {
        obj.insert("environment".to_string(), json!(server.env));
    }
    Value::Object(obj)
}
