//! Agent adapters: one parser/writer pair per supported client format.
//!
//! Provides:
//! - The [`ConfigParser`] and [`ConfigWriter`] capability traits
//! - Built-in clients (Cursor, Roo Code, Claude Code, VS Code, OpenCode, Codex)
//! - Shared decoding/encoding helpers for name-keyed server tables

pub mod claude_code;
pub mod codex;
pub mod cursor;
pub mod opencode;
pub mod registry;
pub mod roocode;
pub mod vscode;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde_json::{Map, Value, json};

use crate::error::{ConversionError, Result};
use crate::format::{ConfigFormat, Document, serializer_for_format};
use crate::model::{Configuration, ConversionOutcome, Server, ValidationOutcome};

pub use claude_code::ClaudeCodeClient;
pub use codex::CodexClient;
pub use cursor::CursorClient;
pub use opencode::OpenCodeClient;
pub use registry::AgentRegistry;
pub use roocode::RooCodeClient;
pub use vscode::VsCodeClient;

/// Format versions understood by the built-in parsers.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// Common identity of every agent adapter.
pub trait Agent: Send + Sync {
    /// Agent name used for registry lookup (e.g. "cursor").
    fn id(&self) -> &'static str;
}

/// Reads an agent-specific file into a [`Configuration`].
pub trait ConfigParser: Agent {
    /// Format version tags this parser understands (informational).
    fn supported_versions(&self) -> &'static [&'static str] {
        SUPPORTED_VERSIONS
    }

    fn parse(&self, path: &Path) -> ConversionOutcome;
}

/// Renders a [`Configuration`] into an agent-specific file.
pub trait ConfigWriter: Agent {
    /// Check that `config` can be expressed in this agent's format.
    fn validate_compat(&self, config: &Configuration) -> ValidationOutcome;

    /// Validate, then write `config` to `path`, replacing any existing file.
    fn write(&self, config: &Configuration, path: &Path) -> ConversionOutcome;
}

/// Load `path` with `format` and turn the document into a configuration.
///
/// `decode` receives the loaded document and a warning sink; any error it
/// returns aborts the parse without a partial configuration.
pub(crate) fn parse_document<F>(
    agent: &str,
    path: &Path,
    format: ConfigFormat,
    decode: F,
) -> ConversionOutcome
where
    F: FnOnce(&Document, &mut Vec<String>) -> Result<Vec<Server>>,
{
    tracing::debug!(agent, path = %path.display(), %format, "parsing config");
    let mut warnings = Vec::new();
    let parsed = serializer_for_format(format)
        .load_document(path)
        .and_then(|document| decode(&document, &mut warnings));

    match parsed {
        Ok(servers) => {
            tracing::debug!(agent, servers = servers.len(), "parsed config");
            ConversionOutcome::success(Configuration::new(servers), warnings)
        }
        Err(err) => {
            tracing::debug!(agent, error = %err, "parse failed");
            err.into()
        }
    }
}

/// Run the writer's compatibility check, then save `document(config)`.
pub(crate) fn write_document<W, F>(
    writer: &W,
    config: &Configuration,
    path: &Path,
    format: ConfigFormat,
    document: F,
) -> ConversionOutcome
where
    W: ConfigWriter + ?Sized,
    F: FnOnce(&Configuration) -> Map<String, Value>,
{
    let validation = writer.validate_compat(config);
    if !validation.is_valid() {
        return ConversionOutcome::failure(validation.into_errors());
    }

    let root = document(config);
    match serializer_for_format(format).save(path, &root) {
        Ok(()) => {
            tracing::debug!(agent = writer.id(), path = %path.display(), "wrote config");
            ConversionOutcome::success(config.clone(), Vec::new())
        }
        Err(err) => ConversionOutcome::failure_message(format!("Error writing config: {err}")),
    }
}

pub(crate) fn entry_object<'a>(name: &str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ConversionError::ServerNotObject(name.to_string()))
}

/// Decode a `{command, args, env}` entry.
pub(crate) fn decode_stdio_entry(
    name: &str,
    value: &Value,
    known_fields: &[&str],
    warnings: &mut Vec<String>,
) -> Result<Server> {
    let entry = entry_object(name, value)?;
    warn_unsupported_fields(name, entry, known_fields, warnings);

    Ok(Server {
        name: name.to_string(),
        command: read_command(name, entry)?,
        args: read_string_list(name, entry, "args", warnings),
        env: read_string_map(name, entry, "env", warnings),
    })
}

/// Decode an entry that may carry a `type` discriminator. Only stdio
/// servers have a common representation; any other type is reported and the
/// entry is decoded as stdio (it fails if there is no `command`).
pub(crate) fn decode_typed_stdio_entry(
    name: &str,
    value: &Value,
    stdio_type: &str,
    known_fields: &[&str],
    warnings: &mut Vec<String>,
) -> Result<Server> {
    if let Some(kind) = value.get("type").and_then(Value::as_str)
        && kind != stdio_type
    {
        warnings.push(format!(
            "Server '{name}': transport type '{kind}' is not supported and will be treated as {stdio_type}"
        ));
    }
    decode_stdio_entry(name, value, known_fields, warnings)
}

/// Required `command` field. `null` reads as an empty command, which the
/// validator rejects later.
pub(crate) fn read_command(name: &str, entry: &Map<String, Value>) -> Result<String> {
    match entry.get("command") {
        None => Err(ConversionError::MissingCommand(name.to_string())),
        Some(Value::Null) => Ok(String::new()),
        Some(Value::String(command)) => Ok(command.clone()),
        Some(_) => Err(ConversionError::InvalidCommand(name.to_string())),
    }
}

/// Optional list of strings. Anything unusable is dropped with a warning.
pub(crate) fn read_string_list(
    name: &str,
    entry: &Map<String, Value>,
    field: &str,
    warnings: &mut Vec<String>,
) -> Vec<String> {
    match entry.get(field) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => collect_strings(name, field, items, warnings),
        Some(_) => {
            warnings.push(format!(
                "Server '{name}': field '{field}' is not an array and was ignored"
            ));
            Vec::new()
        }
    }
}

pub(crate) fn collect_strings(
    name: &str,
    field: &str,
    items: &[Value],
    warnings: &mut Vec<String>,
) -> Vec<String> {
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => values.push(s.to_string()),
            None => warnings.push(format!(
                "Server '{name}': ignoring non-string value {item} in '{field}'"
            )),
        }
    }
    values
}

/// Optional string-to-string map. Non-string values are dropped with a warning.
pub(crate) fn read_string_map(
    name: &str,
    entry: &Map<String, Value>,
    field: &str,
    warnings: &mut Vec<String>,
) -> BTreeMap<String, String> {
    match entry.get(field) {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(map)) => {
            let mut values = BTreeMap::new();
            for (key, value) in map {
                match value.as_str() {
                    Some(s) => {
                        values.insert(key.clone(), s.to_string());
                    }
                    None => warnings.push(format!(
                        "Server '{name}': ignoring non-string value for '{field}.{key}'"
                    )),
                }
            }
            values
        }
        Some(_) => {
            warnings.push(format!(
                "Server '{name}': field '{field}' is not an object and was ignored"
            ));
            BTreeMap::new()
        }
    }
}

/// Warn about entry fields the domain model cannot carry.
pub(crate) fn warn_unsupported_fields(
    name: &str,
    entry: &Map<String, Value>,
    known_fields: &[&str],
    warnings: &mut Vec<String>,
) {
    for key in entry.keys() {
        if !known_fields.contains(&key.as_str()) {
            warnings.push(format!(
                "Server '{name}': field '{key}' is not supported and will be dropped"
            ));
        }
    }
}

/// Render `{command, args?, env?}`; empty containers are omitted.
pub(crate) fn stdio_entry(server: &Server) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("command".to_string(), json!(server.command));
    if !server.args.is_empty() {
        obj.insert("args".to_string(), json!(server.args));
    }
    if !server.env.is_empty() {
        obj.insert("env".to_string(), json!(server.env));
    }
    obj
}

/// Render `{type, command, args?, env?}` for formats that tag the transport.
pub(crate) fn typed_stdio_entry(server: &Server, stdio_type: &str) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("type".to_string(), json!(stdio_type));
    obj.extend(stdio_entry(server));
    obj
}

/// Build `{ key: { name: entry, ... } }` in configuration order.
pub(crate) fn servers_document<F>(key: &str, config: &Configuration, render: F) -> Map<String, Value>
where
    F: Fn(&Server) -> Value,
{
    let mut servers = Map::new();
    for server in &config.servers {
        servers.insert(server.name.clone(), render(server));
    }
    let mut root = Map::new();
    root.insert(key.to_string(), Value::Object(servers));
    root
}

/// Minimum every name-keyed format needs: at least one server, each with a
/// name and a command, and names distinct enough to be object keys.
pub(crate) fn check_keyed_servers(agent: &str, config: &Configuration) -> ValidationOutcome {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.servers.is_empty() {
        errors.push("Configuration must contain at least one server".to_string());
    }

    let mut seen = HashSet::new();
    for server in &config.servers {
        if server.name.trim().is_empty() {
            errors.push("Server name cannot be empty".to_string());
        } else if !seen.insert(server.name.as_str()) {
            errors.push(format!(
                "Server name '{}' appears more than once and cannot be keyed in {agent} format",
                server.name
            ));
        }

        if server.command.trim().is_empty() {
            errors.push(format!("Server '{}' must have a command", server.name));
        }
    }

    if !config.metadata.is_empty() {
        let keys: Vec<_> = config.metadata.keys().map(String::as_str).collect();
        warnings.push(format!(
            "Metadata ({}) is not supported by the {agent} format and will be dropped",
            keys.join(", ")
        ));
    }

    ValidationOutcome::from_findings(errors, warnings)
}
