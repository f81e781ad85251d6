//! Claude Code client implementation.
//!
//! Project servers live in `.mcp.json`, user servers in `~/.claude.json`,
//! both under `mcpServers`. Entries carry `"type": "stdio"`; remote
//! (`http`/`sse`) entries have no common representation.

use std::path::Path;

use serde_json::Value;

use crate::client::{
    Agent, ConfigParser, ConfigWriter, check_keyed_servers, decode_typed_stdio_entry,
    parse_document, servers_document, typed_stdio_entry, write_document,
};
use crate::format::ConfigFormat;
use crate::model::{Configuration, ConversionOutcome, Server, ValidationOutcome};

const SERVERS_KEY: &str = "mcpServers";
const STDIO_TYPE: &str = "stdio";
const ENTRY_FIELDS: &[&str] = &["type", "command", "args", "env"];

#[derive(Debug, Default)]
pub struct ClaudeCodeClient;

impl ClaudeCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for ClaudeCodeClient {
    fn id(&self) -> &'static str {
        "claude-code"
    }
}

impl ConfigParser for ClaudeCodeClient {
    fn parse(&self, path: &Path) -> ConversionOutcome {
        parse_document(self.id(), path, ConfigFormat::Json, |document, warnings| {
            document.table_entries(SERVERS_KEY)?
                .iter()
                .map(|(name, value)| {
                    decode_typed_stdio_entry(name, value, STDIO_TYPE, ENTRY_FIELDS, warnings)
                })
                .collect()
        })
    }
}

impl ConfigWriter for ClaudeCodeClient {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn writes_typed_entries() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join(".mcp.json");
        let config = Configuration::new(vec![
            Server::new("github", "docker")
                .with_args(["run", "-i", "ghcr.io/github/github-mcp-server"])
                .with_env("GITHUB_TOKEN", "${GITHUB_TOKEN}"),
        ]);

        let outcome = ClaudeCodeClient::new().write(&config, &path);

        assert!(outcome.is_success());
        let written: Value =
            serde_json::from_slice(&std::fs::read(&path).expect("read")).expect("json");
        assert_eq!(
            written,
            json!({
                "mcpServers": {
                    "github": {
                        "type": "stdio",
                        "command": "docker",
                        "args": ["run", "-i", "ghcr.io/github/github-mcp-server"],
                        "env": {"GITHUB_TOKEN": "${GITHUB_TOKEN}"}
                    }
                }
            })
        );
    }

    #[test]
    fn remote_entry_without_command_fails() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join(".mcp.json");
        std::fs::write(
            &path,
            r#"{"mcpServers":{"remote":{"type":"http","url":"https://api.example.com/mcp"}}}"#,
        )
        .expect("write");

        let outcome = ClaudeCodeClient::new().parse(&path);

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.errors(),
            ["Server 'remote' is missing required field 'command'"]
        );
    }

    #[test]
    fn stdio_type_is_accepted_silently() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join(".mcp.json");
        std::fs::write(
            &path,
            r#"{"mcpServers":{"local":{"type":"stdio","command":"npx","args":["pkg@1.2.3"]}}}"#,
        )
        .expect("write");

        let outcome = ClaudeCodeClient::new().parse(&path);

        assert!(outcome.is_success());
        assert!(outcome.warnings().is_empty());
        assert_eq!(outcome.config().expect("config").servers[0].args, vec!["pkg@1.2.3"]);
    }
}
