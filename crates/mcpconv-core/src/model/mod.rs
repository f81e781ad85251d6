//! Agent-agnostic MCP configuration model.
//!
//! Every conversion passes through [`Configuration`]: parsers build one from
//! an agent's file, writers render one into another agent's file.

mod outcome;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use outcome::{ConversionOutcome, ValidationOutcome};

/// Version tag assigned to freshly parsed configurations.
pub const DEFAULT_VERSION: &str = "1.0";

/// An agent-agnostic set of MCP servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Free-form version tag (blank is reported as a warning)
    #[serde(default = "default_version")]
    pub version: String,

    /// Servers in source enumeration order
    #[serde(default)]
    pub servers: Vec<Server>,

    /// Agent-specific properties that have no common field
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: default_version(),
            servers: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

impl Configuration {
    pub fn new(servers: Vec<Server>) -> Self {
        Self {
            servers,
            ..Self::default()
        }
    }

    /// Look up a server by its exact (case-sensitive) name.
    pub fn server(&self, name: &str) -> Option<&Server> {
        self.servers.iter().find(|s| s.name == name)
    }

    pub fn server_names(&self) -> Vec<&str> {
        self.servers.iter().map(|s| s.name.as_str()).collect()
    }
}

/// A single runnable MCP server entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Server {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_uses_default_version() {
        let config = Configuration::default();
        assert_eq!(config.version, "1.0");
        assert!(config.servers.is_empty());
        assert!(config.metadata.is_empty());
    }

    #[test]
    fn server_builder_collects_args_and_env() {
        let server = Server::new("fs", "npx")
            .with_args(["-y", "server-fs"])
            .with_env("ROOT", "/tmp");

        assert_eq!(server.args, vec!["-y", "server-fs"]);
        assert_eq!(server.env.get("ROOT").map(String::as_str), Some("/tmp"));
    }

    #[test]
    fn server_lookup_is_case_sensitive() {
        let config = Configuration::new(vec![Server::new("Docs", "docs-server")]);
        assert!(config.server("Docs").is_some());
        assert!(config.server("docs").is_none());
    }

    #[test]
    fn deserialize_fills_missing_containers() {
        let config: Configuration =
            serde_json::from_str(r#"{"servers":[{"name":"a","command":"run"}]}"#)
                .expect("configuration should deserialize");

        assert_eq!(config.version, "1.0");
        assert!(config.servers[0].args.is_empty());
        assert!(config.servers[0].env.is_empty());
    }
}
