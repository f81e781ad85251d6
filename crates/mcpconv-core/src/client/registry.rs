//! Agent registry mapping lower-cased agent names to parsers and writers.
//!
//! The registry is built once and only read afterwards, so a shared
//! reference can serve concurrent conversions.

use std::collections::BTreeMap;

use super::{
    ClaudeCodeClient, CodexClient, ConfigParser, ConfigWriter, CursorClient, OpenCodeClient,
    RooCodeClient, VsCodeClient,
};

/// Registry of available parsers and writers, keyed by agent name.
#[derive(Default)]
pub struct AgentRegistry {
    parsers: BTreeMap<String, Box<dyn ConfigParser>>,
    writers: BTreeMap<String, Box<dyn ConfigWriter>>,
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("parsers", &self.source_agents())
            .field("writers", &self.target_agents())
            .finish()
    }
}

impl AgentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in agent as both source and target.
    pub fn with_builtin_agents() -> Self {
        let mut registry = Self::new();
        for parser in builtin_parsers() {
            registry.register_parser(parser);
        }
        for writer in builtin_writers() {
            registry.register_writer(writer);
        }
        registry
    }

    /// Register a parser under its lower-cased agent name.
    ///
    /// A parser already registered under the same name is replaced.
    pub fn register_parser(&mut self, parser: Box<dyn ConfigParser>) {
        let key = parser.id().to_lowercase();
        if self.parsers.insert(key.clone(), parser).is_some() {
            tracing::warn!(agent = %key, "replacing previously registered parser");
        }
    }

    /// Register a writer under its lower-cased agent name.
    ///
    /// A writer already registered under the same name is replaced.
    pub fn register_writer(&mut self, writer: Box<dyn ConfigWriter>) {
        let key = writer.id().to_lowercase();
        if self.writers.insert(key.clone(), writer).is_some() {
            tracing::warn!(agent = %key, "replacing previously registered writer");
        }
    }

    /// Case-insensitive parser lookup.
    pub fn parser(&self, agent: &str) -> Option<&dyn ConfigParser> {
        self.parsers.get(&agent.to_lowercase()).map(|p| p.as_ref())
    }

    /// Case-insensitive writer lookup.
    pub fn writer(&self, agent: &str) -> Option<&dyn ConfigWriter> {
        self.writers.get(&agent.to_lowercase()).map(|w| w.as_ref())
    }

    /// Registered source agent names, sorted alphabetically.
    pub fn source_agents(&self) -> Vec<String> {
        self.parsers.keys().cloned().collect()
    }

    /// Registered target agent names, sorted alphabetically.
    pub fn target_agents(&self) -> Vec<String> {
        self.writers.keys().cloned().collect()
    }
}

/// Parsers for every built-in agent.
pub fn builtin_parsers() -> Vec<Box<dyn ConfigParser>> {
    vec![
        Box::new(CursorClient::new()),
        Box::new(RooCodeClient::new()),
        Box::new(ClaudeCodeClient::new()),
        Box::new(VsCodeClient::new()),
        Box::new(OpenCodeClient::new()),
        Box::new(CodexClient::new()),
    ]
}

/// Writers for every built-in agent.
pub fn builtin_writers() -> Vec<Box<dyn ConfigWriter>> {
    vec![
        Box::new(CursorClient::new()),
        Box::new(RooCodeClient::new()),
        Box::new(ClaudeCodeClient::new()),
        Box::new(VsCodeClient::new()),
        Box::new(OpenCodeClient::new()),
        Box::new(CodexClient::new()),
    ]
}
