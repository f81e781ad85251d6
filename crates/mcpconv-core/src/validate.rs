//! Agent-independent structural validation of a [`Configuration`].
//!
//! Every rule is checked and every finding reported; only an absent
//! configuration stops validation early. The servers, args and env
//! containers are plain `Vec`/`BTreeMap` values and cannot be absent.

use std::collections::HashMap;

use crate::model::{Configuration, ValidationOutcome};

/// Validates configurations independently of any agent format.
pub trait ConfigValidator: Send + Sync {
    fn validate(&self, config: Option<&Configuration>) -> ValidationOutcome;
}

/// The default validator: version, non-empty servers, per-server name and
/// command, unique names.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralValidator;

impl StructuralValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigValidator for StructuralValidator {
    fn validate(&self, config: Option<&Configuration>) -> ValidationOutcome {
        let Some(config) = config else {
            return ValidationOutcome::invalid(vec!["Configuration cannot be null".to_string()]);
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if config.version.trim().is_empty() {
            warnings.push("Configuration version is not specified".to_string());
        }

        if config.servers.is_empty() {
            errors.push("Configuration must contain at least one server".to_string());
        }

        for (index, server) in config.servers.iter().enumerate() {
            if server.name.trim().is_empty() {
                errors.push(format!("Server at index {index} has no name"));
            }
            if server.command.trim().is_empty() {
                errors.push(format!(
                    "Server '{}' (index {index}) has no command",
                    server.name
                ));
            }
        }

        let duplicates = duplicate_names(config);
        if !duplicates.is_empty() {
            errors.push(format!(
                "Duplicate server names found: {}",
                duplicates.join(", ")
            ));
        }

        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "configuration failed validation");
        }
        ValidationOutcome::from_findings(errors, warnings)
    }
}

/// Names used more than once, in order of first appearance.
fn duplicate_names(config: &Configuration) -> Vec<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for server in &config.servers {
        *counts.entry(server.name.as_str()).or_default() += 1;
    }

    let mut duplicates = Vec::new();
    for server in &config.servers {
        let name = server.name.as_str();
        if counts.get(name).is_some_and(|count| *count > 1) && !duplicates.contains(&name) {
            duplicates.push(name);
        }
    }
    duplicates
}
