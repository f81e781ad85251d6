//! Conversion pipeline: parse, validate, check target compatibility, write.

use std::path::Path;

use crate::client::registry::{builtin_parsers, builtin_writers};
use crate::client::{AgentRegistry, ConfigParser, ConfigWriter};
use crate::model::ConversionOutcome;
use crate::validate::{ConfigValidator, StructuralValidator};

/// Orchestrates a conversion between two registered agents.
///
/// The engine holds no mutable state after construction; a shared reference
/// can run independent conversions from several threads.
pub struct ConversionEngine {
    registry: AgentRegistry,
    validator: Box<dyn ConfigValidator>,
}

impl std::fmt::Debug for ConversionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionEngine")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::with_default_agents()
    }
}

impl ConversionEngine {
    /// Build an engine from explicit parsers and writers. Names are
    /// lower-cased; a later entry replaces an earlier one with the same name.
    pub fn new(
        parsers: Vec<Box<dyn ConfigParser>>,
        writers: Vec<Box<dyn ConfigWriter>>,
        validator: Box<dyn ConfigValidator>,
    ) -> Self {
        let mut registry = AgentRegistry::new();
        for parser in parsers {
            registry.register_parser(parser);
        }
        for writer in writers {
            registry.register_writer(writer);
        }
        Self::from_registry(registry, validator)
    }

    pub fn from_registry(registry: AgentRegistry, validator: Box<dyn ConfigValidator>) -> Self {
        Self {
            registry,
            validator,
        }
    }

    /// Engine with every built-in agent and the structural validator.
    pub fn with_default_agents() -> Self {
        Self::new(
            builtin_parsers(),
            builtin_writers(),
            Box::new(StructuralValidator::new()),
        )
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Convert `input` (in `source` format) into `output` (in `target` format).
    ///
    /// With `strict`, any warning collected before the write fails the
    /// conversion and nothing is written.
    pub fn convert(
        &self,
        source: &str,
        target: &str,
        input: &Path,
        output: &Path,
        strict: bool,
    ) -> ConversionOutcome {
        let Some(parser) = self.registry.parser(source) else {
            return ConversionOutcome::failure(vec![
                format!("No parser found for agent '{source}'"),
                format!(
                    "Available source agents: {}",
                    self.list_source_agents().join(", ")
                ),
            ]);
        };
        let Some(writer) = self.registry.writer(target) else {
            return ConversionOutcome::failure(vec![
                format!("No writer found for agent '{target}'"),
                format!(
                    "Available target agents: {}",
                    self.list_target_agents().join(", ")
                ),
            ]);
        };

        tracing::info!(
            source = parser.id(),
            target = writer.id(),
            input = %input.display(),
            output = %output.display(),
            strict,
            "converting config"
        );

        let parsed = parser.parse(input);
        if !parsed.is_success() {
            return parsed;
        }
        let (config, _, parse_warnings) = parsed.into_parts();
        let Some(config) = config else {
            return ConversionOutcome::failure_message("Parser returned no configuration");
        };

        let validation = self.validator.validate(Some(&config));
        if !validation.is_valid() {
            tracing::debug!("source config failed structural validation");
            return ConversionOutcome::failure(validation.into_errors());
        }

        let compat = writer.validate_compat(&config);
        if !compat.is_valid() {
            tracing::debug!(target = writer.id(), "config is not compatible with target");
            let mut errors = vec![format!(
                "Configuration is not compatible with {} format",
                writer.id()
            )];
            errors.extend(compat.into_errors());
            return ConversionOutcome::failure(errors);
        }

        let mut warnings = parse_warnings;
        warnings.extend(validation.into_warnings());
        warnings.extend(compat.into_warnings());

        if !warnings.is_empty() {
            if strict {
                tracing::debug!(warnings = warnings.len(), "strict mode rejected conversion");
                let mut errors = vec![format!(
                    "Conversion failed in strict mode due to {} warning(s)",
                    warnings.len()
                )];
                errors.extend(warnings);
                return ConversionOutcome::failure(errors);
            }
            for warning in &warnings {
                tracing::debug!(%warning, "conversion warning");
            }
        }

        let written = writer.write(&config, output);
        if !written.is_success() {
            return written;
        }
        let (_, _, write_warnings) = written.into_parts();
        warnings.extend(write_warnings);

        tracing::info!(
            servers = config.servers.len(),
            warnings = warnings.len(),
            "conversion complete"
        );
        ConversionOutcome::success(config, warnings)
    }

    /// Re-read a written file with the target agent's parser and validate it.
    pub fn verify_output(&self, target: &str, output: &Path) -> ConversionOutcome {
        let Some(parser) = self.registry.parser(target) else {
            return ConversionOutcome::failure_message(format!(
                "No parser found for agent '{target}'"
            ));
        };

        tracing::debug!(agent = parser.id(), path = %output.display(), "verifying output");
        let parsed = parser.parse(output);
        if !parsed.is_success() {
            return parsed;
        }
        let (config, _, mut warnings) = parsed.into_parts();
        let Some(config) = config else {
            return ConversionOutcome::failure_message("Parser returned no configuration");
        };

        let validation = self.validator.validate(Some(&config));
        if !validation.is_valid() {
            return ConversionOutcome::failure(validation.into_errors());
        }
        warnings.extend(validation.into_warnings());
        ConversionOutcome::success(config, warnings)
    }

    /// Registered source agent names, sorted alphabetically.
    pub fn list_source_agents(&self) -> Vec<String> {
        self.registry.source_agents()
    }

    /// Registered target agent names, sorted alphabetically.
    pub fn list_target_agents(&self) -> Vec<String> {
        self.registry.target_agents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Agent, CursorClient};
    use crate::model::{Configuration, Server, ValidationOutcome};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Parser returning a fixed outcome regardless of path.
    struct FixedParser {
        outcome: ConversionOutcome,
    }

    impl Agent for FixedParser {
        fn id(&self) -> &'static str {
            "fixed"
        }
    }

    impl ConfigParser for FixedParser {
        fn parse(&self, _path: &Path) -> ConversionOutcome {
            self.outcome.clone()
        }
    }

    /// Writer with scripted compatibility findings that records whether
    /// `write` ran.
    struct RecordingWriter {
        compat: ValidationOutcome,
        wrote: Arc<AtomicBool>,
    }

    impl Agent for RecordingWriter {
        fn id(&self) -> &'static str {
            "recorder"
        }
    }

    impl ConfigWriter for RecordingWriter {
        fn validate_compat(&self, _config: &Configuration) -> ValidationOutcome {
            self.compat.clone()
        }

        fn write(&self, config: &Configuration, _path: &Path) -> ConversionOutcome {
            self.wrote.store(true, Ordering::SeqCst);
            ConversionOutcome::success(config.clone(), vec!["written".to_string()])
        }
    }

    fn engine(
        parsed: ConversionOutcome,
        compat: ValidationOutcome,
    ) -> (ConversionEngine, Arc<AtomicBool>) {
        let wrote = Arc::new(AtomicBool::new(false));
        let engine = ConversionEngine::new(
            vec![Box::new(FixedParser { outcome: parsed })],
            vec![Box::new(RecordingWriter {
                compat,
                wrote: Arc::clone(&wrote),
            })],
            Box::new(StructuralValidator::new()),
        );
        (engine, wrote)
    }

    fn sample() -> Configuration {
        Configuration::new(vec![Server::new("fs", "npx")])
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn run(engine: &ConversionEngine, strict: bool) -> ConversionOutcome {
        engine.convert(
            "fixed",
            "recorder",
            Path::new("in.json"),
            Path::new("out.json"),
            strict,
        )
    }

    #[test]
    fn unknown_source_lists_available_agents() {
        let engine = ConversionEngine::with_default_agents();
        let outcome = engine.convert(
            "nonexistent",
            "cursor",
            Path::new("in.json"),
            Path::new("out.json"),
            false,
        );

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.errors(),
            [
                "No parser found for agent 'nonexistent'",
                "Available source agents: claude-code, codex, cursor, opencode, roocode, vscode",
            ]
        );
    }

    #[test]
    fn unknown_target_lists_available_agents() {
        let (engine, wrote) = engine(
            ConversionOutcome::success(sample(), vec![]),
            ValidationOutcome::valid(vec![]),
        );
        let outcome = engine.convert(
            "fixed",
            "nowhere",
            Path::new("in.json"),
            Path::new("out.json"),
            false,
        );

        assert_eq!(
            outcome.errors(),
            [
                "No writer found for agent 'nowhere'",
                "Available target agents: recorder",
            ]
        );
        assert!(!wrote.load(Ordering::SeqCst));
    }

    #[test]
    fn parse_failure_propagates_verbatim() {
        let (engine, wrote) = engine(
            ConversionOutcome::failure_message("Invalid JSON format: boom"),
            ValidationOutcome::valid(vec![]),
        );

        let outcome = run(&engine, false);

        assert_eq!(outcome.errors(), ["Invalid JSON format: boom"]);
        assert!(!wrote.load(Ordering::SeqCst));
    }

    #[test]
    fn validation_failure_drops_parser_warnings() {
        let (engine, wrote) = engine(
            ConversionOutcome::success(Configuration::default(), strings(&["parser"])),
            ValidationOutcome::valid(vec![]),
        );

        let outcome = run(&engine, false);

        assert_eq!(
            outcome.errors(),
            ["Configuration must contain at least one server"]
        );
        assert!(outcome.warnings().is_empty());
        assert!(!wrote.load(Ordering::SeqCst));
    }

    #[test]
    fn compat_failure_is_prefixed_with_target() {
        let (engine, wrote) = engine(
            ConversionOutcome::success(sample(), vec![]),
            ValidationOutcome::invalid(strings(&["too many servers"])),
        );

        let outcome = run(&engine, false);

        assert_eq!(
            outcome.errors(),
            [
                "Configuration is not compatible with recorder format",
                "too many servers",
            ]
        );
        assert!(!wrote.load(Ordering::SeqCst));
    }

    #[test]
    fn warnings_merge_in_stage_order() {
        let mut config = sample();
        config.version = String::new();
        let (engine, wrote) = engine(
            ConversionOutcome::success(config, strings(&["parser"])),
            ValidationOutcome::valid(strings(&["compat"])),
        );

        let outcome = run(&engine, false);

        assert!(outcome.is_success());
        assert!(wrote.load(Ordering::SeqCst));
        assert_eq!(
            outcome.warnings(),
            [
                "parser",
                "Configuration version is not specified",
                "compat",
                "written",
            ]
        );
    }

    #[test]
    fn strict_mode_promotes_warnings_to_errors() {
        let (engine, wrote) = engine(
            ConversionOutcome::success(sample(), strings(&["parser"])),
            ValidationOutcome::valid(strings(&["compat"])),
        );

        let outcome = run(&engine, true);

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.errors(),
            [
                "Conversion failed in strict mode due to 2 warning(s)",
                "parser",
                "compat",
            ]
        );
        assert!(!wrote.load(Ordering::SeqCst));
    }

    #[test]
    fn strict_mode_without_warnings_writes() {
        let (engine, wrote) = engine(
            ConversionOutcome::success(sample(), vec![]),
            ValidationOutcome::valid(vec![]),
        );

        let outcome = run(&engine, true);

        assert!(outcome.is_success());
        assert!(wrote.load(Ordering::SeqCst));
        assert_eq!(outcome.config(), Some(&sample()));
    }

    #[test]
    fn verify_output_reparses_written_file() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("mcp.json");
        let written = CursorClient::new().write(&sample(), &path);
        assert!(written.is_success());

        let engine = ConversionEngine::with_default_agents();
        let outcome = engine.verify_output("CURSOR", &path);

        assert!(outcome.is_success());
        assert_eq!(outcome.config(), Some(&sample()));
    }

    #[test]
    fn verify_output_without_parser_fails() {
        let (engine, _) = engine(
            ConversionOutcome::success(sample(), vec![]),
            ValidationOutcome::valid(vec![]),
        );

        let outcome = engine.verify_output("recorder", Path::new("out.json"));

        assert_eq!(outcome.errors(), ["No parser found for agent 'recorder'"]);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConversionEngine>();
    }
}
