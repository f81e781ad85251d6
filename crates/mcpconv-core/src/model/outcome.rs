//! Result snapshots returned by validators, parsers, writers and the engine.
//!
//! Errors and warnings are plain human-readable strings. An outcome carrying
//! any error is a failure; a successful outcome carries no errors.

use super::Configuration;

/// Result of a structural or target-compatibility check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn valid(warnings: Vec<String>) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings,
        }
    }

    /// An invalid outcome. Warnings are dropped: they only mean something on
    /// a valid configuration.
    pub fn invalid(errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty(), "invalid outcome without errors");
        Self {
            valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Valid when `errors` is empty, invalid otherwise.
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::valid(warnings)
        } else {
            Self::invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

/// Result of a parse, a write, or a whole conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    success: bool,
    config: Option<Configuration>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ConversionOutcome {
    pub fn success(config: Configuration, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            config: Some(config),
            errors: Vec::new(),
            warnings,
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty(), "failed outcome without errors");
        Self {
            success: false,
            config: None,
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn failure_message(message: impl Into<String>) -> Self {
        Self::failure(vec![message.into()])
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn config(&self) -> Option<&Configuration> {
        self.config.as_ref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Split into `(config, errors, warnings)`.
    pub fn into_parts(self) -> (Option<Configuration>, Vec<String>, Vec<String>) {
        (self.config, self.errors, self.warnings)
    }
}

impl From<crate::error::ConversionError> for ConversionOutcome {
    fn from(err: crate::error::ConversionError) -> Self {
        Self::failure_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Server;

    #[test]
    fn from_findings_with_errors_discards_warnings() {
        let outcome = ValidationOutcome::from_findings(
            vec!["broken".to_string()],
            vec!["minor".to_string()],
        );
        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors(), ["broken"]);
        assert!(outcome.warnings().is_empty());
    }

    #[test]
    fn from_findings_without_errors_is_valid() {
        let outcome = ValidationOutcome::from_findings(Vec::new(), vec!["minor".to_string()]);
        assert!(outcome.is_valid());
        assert_eq!(outcome.warnings(), ["minor"]);
    }

    #[test]
    fn failure_has_no_config() {
        let outcome = ConversionOutcome::failure_message("nope");
        assert!(!outcome.is_success());
        assert!(outcome.config().is_none());
        assert_eq!(outcome.errors(), ["nope"]);
    }

    #[test]
    fn success_carries_config_and_warnings() {
        let config = Configuration::new(vec![Server::new("a", "run")]);
        let outcome = ConversionOutcome::success(config.clone(), vec!["w".to_string()]);

        assert!(outcome.is_success());
        assert!(outcome.errors().is_empty());
        let (parsed, errors, warnings) = outcome.into_parts();
        assert_eq!(parsed, Some(config));
        assert!(errors.is_empty());
        assert_eq!(warnings, vec!["w"]);
    }
}
