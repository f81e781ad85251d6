//! The `convert` command flow.
//!
//! Checks the input, asks before overwriting or creating directories, runs
//! the engine and reports errors and warnings. Prompts go through [`Prompt`]
//! so the flow can run against scripted answers in tests.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, theme::ColorfulTheme};

use mcpconv_core::engine::ConversionEngine;

/// Options collected from `mcpconv convert`.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub from: String,
    pub to: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub validate: bool,
    pub strict: bool,
    pub force: bool,
}

/// How a convert run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertStatus {
    Converted,
    Cancelled,
    Failed,
}

impl ConvertStatus {
    pub fn is_failure(self) -> bool {
        matches!(self, ConvertStatus::Failed)
    }
}

/// Yes/no questions asked during a run.
pub trait Prompt {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Terminal prompts via dialoguer.
#[derive(Default)]
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}

pub struct ConvertFlow<'a, P: Prompt, W: Write = io::Stdout> {
    engine: &'a ConversionEngine,
    prompt: P,
    writer: W,
}

impl<'a, P: Prompt> ConvertFlow<'a, P, io::Stdout> {
    pub fn new(engine: &'a ConversionEngine, prompt: P) -> Self {
        Self {
            engine,
            prompt,
            writer: io::stdout(),
        }
    }
}

impl<'a, P: Prompt, W: Write> ConvertFlow<'a, P, W> {
    /// Create a flow with a custom writer (for testing).
    #[cfg(test)]
    pub fn with_writer(engine: &'a ConversionEngine, prompt: P, writer: W) -> Self {
        Self {
            engine,
            prompt,
            writer,
        }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn run(&mut self, options: &ConvertOptions) -> Result<ConvertStatus> {
        let input = options.input.display();
        let output = options.output.display();

        if !options.input.is_file() {
            writeln!(
                self.writer,
                "{}",
                style(format!("ERROR: Input file not found: {input}")).red()
            )?;
            return Ok(ConvertStatus::Failed);
        }

        if options.output.exists() && !options.force {
            let question = format!("Output file '{output}' already exists. Overwrite?");
            if !self.prompt.confirm(&question)? {
                writeln!(self.writer, "Operation cancelled.")?;
                return Ok(ConvertStatus::Cancelled);
            }
        }

        if let Some(dir) = missing_parent(&options.output)
            && !options.force
        {
            let question = format!(
                "Output directory '{}' does not exist. Create it?",
                dir.display()
            );
            if !self.prompt.confirm(&question)? {
                writeln!(self.writer, "Operation cancelled.")?;
                return Ok(ConvertStatus::Cancelled);
            }
        }

        writeln!(self.writer, "Reading config from {input}...")?;
        writeln!(self.writer, "Parsing {} config...", options.from)?;
        writeln!(self.writer, "Converting to {} format...", options.to)?;
        if options.validate {
            writeln!(self.writer, "Validating output...")?;
        }

        let outcome = self.engine.convert(
            &options.from,
            &options.to,
            &options.input,
            &options.output,
            options.strict,
        );

        if !outcome.is_success() {
            self.print_failure("✗ Conversion failed", outcome.errors())?;
            return Ok(ConvertStatus::Failed);
        }

        writeln!(self.writer, "Writing config to {output}...")?;

        if options.validate {
            let verified = self.engine.verify_output(&options.to, &options.output);
            if !verified.is_success() {
                self.print_failure("✗ Output validation failed", verified.errors())?;
                return Ok(ConvertStatus::Failed);
            }
        }

        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{}",
            style(format!(
                "✓ Successfully converted config from {} to {}",
                options.from, options.to
            ))
            .green()
        )?;

        let warnings = outcome.warnings();
        if !warnings.is_empty() {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "{}",
                style(format!("WARNINGS ({}):", warnings.len())).yellow()
            )?;
            for warning in warnings {
                writeln!(self.writer, "{}", style(format!("  - {warning}")).yellow())?;
            }
        }

        Ok(ConvertStatus::Converted)
    }

    fn print_failure(&mut self, headline: &str, errors: &[String]) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", style(headline).red())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{}",
            style(format!("ERRORS ({}):", errors.len())).red()
        )?;
        for error in errors {
            writeln!(self.writer, "{}", style(format!("  - {error}")).red())?;
        }
        Ok(())
    }
}

/// The output's parent directory, if it is named and does not exist yet.
fn missing_parent(output: &Path) -> Option<&Path> {
    output
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty() && !dir.is_dir())
}
