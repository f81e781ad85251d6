//! mcpconv - MCP configuration converter
//!
//! Usage:
//!   mcpconv convert -f cursor -t codex -i .cursor/mcp.json -o ~/.codex/config.toml
//!   mcpconv agents    # List supported agents

mod convert;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcpconv_core::engine::ConversionEngine;

use crate::convert::{ConvertFlow, ConvertOptions, ConvertStatus, TerminalPrompt};

#[derive(Parser)]
#[command(name = "mcpconv")]
#[command(about = "Convert MCP server configurations between AI coding agents", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert MCP configuration from one agent format to another
    Convert(ConvertArgs),

    /// List supported source and target agents
    Agents,
}

#[derive(Args)]
struct ConvertArgs {
    /// Source agent format (e.g., cursor)
    #[arg(short, long)]
    from: String,

    /// Target agent format (e.g., roocode)
    #[arg(short, long)]
    to: String,

    /// Path to the source configuration file
    #[arg(short, long)]
    input: PathBuf,

    /// Path where the converted configuration should be written
    #[arg(short, long)]
    output: PathBuf,

    /// Validate both input and output configurations
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    validate: bool,

    /// Fail if any features cannot be converted (treats warnings as errors)
    #[arg(long)]
    strict: bool,

    /// Overwrite output file without prompting
    #[arg(long)]
    force: bool,
}

impl From<ConvertArgs> for ConvertOptions {
    fn from(args: ConvertArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            input: args.input,
            output: args.output,
            validate: args.validate,
            strict: args.strict,
            force: args.force,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run_cli(cli.command) {
        Ok(code) => code,
        Err(err) => {
            println!();
            println!(
                "{}",
                style("ERROR: Unexpected error during conversion").red()
            );
            println!("{}", style(format!("  {err:#}")).red());
            ExitCode::FAILURE
        }
    }
}

fn run_cli(command: Commands) -> Result<ExitCode> {
    let engine = ConversionEngine::with_default_agents();
    tracing::debug!(?engine, "engine ready");
    match command {
        Commands::Convert(args) => {
            let options = ConvertOptions::from(args);
            let status = ConvertFlow::new(&engine, TerminalPrompt::new()).run(&options)?;
            Ok(exit_code(status))
        }
        Commands::Agents => {
            print_agents(&engine);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(status: ConvertStatus) -> ExitCode {
    if status.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_agents(engine: &ConversionEngine) {
    println!("{}", style("Source agents:").bold());
    for agent in engine.list_source_agents() {
        println!("  {agent}");
    }
    println!();
    println!("{}", style("Target agents:").bold());
    for agent in engine.list_target_agents() {
        println!("  {agent}");
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn convert_parses_short_flags() {
        let args = [
            "mcpconv", "convert", "-f", "cursor", "-t", "roocode", "-i", "in.json", "-o",
            "out.json",
        ];

        let cli = Cli::try_parse_from(args).unwrap();
        let Commands::Convert(convert) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(convert.from, "cursor");
        assert_eq!(convert.to, "roocode");
        assert_eq!(convert.input.to_str(), Some("in.json"));
        assert_eq!(convert.output.to_str(), Some("out.json"));
        assert!(convert.validate);
        assert!(!convert.strict);
        assert!(!convert.force);
    }

    #[test]
    fn convert_parses_long_flags() {
        let args = [
            "mcpconv",
            "convert",
            "--from",
            "codex",
            "--to",
            "vscode",
            "--input",
            "config.toml",
            "--output",
            ".vscode/mcp.json",
            "--strict",
            "--force",
            "--validate",
            "false",
        ];

        let cli = Cli::try_parse_from(args).unwrap();
        let Commands::Convert(convert) = cli.command else {
            panic!("expected convert command");
        };
        assert!(convert.strict);
        assert!(convert.force);
        assert!(!convert.validate);
    }

    #[test]
    fn convert_requires_all_paths() {
        let args = ["mcpconv", "convert", "-f", "cursor", "-t", "roocode"];

        let result = std::panic::catch_unwind(|| Cli::try_parse_from(args));
        assert!(result.is_ok(), "CLI parsing should not panic");
        assert!(result.unwrap().is_err(), "missing paths should be rejected");
    }

    #[test]
    fn agents_parses_with_global_verbose() {
        let cli = Cli::try_parse_from(["mcpconv", "agents", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Agents));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["mcpconv"]).is_err());
    }
}
