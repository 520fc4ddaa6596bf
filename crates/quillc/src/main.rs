//! The Quill language CLI.
//!
//! Provides the `quillc` command with the following subcommands:
//!
//! - `quillc repl` (also the default with no subcommand) - start the
//!   interactive REPL
//! - `quillc run <path>` - evaluate a source file non-interactively

mod config;
mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use quill_eval::eval_program;
use quill_object::{Environment, Value};
use quill_parser::parse;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::CliConfig;
use error::{QuillCliError, Result};

#[derive(Parser, Debug)]
#[command(name = "quillc", version, about = "The Quill language CLI")]
struct Cli {
    /// Raise the log level from `info` to `debug`.
    #[arg(long, global = true)]
    verbose: bool,

    /// Load configuration from this TOML file instead of the default
    /// search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive REPL.
    Repl,
    /// Evaluate a source file and exit.
    Run {
        /// Path to the `.ql` source file.
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("error: {err}");
        process::exit(1);
    }

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => run_repl(config),
        Commands::Run { path } => run_file(&path),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| QuillCliError::Logging(e.to_string()))
}

fn run_repl(config: CliConfig) -> Result<()> {
    tracing::debug!("starting REPL");
    quill_repl::run_repl(&config.repl)?;
    Ok(())
}

/// Read `path`, parse it, and evaluate it against a fresh environment. A
/// `quillc run` invocation relies on `puts` for any output -- it never
/// prints the value of the trailing expression the way the REPL does.
fn run_file(path: &PathBuf) -> Result<()> {
    let source = std::fs::read_to_string(path).map_err(|source| QuillCliError::ReadSource {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loaded source file");

    let (program, errors) = parse(&source);
    if !errors.is_empty() {
        quill_repl::print_parser_errors(&errors);
        process::exit(1);
    }

    let env = Environment::new();
    let result = eval_program(&program, &env);
    if let Value::Error(message) = result {
        eprintln!("ERROR: {message}");
        process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_repl_command() {
        let cli = Cli::parse_from(["quillc"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_explicit_repl_command() {
        let cli = Cli::parse_from(["quillc", "repl"]);
        assert!(matches!(cli.command, Some(Commands::Repl)));
    }

    #[test]
    fn parses_run_command_with_path() {
        let cli = Cli::parse_from(["quillc", "run", "script.ql"]);
        match cli.command {
            Some(Commands::Run { path }) => assert_eq!(path, PathBuf::from("script.ql")),
            other => panic!("expected Run command, got {:?}", other),
        }
    }

    #[test]
    fn parses_global_verbose_flag() {
        let cli = Cli::parse_from(["quillc", "--verbose", "repl"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parses_global_config_flag() {
        let cli = Cli::parse_from(["quillc", "--config", "/tmp/quill.toml", "repl"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/quill.toml")));
    }
}
