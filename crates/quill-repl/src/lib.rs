//! Interactive read-eval-print loop for the Quill language.
//!
//! ## Architecture
//!
//! - [`session`]: persistent evaluation state across lines
//!
//! ## Usage
//!
//! ```no_run
//! use quill_repl::{run_repl, ReplConfig};
//!
//! let config = ReplConfig::default();
//! run_repl(&config).unwrap();
//! ```

pub mod session;

use std::path::PathBuf;

use quill_object::Value;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::{Deserialize, Serialize};

pub use session::{LineOutcome, ReplSession};

/// Configuration for the REPL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// The primary prompt string.
    pub prompt: String,
    /// The continuation prompt for multi-line input. Reserved for future
    /// use; the current REPL evaluates one line at a time.
    pub continuation: String,
    /// If set, history is persisted to this file between sessions.
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "quill\u{bb} ".to_string(),
            continuation: "  ... ".to_string(),
            history_file: None,
        }
    }
}

/// Errors that can arise while driving the REPL loop itself, distinct from
/// language-level evaluation errors (which are ordinary [`Value::Error`]s).
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error("failed to read line: {0}")]
    Readline(#[from] ReadlineError),
}

/// Run the interactive REPL loop until EOF (Ctrl-D) or a `:quit`/`:exit`
/// command. Each line is lexed, parsed, and evaluated against a single
/// persistent environment so bindings accumulate across lines.
pub fn run_repl(config: &ReplConfig) -> Result<(), ReplError> {
    tracing::info!("starting REPL session");
    let mut editor = DefaultEditor::new()?;
    if let Some(history_file) = &config.history_file {
        let _ = editor.load_history(history_file);
    }

    let session = ReplSession::new();

    loop {
        match editor.readline(&config.prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                match trimmed {
                    ":quit" | ":exit" => break,
                    ":env" => {
                        for name in session.bound_names() {
                            println!("{name}");
                        }
                        continue;
                    }
                    _ => {}
                }

                match session.eval_line(&line) {
                    LineOutcome::ParseErrors(errors) => {
                        tracing::debug!(count = errors.len(), "parse errors on REPL line");
                        print_parser_errors(&errors);
                    }
                    LineOutcome::Value(Value::Null) => {}
                    LineOutcome::Value(value) => println!("{}", value.inspect()),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(history_file) = &config.history_file {
        let _ = editor.save_history(history_file);
    }

    Ok(())
}

/// Shared formatting for parser errors, used by both the REPL and
/// `quillc run`.
pub fn print_parser_errors(errors: &[String]) {
    eprintln!(" --- Parser errors:");
    for message in errors {
        eprintln!("    {message}");
    }
}
