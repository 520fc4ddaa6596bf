//! Host-level error handling for the `quillc` CLI.
//!
//! Distinct from the language-level `Value::Error`, which flows through
//! the evaluator as an ordinary value and never becomes a Rust `Err`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuillCliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read source file {path}: {source}")]
    ReadSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line editor error: {0}")]
    Readline(#[from] quill_repl::ReplError),

    #[error("logging initialization failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, QuillCliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = QuillCliError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "configuration error: missing field");
    }

    #[test]
    fn read_source_error_includes_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = QuillCliError::ReadSource {
            path: "foo.ql".to_string(),
            source: io_err,
        };
        assert!(err.to_string().contains("foo.ql"));
    }
}
