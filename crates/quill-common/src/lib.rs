//! Shared token vocabulary for the Quill language.
//!
//! Both [`quill_lexer`](../quill_lexer/index.html) and
//! [`quill_parser`](../quill_parser/index.html) depend on this crate so the
//! closed set of token kinds has exactly one definition.

pub mod token;

pub use token::{keyword_from_str, Token, TokenKind};
