//! Quill lexer -- tokenizer for the Quill programming language.

mod cursor;

use cursor::Cursor;
use quill_common::{keyword_from_str, Token, TokenKind};

/// The Quill lexer. Converts source text into tokens on demand.
///
/// Wraps a [`Cursor`] for byte-level iteration. `next_token` is the
/// contract method callers drive the lexer with; once the source is
/// exhausted it keeps returning [`TokenKind::Eof`] rather than panicking or
/// signaling end-of-stream some other way, which lets a parser's two-token
/// lookahead window always have something to hold.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Convenience: tokenize the entire source into a `Vec<Token>`, including
    /// the final `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        tokens
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, "");
        };

        match c {
            '=' => self.two_char_or_one(start, '=', TokenKind::Eq, TokenKind::Assign),
            '!' => self.two_char_or_one(start, '=', TokenKind::NotEq, TokenKind::Bang),
            '+' => self.single(start, TokenKind::Plus),
            '-' => self.single(start, TokenKind::Minus),
            '*' => self.single(start, TokenKind::Asterisk),
            '/' => self.single(start, TokenKind::Slash),
            '<' => self.single(start, TokenKind::Lt),
            '>' => self.single(start, TokenKind::Gt),
            ',' => self.single(start, TokenKind::Comma),
            ';' => self.single(start, TokenKind::Semicolon),
            ':' => self.single(start, TokenKind::Colon),
            '(' => self.single(start, TokenKind::LParen),
            ')' => self.single(start, TokenKind::RParen),
            '{' => self.single(start, TokenKind::LBrace),
            '}' => self.single(start, TokenKind::RBrace),
            '[' => self.single(start, TokenKind::LBracket),
            ']' => self.single(start, TokenKind::RBracket),
            '"' => self.lex_string(),
            '0'..='9' => self.lex_int(start),
            c if is_ident_start(c) => self.lex_ident(start),
            _ => {
                self.cursor.advance();
                let literal = self.cursor.slice(start, self.cursor.pos());
                Token::new(TokenKind::Illegal, literal)
            }
        }
    }

    /// Skip ASCII whitespace (space, tab, newline, carriage return).
    fn skip_whitespace(&mut self) {
        self.cursor
            .eat_while(|c| c == ' ' || c == '\t' || c == '\n' || c == '\r');
    }

    /// Emit a single-character token and advance past it.
    fn single(&mut self, start: u32, kind: TokenKind) -> Token {
        self.cursor.advance();
        let literal = self.cursor.slice(start, self.cursor.pos());
        Token::new(kind, literal)
    }

    /// Consume the current char; if the next char is `second`, consume it
    /// too and emit `two_kind`, otherwise emit `one_kind` for just the first.
    fn two_char_or_one(
        &mut self,
        start: u32,
        second: char,
        two_kind: TokenKind,
        one_kind: TokenKind,
    ) -> Token {
        self.cursor.advance();
        if self.cursor.peek() == Some(second) {
            self.cursor.advance();
            let literal = self.cursor.slice(start, self.cursor.pos());
            Token::new(two_kind, literal)
        } else {
            let literal = self.cursor.slice(start, self.cursor.pos());
            Token::new(one_kind, literal)
        }
    }

    /// Lex `[0-9]+`.
    fn lex_int(&mut self, start: u32) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let literal = self.cursor.slice(start, self.cursor.pos());
        Token::new(TokenKind::Int, literal)
    }

    /// Lex `[A-Za-z_][A-Za-z_]*` and resolve keywords.
    fn lex_ident(&mut self, start: u32) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());
        let kind = keyword_from_str(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text)
    }

    /// Lex a `"..."` string literal, interpreting `\\ \" \t \n \r` escapes.
    /// Any other `\X` becomes a literal backslash followed by `X`. Hitting
    /// EOF before the closing quote produces an `Illegal` token whose
    /// literal is the error message.
    fn lex_string(&mut self) -> Token {
        self.cursor.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.cursor.advance() {
                None => {
                    return Token::new(TokenKind::Illegal, "unterminated string literal");
                }
                Some('"') => break,
                Some('\\') => match self.cursor.advance() {
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some('t') => value.push('\t'),
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some(other) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => {
                        return Token::new(TokenKind::Illegal, "unterminated string literal");
                    }
                },
                Some(c) => value.push(c),
            }
        }
        Token::new(TokenKind::Str, value)
    }
}

/// Whether a character can start an identifier. ASCII letters and `_` only.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Whether a character can continue an identifier. Note: digits are *not*
/// part of identifier characters per the language's lexical grammar.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_simple_expression() {
        let tokens = Lexer::tokenize("let x = 5 + 10;");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::Plus,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_operators_and_delimiters() {
        let tokens = Lexer::tokenize("!-/*5; 5 < 10 > 5; == != , : [ ] { } ( )");
        let literals: Vec<_> = tokens.iter().map(|t| t.literal.clone()).collect();
        assert!(literals.contains(&"!".to_string()));
        assert!(literals.contains(&"==".to_string()));
        assert!(literals.contains(&"!=".to_string()));
    }

    #[test]
    fn lex_keywords_vs_identifiers() {
        assert_eq!(
            kinds("fn let true false if else return foo"),
            vec![
                TokenKind::Function,
                TokenKind::Let,
                TokenKind::True,
                TokenKind::False,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Return,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifiers_do_not_include_digits() {
        let tokens = Lexer::tokenize("foo1");
        let literals: Vec<_> = tokens.iter().map(|t| t.literal.clone()).collect();
        assert_eq!(literals, vec!["foo", "1", ""]);
    }

    #[test]
    fn lex_string_literal() {
        let tokens = Lexer::tokenize(r#""hello world""#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].literal, "hello world");
    }

    #[test]
    fn lex_string_escapes() {
        let tokens = Lexer::tokenize(r#""a\nb\tc\\d\"e""#);
        assert_eq!(tokens[0].literal, "a\nb\tc\\d\"e");
    }

    #[test]
    fn lex_string_unknown_escape_is_literal_backslash() {
        let tokens = Lexer::tokenize(r#""a\qb""#);
        assert_eq!(tokens[0].literal, "a\\qb");
    }

    #[test]
    fn unterminated_string_is_illegal() {
        let tokens = Lexer::tokenize("\"abc");
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
    }

    #[test]
    fn unknown_byte_is_illegal() {
        let tokens = Lexer::tokenize("@");
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
        assert_eq!(tokens[0].literal, "@");
    }

    #[test]
    fn eof_repeats_indefinitely() {
        let mut lexer = Lexer::new("");
        for _ in 0..5 {
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn lex_array_and_hash_literals() {
        assert_eq!(
            kinds("[1, 2]"),
            vec![
                TokenKind::LBracket,
                TokenKind::Int,
                TokenKind::Comma,
                TokenKind::Int,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds(r#"{"a": 1}"#),
            vec![
                TokenKind::LBrace,
                TokenKind::Str,
                TokenKind::Colon,
                TokenKind::Int,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }
}
