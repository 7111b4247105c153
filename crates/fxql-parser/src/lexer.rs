//! Lexer for FXQL statement fragments.
//!
//! Token recognition is a DFA generated by Logos. The [`Lexer`] wrapper adds
//! line/column tracking, turns unrecognized input into lexical errors and
//! keeps yielding [`TokenKind::EndOfInput`] once the fragment is exhausted.

use logos::Logos;
use std::fmt;

use crate::cursor::TokenSource;
use crate::error::{ParseError, ParseErrorKind};
use crate::position::Position;

/// Token kinds produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// A run of digits and dots starting with a digit.
    ///
    /// Malformed numbers such as `1.2.3` are still a single token; the parser
    /// rejects them when it converts the amount.
    #[regex(r"[0-9][0-9.]*")]
    Number,

    /// A letter followed by letters or digits: currency codes and command keywords.
    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Identifier,

    /// Left brace `{` opening a statement body.
    #[token("{")]
    LeftBrace,

    /// Right brace `}` closing a statement body.
    #[token("}")]
    RightBrace,

    /// Dash `-` separating the currency pair.
    #[token("-")]
    Dash,

    /// End of the fragment (produced by [`Lexer`], not by Logos).
    EndOfInput,
}

impl TokenKind {
    /// Short human-readable name used in error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::Dash => "'-'",
            Self::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its source text and starting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The token kind.
    pub kind: TokenKind,
    /// The matched source text (empty for [`TokenKind::EndOfInput`]).
    pub text: &'src str,
    /// Position of the first character.
    pub position: Position,
}

impl<'src> Token<'src> {
    /// Create a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'src str, position: Position) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }

    /// Create an end-of-input token at `position`.
    #[must_use]
    pub const fn end(position: Position) -> Self {
        Self::new(TokenKind::EndOfInput, "", position)
    }

    /// Line of the first character.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.position.line
    }

    /// Column of the first character.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }

    /// Position just past the last character.
    #[must_use]
    pub fn end_position(&self) -> Position {
        self.position.advance_str(self.text)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => f.write_str("<eof>"),
            _ => f.write_str(self.text),
        }
    }
}

/// Pull-based lexer over a single statement fragment.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
    /// Byte offset that `position` corresponds to.
    offset: usize,
    position: Position,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Create a lexer for `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            offset: 0,
            position: Position::start(),
            finished: false,
        }
    }

    /// The text being lexed.
    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.source
    }

    /// Move the line/column cursor forward to byte offset `target`.
    fn seek(&mut self, target: usize) {
        if target > self.offset {
            self.position = self.position.advance_str(&self.source[self.offset..target]);
            self.offset = target;
        }
    }

    /// Produce the next token.
    ///
    /// Whitespace is skipped. Once the input is exhausted every call returns
    /// an [`TokenKind::EndOfInput`] token at the same position.
    pub fn next_token(&mut self) -> Result<Token<'src>, ParseError> {
        if self.finished {
            return Ok(Token::end(self.position));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                self.seek(span.start);
                Ok(Token::new(kind, self.inner.slice(), self.position))
            }
            Some(Err(())) => {
                let start = self.inner.span().start;
                self.seek(start);
                let found = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
                Err(ParseError::new(
                    ParseErrorKind::Lexical(found),
                    self.position,
                ))
            }
            None => {
                self.seek(self.source.len());
                self.finished = true;
                Ok(Token::end(self.position))
            }
        }
    }
}

impl<'src> TokenSource<'src> for Lexer<'src> {
    fn next_token(&mut self) -> Result<Token<'src>, ParseError> {
        Lexer::next_token(self)
    }
}

/// Tokenize a whole fragment, stopping at the first lexical error.
///
/// The returned vector does not include the end-of-input token.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.kind == TokenKind::EndOfInput {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_statement() {
        assert_eq!(
            kinds("USD-GBP { BUY 100 SELL 200 CAP 93800 }"),
            vec![
                TokenKind::Identifier,
                TokenKind::Dash,
                TokenKind::Identifier,
                TokenKind::LeftBrace,
                TokenKind::Identifier,
                TokenKind::Number,
                TokenKind::Identifier,
                TokenKind::Number,
                TokenKind::Identifier,
                TokenKind::Number,
                TokenKind::RightBrace,
            ]
        );
    }

    #[test]
    fn test_tokenize_number_keeps_dots() {
        let tokens = tokenize("0.85 1.2.3 100.").unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["0.85", "1.2.3", "100."]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_identifier_may_contain_digits() {
        let tokens = tokenize("USD1 2GBP").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "USD1");
        // A leading digit starts a number, the rest is a new identifier.
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].text, "2");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].text, "GBP");
    }

    #[test]
    fn test_positions_single_line() {
        let tokens = tokenize("USD-GBP { BUY 100}").unwrap();
        let cols: Vec<_> = tokens.iter().map(Token::column).collect();
        assert_eq!(cols, vec![1, 4, 5, 9, 11, 15, 18]);
        assert!(tokens.iter().all(|t| t.line() == 1));
    }

    #[test]
    fn test_positions_across_lines() {
        let tokens = tokenize("USD-GBP {\n  BUY 100\n}").unwrap();
        assert_eq!(tokens[4].text, "BUY");
        assert_eq!(tokens[4].position, Position::new(2, 3));
        assert_eq!(tokens[5].position, Position::new(2, 7));
        assert_eq!(tokens[6].position, Position::new(3, 1));
    }

    #[test]
    fn test_end_of_input_is_idempotent() {
        let mut lexer = Lexer::new("USD");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
        let end = lexer.next_token().unwrap();
        assert_eq!(end.kind, TokenKind::EndOfInput);
        assert_eq!(end.position, Position::new(1, 4));
        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap(), end);
        }
    }

    #[test]
    fn test_empty_source() {
        let mut lexer = Lexer::new("   ");
        let end = lexer.next_token().unwrap();
        assert_eq!(end.kind, TokenKind::EndOfInput);
        assert_eq!(end.position, Position::new(1, 4));
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("USD-GBP { BUY @5 }").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Lexical);
        assert_eq!(err.kind, ParseErrorKind::Lexical('@'));
        assert_eq!(err.position, Position::new(1, 15));
        assert_eq!(err.message(), "invalid character '@'");
    }

    #[test]
    fn test_invalid_multibyte_character() {
        let err = tokenize("USD-GBP { BUY £5 }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Lexical('£'));
        assert_eq!(err.position, Position::new(1, 15));
    }

    #[test]
    fn test_invalid_character_on_later_line() {
        let err = tokenize("USD-GBP {\n BUY 5\n SELL 6;\n}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Lexical(';'));
        assert_eq!(err.position, Position::new(3, 8));
    }

    #[test]
    fn test_end_position() {
        let token = Token::new(TokenKind::Number, "93800", Position::new(1, 30));
        assert_eq!(token.end_position(), Position::new(1, 35));
    }
}
