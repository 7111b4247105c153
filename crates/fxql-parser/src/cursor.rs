//! Pull-based token cursor with one token of lookahead.
//!
//! The parser never talks to the lexer directly. It reads the current token
//! with [`TokenCursor::peek`] and moves on with [`TokenCursor::advance`] or
//! [`TokenCursor::expect`], so any [`TokenSource`] can drive it.

use crate::error::{ParseError, SyntaxError};
use crate::lexer::{Token, TokenKind};
use crate::position::Position;

/// Something that produces tokens on demand.
///
/// Implementations must keep returning [`TokenKind::EndOfInput`] once they
/// are exhausted.
pub trait TokenSource<'src> {
    /// Produce the next token.
    fn next_token(&mut self) -> Result<Token<'src>, ParseError>;
}

/// A token source over an already-lexed token list.
#[derive(Debug, Clone)]
pub struct TokenBuffer<'src> {
    tokens: std::vec::IntoIter<Token<'src>>,
    end: Position,
}

impl<'src> TokenBuffer<'src> {
    /// Wrap a token list; end of input is reported just past the last token.
    #[must_use]
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        let end = tokens
            .last()
            .map_or_else(Position::start, Token::end_position);
        Self {
            tokens: tokens.into_iter(),
            end,
        }
    }
}

impl<'src> TokenSource<'src> for TokenBuffer<'src> {
    fn next_token(&mut self) -> Result<Token<'src>, ParseError> {
        Ok(self.tokens.next().unwrap_or_else(|| Token::end(self.end)))
    }
}

/// One-token lookahead over a [`TokenSource`].
#[derive(Debug)]
pub struct TokenCursor<'src, S> {
    source: S,
    current: Token<'src>,
}

impl<'src, S: TokenSource<'src>> TokenCursor<'src, S> {
    /// Create a cursor, pulling the first token.
    pub fn new(mut source: S) -> Result<Self, ParseError> {
        let current = source.next_token()?;
        Ok(Self { source, current })
    }

    /// The current token, without consuming it.
    #[must_use]
    pub const fn peek(&self) -> &Token<'src> {
        &self.current
    }

    /// Check whether the current token has the given kind.
    #[must_use]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Result<Token<'src>, ParseError> {
        let next = self.source.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consume the current token if it has the expected kind.
    ///
    /// Otherwise fails with [`SyntaxError::Expected`] at the current token.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        if self.at(kind) {
            self.advance()
        } else {
            Err(ParseError::syntax(
                SyntaxError::Expected {
                    expected: kind,
                    found: self.current.kind,
                },
                self.current.position,
            ))
        }
    }
}
