//! Recursive-descent parser for a single FXQL statement.
//!
//! Grammar:
//!
//! ```text
//! statement    := currencyPair '{' command* '}'
//! currencyPair := Identifier '-' Identifier
//! command      := ('BUY' | 'SELL' | 'CAP') Number
//! ```
//!
//! Semantic checks (currency whitelist, amount formats, duplicates) run as
//! soon as the offending token is seen. The first failure aborts the
//! statement.

use fxql_core::{is_currency_code, Amount, AmountError, Command, Statement};

use crate::cursor::{TokenCursor, TokenSource};
use crate::error::{CurrencyRole, ParseError, SemanticError, SyntaxError};
use crate::lexer::{Lexer, TokenKind};
use crate::options::ParseOptions;

/// Parse one statement fragment.
///
/// ```
/// use fxql_parser::{parse_statement, ParseOptions};
///
/// let stmt = parse_statement("EUR-NGN { SELL 1650.5 }", &ParseOptions::default()).unwrap();
/// assert_eq!(stmt.pair(), "EUR-NGN");
/// assert!(stmt.buy.is_none());
/// ```
pub fn parse_statement(fragment: &str, options: &ParseOptions) -> Result<Statement, ParseError> {
    Parser::new(Lexer::new(fragment), options)?.parse_statement()
}

/// Statement parser over any [`TokenSource`].
pub struct Parser<'src, 'opt, S> {
    cursor: TokenCursor<'src, S>,
    options: &'opt ParseOptions,
}

impl<'src, 'opt, S: TokenSource<'src>> Parser<'src, 'opt, S> {
    /// Create a parser, pulling the first token from `source`.
    pub fn new(source: S, options: &'opt ParseOptions) -> Result<Self, ParseError> {
        Ok(Self {
            cursor: TokenCursor::new(source)?,
            options,
        })
    }

    /// Parse a complete statement; the fragment must end after its `}`.
    pub fn parse_statement(mut self) -> Result<Statement, ParseError> {
        let (base, quote) = self.parse_currency_pair()?;
        self.cursor.expect(TokenKind::LeftBrace)?;

        if self.cursor.at(TokenKind::RightBrace) {
            return Err(ParseError::semantic(
                SemanticError::EmptyStatement,
                self.cursor.peek().position,
            ));
        }

        let mut stmt = Statement::new(base, quote);
        while self.cursor.at(TokenKind::Identifier) {
            self.parse_command(&mut stmt)?;
        }

        let close = self.cursor.expect(TokenKind::RightBrace)?;
        if stmt.is_empty() {
            return Err(ParseError::semantic(
                SemanticError::EmptyStatement,
                close.position,
            ));
        }
        self.cursor.expect(TokenKind::EndOfInput)?;

        Ok(stmt)
    }

    fn parse_currency_pair(&mut self) -> Result<(String, String), ParseError> {
        let base = self.parse_currency(CurrencyRole::Base)?;
        self.cursor.expect(TokenKind::Dash)?;
        let quote = self.parse_currency(CurrencyRole::Quote)?;

        if !self.cursor.at(TokenKind::LeftBrace) {
            let token = self.cursor.peek();
            return Err(ParseError::syntax(
                SyntaxError::MissingBraceAfterPair { found: token.kind },
                token.position,
            ));
        }
        Ok((base, quote))
    }

    /// Validate and consume a currency code.
    ///
    /// A number in currency position (`123-USD`) is reported as a bad currency
    /// format rather than a token mismatch.
    fn parse_currency(&mut self, role: CurrencyRole) -> Result<String, ParseError> {
        let token = *self.cursor.peek();
        if !matches!(token.kind, TokenKind::Identifier | TokenKind::Number) {
            return Err(ParseError::syntax(
                SyntaxError::Expected {
                    expected: TokenKind::Identifier,
                    found: token.kind,
                },
                token.position,
            ));
        }

        if !is_currency_code(token.text) {
            return Err(ParseError::semantic(
                SemanticError::InvalidCurrencyFormat {
                    role,
                    code: token.text.to_string(),
                },
                token.position,
            ));
        }

        let whitelist = &self.options.currencies;
        if !whitelist.contains(token.text) {
            return Err(ParseError::semantic(
                SemanticError::UnsupportedCurrency {
                    role,
                    code: token.text.to_string(),
                    supported: whitelist.to_string(),
                },
                token.position,
            ));
        }

        self.cursor.advance()?;
        Ok(token.text.to_string())
    }

    fn parse_command(&mut self, stmt: &mut Statement) -> Result<(), ParseError> {
        let keyword = self.cursor.expect(TokenKind::Identifier)?;

        let Some(command) = Command::from_keyword(keyword.text) else {
            return Err(ParseError::semantic(
                SemanticError::UnknownCommand(keyword.text.to_ascii_uppercase()),
                keyword.position,
            ));
        };

        if stmt.amount(command).is_some() {
            return Err(ParseError::semantic(
                SemanticError::DuplicateCommand(command),
                keyword.position,
            ));
        }

        let amount = self.parse_amount(command)?;
        stmt.set_amount(command, amount);
        Ok(())
    }

    fn parse_amount(&mut self, command: Command) -> Result<Amount, ParseError> {
        if self.cursor.at(TokenKind::Dash) {
            let dash = self.cursor.advance()?;
            let number = self.cursor.expect(TokenKind::Number)?;
            return Err(ParseError::semantic(
                SemanticError::NegativeAmount {
                    command,
                    text: format!("-{}", number.text),
                },
                dash.position,
            ));
        }

        let token = self.cursor.expect(TokenKind::Number)?;
        let amount: Amount = token.text.parse().map_err(|err| {
            let text = token.text.to_string();
            let kind = match err {
                AmountError::Malformed(_) => SemanticError::InvalidAmount { command, text },
                AmountError::OutOfRange(_) => SemanticError::AmountOutOfRange { command, text },
            };
            ParseError::semantic(kind, token.position)
        })?;

        if command.requires_whole_number() && !amount.is_whole() {
            return Err(ParseError::semantic(
                SemanticError::CapNotWhole {
                    text: token.text.to_string(),
                },
                token.position,
            ));
        }

        Ok(amount)
    }
}
