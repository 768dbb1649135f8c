//! Read position over a scanned token stream.

use jack_syntax::error::{Error, Result};
use jack_syntax::token::{Token, TokenKind};

/// Owns the token stream of one source unit plus the current read position.
///
/// The current token is `tokens[position]`; once every token has been
/// consumed the cursor sits one past the end and [`TokenCursor::current`]
/// returns `None`.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Moves the read position. Out-of-range positions are ignored.
    pub fn seek(&mut self, index: usize) {
        if index <= self.tokens.len() {
            self.pos = index;
        }
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the current token and moves past it.
    ///
    /// Advancing with no token left is a usage fault and yields an error.
    pub fn advance(&mut self) -> Result<&Token> {
        if self.pos >= self.tokens.len() {
            return Err(self.overrun());
        }
        self.pos += 1;
        Ok(&self.tokens[self.pos - 1])
    }

    /// Raw text of the token at an absolute index, without moving.
    pub fn peek_raw(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|t| t.text.as_str())
    }

    /// Category of the current token.
    pub fn token_type(&self) -> Option<TokenKind> {
        self.current().map(Token::kind)
    }

    /// The error reported when a token is required but the stream is spent.
    pub fn overrun(&self) -> Error {
        match self.tokens.last() {
            Some(last) => Error::at_line("Unexpected end of input", last.line),
            None => Error::new("Unexpected end of input"),
        }
    }
}
