//! Backtrackable token stream
//!
//! The grammar backtracks by handing tokens back to the stream. Pushed-back tokens live on an
//! explicit stack rather than in parser call frames, so the parser state stays inspectable:
//! `get()` always returns the most recently ungotten token before reading further input.

use super::tokens::Token;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    input: VecDeque<Token>,
    pushback: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            input: tokens.into(),
            pushback: Vec::new(),
        }
    }

    /// Lex `source` and wrap the result.
    pub fn from_source(source: &str) -> Self {
        Self::new(super::tokenize(source))
    }

    /// Take the next token, preferring pushed-back tokens (LIFO). `None` at end of input.
    pub fn get(&mut self) -> Option<Token> {
        let token = self.pushback.pop().or_else(|| self.input.pop_front());
        tracing::trace!(?token, "get");
        token
    }

    /// Hand a token back. Ungetting `None` (end of input) is a no-op, so callers can return
    /// whatever `get()` gave them without checking.
    pub fn unget(&mut self, token: Option<Token>) {
        if let Some(token) = token {
            tracing::trace!(?token, "unget");
            self.pushback.push(token);
        }
    }

    /// Look at the next token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.pushback.last().or_else(|| self.input.front())
    }

    /// Number of tokens still available, pushed-back ones included.
    pub fn remaining(&self) -> usize {
        self.input.len() + self.pushback.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Drain everything that is left, in the order `get()` would return it.
    pub fn drain(&mut self) -> Vec<Token> {
        let mut rest = Vec::with_capacity(self.remaining());
        while let Some(token) = self.get() {
            rest.push(token);
        }
        rest
    }
}
