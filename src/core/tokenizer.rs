//! Tokenizer - dispatching scan and token stream
//!
//! `next` is the entry point consumers call repeatedly. After a `<` opener it
//! tries the structural recognizers (prolog first, then comment or CDATA)
//! and falls back to the raw scanner when none of them match.
//!
//! `Tokenizer` wraps that loop in an iterator, and `collect_spans` runs it to
//! completion into owned spans.

use super::classifier::{Classifier, XmlClass};
use super::encoding::Encoding;
use super::recognizers::{prolog, section};
use super::scanner::next_raw;
use super::token::Token;
use std::iter::FusedIterator;
use thiserror::Error;
use tracing::trace;

/// Returns the token following `previous`.
///
/// Terminal tokens are returned unchanged.
pub fn next<'a, C: Classifier>(previous: Token<'a, C>) -> Token<'a, C> {
    if previous.kind == C::ELEMENT {
        let structural = previous.or(prolog, section);
        if !structural.is_unexpected() {
            return structural;
        }
        trace!(offset = previous.remainder().offset(), "no structural markup, scanning raw");
    }
    next_raw(previous)
}

/// Lexing stopped on input the classifier rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected input at byte offset {offset}")]
    Unexpected { offset: usize },
}

/// An owned token position, detached from the source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan<C = XmlClass> {
    pub kind: C,
    /// Byte offset into the source
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
}

impl<C: Classifier> From<Token<'_, C>> for TokenSpan<C> {
    fn from(token: Token<'_, C>) -> Self {
        TokenSpan {
            kind: token.kind,
            offset: token.offset(),
            len: token.value.len(),
        }
    }
}

/// Iterator over the tokens of one source buffer.
///
/// Yields every token up to and including the terminal one
/// (`END_OF_INPUT` or `UNEXPECTED`), then stops.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a, C = XmlClass> {
    token: Token<'a, C>,
    done: bool,
}

impl<'a, C: Classifier> Tokenizer<'a, C> {
    /// Tokenize a UTF-8 source
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_encoding(source, Encoding::Utf8)
    }

    pub fn with_encoding(source: &'a [u8], encoding: Encoding) -> Self {
        Tokenizer {
            token: Token::init_with_encoding(source, encoding),
            done: false,
        }
    }

    /// Tokenize with the encoding picked by [`Encoding::detect`]
    pub fn detect(source: &'a [u8]) -> Self {
        Self::with_encoding(source, Encoding::detect(source))
    }

    /// The most recently produced token (the initial token before the first call)
    #[inline]
    pub fn current(&self) -> Token<'a, C> {
        self.token
    }

    /// Run to completion, collecting every token before `END_OF_INPUT`.
    pub fn spans(self) -> Result<Vec<TokenSpan<C>>, LexError> {
        let mut spans = Vec::new();
        for token in self {
            if token.is_unexpected() {
                return Err(LexError::Unexpected {
                    offset: token.offset(),
                });
            }
            if token.is_end() {
                break;
            }
            spans.push(TokenSpan::from(token));
        }
        Ok(spans)
    }
}

impl<'a, C: Classifier> Iterator for Tokenizer<'a, C> {
    type Item = Token<'a, C>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.token = next(self.token);
        self.done = self.token.is_terminal();
        Some(self.token)
    }
}

impl<C: Classifier> FusedIterator for Tokenizer<'_, C> {}

/// Lex a UTF-8 source into spans with the bundled table
pub fn collect_spans(source: &[u8]) -> Result<Vec<TokenSpan>, LexError> {
    Tokenizer::<XmlClass>::new(source).spans()
}

pub fn collect_spans_with_encoding(
    source: &[u8],
    encoding: Encoding,
) -> Result<Vec<TokenSpan>, LexError> {
    Tokenizer::<XmlClass>::with_encoding(source, encoding).spans()
}
