//! Token - a classified, borrowed span of the source
//!
//! A token is the only state the lexer has. Every scanning and combinator
//! step takes a token by value and returns a new one; the source buffer is
//! borrowed for `'a` and never copied.

use super::classifier::{Classifier, XmlClass};
use super::encoding::Encoding;
use super::slice::Slice;

/// A classified span of the source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a, C = XmlClass> {
    /// Raw class from the classifier, or a structural kind
    pub kind: C,
    /// The entire input; constant for a lexing session
    pub source: Slice<'a>,
    /// The bytes this token covers, always inside `source`
    pub value: Slice<'a>,
    /// Decoder used for every character read in this session
    pub encoding: Encoding,
}

impl<'a, C: Classifier> Token<'a, C> {
    /// Create the initial token for a UTF-8 source
    pub fn init(source: &'a [u8]) -> Self {
        Self::init_with_encoding(source, Encoding::Utf8)
    }

    /// Create the initial token with an explicit encoding
    pub fn init_with_encoding(source: &'a [u8], encoding: Encoding) -> Self {
        let source = Slice::new(source);
        Token {
            kind: C::START,
            source,
            value: source.truncate(0),
            encoding,
        }
    }

    /// The unconsumed input following this token's value
    #[inline]
    pub fn remainder(&self) -> Slice<'a> {
        self.source.after(self.value)
    }

    /// Byte offset of the value within the source
    #[inline]
    pub fn offset(&self) -> usize {
        self.value.offset()
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.value.as_slice()
    }

    /// Value as UTF-8 (only meaningful for UTF-8 sessions)
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        self.value.as_str()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    #[inline]
    pub fn is_unexpected(&self) -> bool {
        self.kind == C::UNEXPECTED
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.kind == C::END_OF_INPUT
    }

    /// Same position, classified as a failure
    #[inline]
    pub(crate) fn reject(self) -> Self {
        self.reclassify(C::UNEXPECTED)
    }

    #[inline]
    pub(crate) fn reclassify(mut self, kind: C) -> Self {
        self.kind = kind;
        self
    }

    /// Grow the value by `n` bytes
    #[inline]
    pub(crate) fn grow(mut self, n: usize) -> Self {
        self.value = self.value.extend(n);
        self
    }
}
