//! Core lexing primitives
//!
//! Bottom-up, these are the building blocks of the lexer:
//! - Slice: bounds-clamped borrowed view over the source buffer
//! - Encoding: one-character decoding with explicit shift state
//! - Classifier: transition-table contract and the bundled XML table
//! - Token: the classified span threaded through every step
//! - Scanner: maximal-munch raw scanning
//! - Combinators: `then` / `or` / `optional`
//! - Recognizers: xmldecl, doctype, CDATA and comment
//! - Tokenizer: dispatching `next`, the token iterator and span collection

pub mod classifier;
pub mod combinators;
pub mod encoding;
pub mod recognizers;
pub mod scanner;
pub mod slice;
pub mod token;
pub mod tokenizer;
