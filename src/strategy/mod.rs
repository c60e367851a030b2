//! Lexing Strategies
//!
//! The sequential tokenizer lives in `core`; this module adds ways of
//! driving it over many documents.

pub mod parallel;

pub use parallel::lex_parallel;
