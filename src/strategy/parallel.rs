//! Parallel Batch Lexing
//!
//! Uses Rayon to lex many independent documents at once. Lexing is a pure
//! function of each buffer, so documents share nothing but the thread pool.

use rayon::prelude::*;
use crate::core::classifier::XmlClass;
use crate::core::tokenizer::{LexError, TokenSpan, Tokenizer};

/// Lex every document in parallel, detecting each one's encoding.
///
/// Results are returned in input order.
pub fn lex_parallel(sources: &[&[u8]]) -> Vec<Result<Vec<TokenSpan>, LexError>> {
    sources
        .par_iter()
        .map(|source| Tokenizer::<XmlClass>::detect(source).spans())
        .collect()
}
