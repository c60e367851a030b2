//! xmllex - Streaming tokenizer for XML-like markup
//!
//! Produces classified, zero-copy token spans over a caller-owned buffer:
//! - Raw tokens: maximal runs of one classifier state
//! - Structural tokens: XML declaration, doctype, CDATA, comment
//!
//! Entry points:
//! - `core::tokenizer::next`: one step of the dispatching scan
//! - `Tokenizer`: iterator over a whole buffer
//! - `lex_parallel`: batch lexing on the rayon pool
//! - NIFs `lex/1` and `lex_batch/1` for Elixir

use rustler::{Binary, Env, NifResult, Term};

pub mod core;
pub mod strategy;
mod term;

pub use crate::core::classifier::{Classifier, XmlClass};
pub use crate::core::encoding::{DecodeError, Encoding};
pub use crate::core::slice::Slice;
pub use crate::core::token::Token;
pub use crate::core::tokenizer::{collect_spans, next, LexError, TokenSpan, Tokenizer};
pub use strategy::lex_parallel;

use term::lex_result_to_term;

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Lexing NIFs
// ============================================================================

/// Lex a document, detecting its encoding from the byte order mark.
/// Returns {:ok, [{kind, offset, length}]} or {:error, {:unexpected, offset}}
#[rustler::nif]
fn lex<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    let result = Tokenizer::<XmlClass>::detect(input.as_slice()).spans();
    lex_result_to_term(env, &result)
}

/// Lex many documents in parallel; one result per input, in order
#[rustler::nif(schedule = "DirtyCpu")]
fn lex_batch<'a>(env: Env<'a>, inputs: Vec<Binary<'a>>) -> NifResult<Term<'a>> {
    let sources: Vec<&[u8]> = inputs.iter().map(|input| input.as_slice()).collect();
    let results = lex_parallel(&sources);

    let mut list = Term::list_new_empty(env);
    for result in results.iter().rev() {
        list = list.list_prepend(lex_result_to_term(env, result)?);
    }
    Ok(list)
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.XmlLex.Native");
