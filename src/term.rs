//! Elixir Term Conversion Utilities
//!
//! Converts lexing results to Elixir terms:
//! - `{:ok, [{kind, offset, length}]}`
//! - `{:error, {:unexpected, offset}}`

use rustler::{Atom, Encoder, Env, NifResult, Term};
use crate::core::tokenizer::{LexError, TokenSpan};

rustler::atoms! {
    ok,
    error,
    unexpected,
}

/// Convert a span to `{kind, offset, length}`
pub fn span_to_term<'a>(env: Env<'a>, span: &TokenSpan) -> NifResult<Term<'a>> {
    let kind = Atom::from_str(env, span.kind.name())?;
    Ok((kind, span.offset, span.len).encode(env))
}

/// Convert spans to an Elixir list, preserving order
pub fn spans_to_term<'a>(env: Env<'a>, spans: &[TokenSpan]) -> NifResult<Term<'a>> {
    let mut list = Term::list_new_empty(env);
    for span in spans.iter().rev() {
        list = list.list_prepend(span_to_term(env, span)?);
    }
    Ok(list)
}

pub fn lex_result_to_term<'a>(
    env: Env<'a>,
    result: &Result<Vec<TokenSpan>, LexError>,
) -> NifResult<Term<'a>> {
    match result {
        Ok(spans) => Ok((ok(), spans_to_term(env, spans)?).encode(env)),
        Err(LexError::Unexpected { offset }) => Ok((error(), (unexpected(), *offset)).encode(env)),
    }
}
