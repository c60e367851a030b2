//! Raw Scanner - maximal munch over classifier runs
//!
//! `next_raw` decodes characters after the previous token and keeps
//! extending while the classifier stays in the same state. The character
//! that changes the state is only peeked; it starts the next token.

use super::classifier::{is_xml_whitespace, Classifier};
use super::encoding::{Encoding, ShiftState};
use super::slice::Slice;
use super::token::Token;
use tracing::trace;

/// Result of classifying one character
#[derive(Debug, Clone, Copy)]
pub(crate) struct Read<'a, C> {
    /// Bytes consumed by the character (0 at end of input)
    pub amount: usize,
    /// State produced by the transition
    pub kind: C,
    /// Input following the character
    pub rest: Slice<'a>,
}

impl<C: Classifier> Read<'_, C> {
    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == C::UNEXPECTED
    }
}

/// Decode the first character of `input` and run it through `previous`.
///
/// Decode errors yield `UNEXPECTED`. So does a non-terminal state produced
/// without consuming anything, which keeps every scan loop advancing.
#[inline]
pub(crate) fn read<C: Classifier>(
    input: Slice<'_>,
    previous: C,
    encoding: Encoding,
) -> Read<'_, C> {
    let mut state = ShiftState::new();
    let (amount, kind) = match encoding.decode(input.as_slice(), &mut state) {
        Ok(decoded) => {
            let kind = previous.transition(decoded.input);
            if decoded.consumed == 0 && !kind.is_terminal() {
                (0, C::UNEXPECTED)
            } else {
                (decoded.consumed, kind)
            }
        }
        Err(_) => (0, C::UNEXPECTED),
    };

    Read {
        amount,
        kind,
        rest: input.index(amount),
    }
}

/// Bytes of XML whitespace at the front of `input`
pub(crate) fn count_spaces(mut input: Slice<'_>, encoding: Encoding) -> usize {
    let mut spaces = 0;
    loop {
        let mut state = ShiftState::new();
        match encoding.decode(input.as_slice(), &mut state) {
            Ok(decoded) if decoded.input.is_some_and(is_xml_whitespace) => {
                spaces += decoded.consumed;
                input = input.index(decoded.consumed);
            }
            _ => return spaces,
        }
    }
}

/// Returns the next raw token following `previous`.
///
/// The returned token covers the longest run of characters that keep the
/// classifier in one state. Terminal tokens are returned unchanged.
pub fn next_raw<'a, C: Classifier>(previous: Token<'a, C>) -> Token<'a, C> {
    if previous.is_terminal() {
        return previous;
    }

    let next = previous.remainder();
    let mut current = read(next, previous.kind, previous.encoding);

    if current.is_error() {
        trace!(offset = next.offset(), from = ?previous.kind, "unexpected input");
        return Token {
            kind: C::UNEXPECTED,
            value: next.truncate(0),
            ..previous
        };
    }

    if current.kind == C::END_OF_INPUT {
        return Token {
            kind: current.kind,
            value: next.truncate(current.amount),
            ..previous
        };
    }

    let confirmed = current.kind;
    let mut value_length = current.amount;
    loop {
        current = read(current.rest, confirmed, previous.encoding);
        if current.is_error() || current.kind != confirmed {
            break;
        }
        value_length += current.amount;
    }

    Token {
        kind: confirmed,
        value: next.truncate(value_length),
        ..previous
    }
}
