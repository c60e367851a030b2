//! Combinators - sequencing, alternation and optional matching
//!
//! A step is any `FnOnce(Token) -> Token`. Steps report failure by returning
//! a token classified `UNEXPECTED`; the combinators decide what the caller
//! sees in that case. A failed step never leaks a partially grown value.

use super::classifier::Classifier;
use super::token::Token;

/// Apply `step` unless `token` is already terminal.
///
/// On failure the original token comes back, classified `UNEXPECTED`, so the
/// error position is the position before the attempt.
#[inline]
pub fn then<'a, C, F>(token: Token<'a, C>, step: F) -> Token<'a, C>
where
    C: Classifier,
    F: FnOnce(Token<'a, C>) -> Token<'a, C>,
{
    if token.is_terminal() {
        return token;
    }

    let result = step(token);
    if result.is_unexpected() {
        return token.reject();
    }
    result
}

/// Try `left`, and if it fails try `right` from the original token
#[inline]
pub fn or<'a, C, L, R>(token: Token<'a, C>, left: L, right: R) -> Token<'a, C>
where
    C: Classifier,
    L: FnOnce(Token<'a, C>) -> Token<'a, C>,
    R: FnOnce(Token<'a, C>) -> Token<'a, C>,
{
    let result = then(token, left);
    if result.is_unexpected() {
        return then(token, right);
    }
    result
}

/// Apply `step`, falling back to `token` unchanged if it fails
#[inline]
pub fn optional<'a, C, F>(token: Token<'a, C>, step: F) -> Token<'a, C>
where
    C: Classifier,
    F: FnOnce(Token<'a, C>) -> Token<'a, C>,
{
    let result = then(token, step);
    if result.is_unexpected() {
        return token;
    }
    result
}

impl<'a, C: Classifier> Token<'a, C> {
    /// Method form of [`then`]
    #[inline]
    pub fn then<F>(self, step: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        then(self, step)
    }

    /// Method form of [`or`]
    #[inline]
    pub fn or<L, R>(self, left: L, right: R) -> Self
    where
        L: FnOnce(Self) -> Self,
        R: FnOnce(Self) -> Self,
    {
        or(self, left, right)
    }

    /// Method form of [`optional`]
    #[inline]
    pub fn optional<F>(self, step: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        optional(self, step)
    }
}
