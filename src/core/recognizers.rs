//! Structural Recognizers
//!
//! Markup that the per-character table cannot express on its own is matched
//! here by composing primitives with `then`/`or`/`optional`:
//! - XML declaration: `<?xml version="1.0"?>`
//! - Document type declaration: `<!DOCTYPE name SYSTEM "uri">`
//! - CDATA sections: `<![CDATA[ ... ]]`
//! - Comments: `<!-- ... --`
//!
//! Every recognizer starts from the `<` opener token. On success the result
//! covers everything after the opener and carries the structural kind; the
//! closing `>` is left for the raw scanner.

use super::classifier::Classifier;
use super::encoding::Encoding;
use super::scanner::{count_spaces, read};
use super::slice::Slice;
use super::token::Token;
use memchr::memmem;

const XMLDECL_OPEN: &str = "?xml";
const XMLDECL_CLOSE: &str = "?";
const DOCTYPE_OPEN: &str = "!DOCTYPE";
const SYSTEM_ID: &str = "SYSTEM";
const PUBLIC_ID: &str = "PUBLIC";
const CDATA_OPEN: &str = "![CDATA[";
const CDATA_CLOSE: &str = "]]";
const COMMENT_OPEN: &str = "!--";
const COMMENT_CLOSE: &str = "--";
const ASSIGN: &str = "=";

// ============================================================================
// Primitives
// ============================================================================

/// Byte length of `literal` if `input` starts with it
#[inline]
fn match_literal(input: Slice<'_>, literal: &str, encoding: Encoding) -> Option<usize> {
    let mut buf = [0; 32];
    let needle = encoding.encode_ascii(literal, &mut buf);
    input.starts_with(needle).then_some(needle.len())
}

/// Offset just past the first occurrence of `terminator` in `input`
fn find_terminator(input: Slice<'_>, terminator: &str, encoding: Encoding) -> Option<usize> {
    let mut buf = [0; 32];
    let needle = encoding.encode_ascii(terminator, &mut buf);
    let haystack = input.as_slice();
    let width = encoding.unit_width();

    // Wide encodings only match on code unit boundaries
    let mut from = 0;
    while let Some(found) = memmem::find(&haystack[from..], needle) {
        let at = from + found;
        if at % width == 0 {
            return Some(at + needle.len());
        }
        from = at + 1;
    }
    None
}

/// Consume an exact literal
fn literal<'a, C: Classifier>(token: Token<'a, C>, text: &str) -> Token<'a, C> {
    match match_literal(token.remainder(), text, token.encoding) {
        Some(len) => token.grow(len),
        None => token.reject(),
    }
}

/// Consume one or more whitespace characters
fn space<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    match count_spaces(token.remainder(), token.encoding) {
        0 => token.reject(),
        spaces => token.grow(spaces),
    }
}

/// Consume a non-empty name using the element → element-name chain of the
/// classifier
fn name<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    let mut current = read(token.remainder(), C::ELEMENT, token.encoding);
    if current.kind != C::ELEMENT_NAME {
        return token.reject();
    }

    let mut total = 0;
    while current.kind == C::ELEMENT_NAME {
        total += current.amount;
        current = read(current.rest, current.kind, token.encoding);
    }
    token.grow(total)
}

fn assign<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    literal(token, ASSIGN)
}

/// Consume a single- or double-quoted string, quotes included
fn quoted<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    let mut current = read(token.remainder(), C::ATTRIBUTE_ASSIGN, token.encoding);
    if current.is_error() || !current.kind.is_quote_start() {
        return token.reject();
    }

    let mut total = 0;
    while !current.kind.is_quote_end() {
        if current.kind.is_terminal() {
            return token.reject();
        }
        total += current.amount;
        current = read(current.rest, current.kind, token.encoding);
    }
    token.grow(total + current.amount)
}

/// `space name [space] = [space] quoted`
fn attribute<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    token
        .then(space)
        .then(name)
        .optional(space)
        .then(assign)
        .optional(space)
        .then(quoted)
}

/// Reclassify a completed match, dropping the `<` opener from its front.
/// A failed match reverts to `opener` itself.
#[inline]
fn finish<'a, C: Classifier>(
    opener: Token<'a, C>,
    matched: Token<'a, C>,
    kind: C,
) -> Token<'a, C> {
    if matched.is_unexpected() {
        return opener.reject();
    }
    Token {
        kind,
        value: matched.value.index(opener.value.len()),
        ..matched
    }
}

// ============================================================================
// Prolog
// ============================================================================

/// `<?xml` attribute+ `[space] ?`
pub fn xmldecl<C: Classifier>(opener: Token<'_, C>) -> Token<'_, C> {
    let mut token = opener
        .then(|t| literal(t, XMLDECL_OPEN))
        .then(attribute);

    let mut next = token;
    loop {
        next = next.then(attribute);
        if next.is_unexpected() {
            break;
        }
        token = next;
    }

    let token = token
        .optional(space)
        .then(|t| literal(t, XMLDECL_CLOSE));
    finish(opener, token, C::XMLDECL)
}

fn system_id<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    token
        .then(|t| literal(t, SYSTEM_ID))
        .then(space)
        .then(quoted)
}

fn public_id<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    token
        .then(|t| literal(t, PUBLIC_ID))
        .then(space)
        .then(quoted)
        .then(space)
        .then(quoted)
}

/// `space (SYSTEM ... | PUBLIC ...)`
fn external_id<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    token.then(space).or(system_id, public_id)
}

/// `<!DOCTYPE space name [external-id] [space]`
pub fn doctype<C: Classifier>(opener: Token<'_, C>) -> Token<'_, C> {
    let token = opener
        .then(|t| literal(t, DOCTYPE_OPEN))
        .then(space)
        .then(name)
        .optional(external_id)
        .optional(space);
    finish(opener, token, C::DOCTYPE)
}

/// XML declaration, else doctype
pub fn prolog<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    token.or(xmldecl, doctype)
}

// ============================================================================
// Sections
// ============================================================================

/// `open`, then everything up to and including the first `close`
fn delimited<'a, C: Classifier>(
    opener: Token<'a, C>,
    open: &str,
    close: &str,
    kind: C,
) -> Token<'a, C> {
    let remainder = opener.remainder();
    let Some(open_len) = match_literal(remainder, open, opener.encoding) else {
        return opener.reject();
    };
    let Some(body_len) = find_terminator(remainder.index(open_len), close, opener.encoding) else {
        return opener.reject();
    };
    finish(opener, opener.grow(open_len + body_len), kind)
}

/// `<![CDATA[` up to the first `]]`
pub fn cdata<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    delimited(token, CDATA_OPEN, CDATA_CLOSE, C::CDATA)
}

/// `<!--` up to the first `--`, wherever it appears
pub fn comment<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    delimited(token, COMMENT_OPEN, COMMENT_CLOSE, C::COMMENT)
}

/// Comment, else CDATA
pub fn section<C: Classifier>(token: Token<'_, C>) -> Token<'_, C> {
    token.or(comment, cdata)
}
