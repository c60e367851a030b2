//! Character Classification
//!
//! A classification state is a transition function: given the next decoded
//! character it yields the next state. The engine only ever compares states
//! for identity, so any `Copy + Eq` type can drive it.
//!
//! `XmlClass` is the table bundled with the crate. It covers text, tags,
//! attributes and quoted values; markup that starts with `<!` or `<?` is
//! rejected here and left to the structural recognizers.

use std::fmt;

/// Transition relation for the lexical grammar.
///
/// `transition` receives `None` when the input is exhausted.
pub trait Classifier: Copy + Eq + fmt::Debug {
    /// State of a freshly initialized token
    const START: Self;
    /// Failure sentinel (terminal)
    const UNEXPECTED: Self;
    /// Clean exhaustion sentinel (terminal)
    const END_OF_INPUT: Self;

    /// Markup opener (`<`); structural recognizers are tried after it
    const ELEMENT: Self;
    /// Run of name characters following `ELEMENT`
    const ELEMENT_NAME: Self;
    /// State after `=`, from which a quote must start
    const ATTRIBUTE_ASSIGN: Self;

    const XMLDECL: Self;
    const DOCTYPE: Self;
    const CDATA: Self;
    const COMMENT: Self;

    fn transition(self, input: Option<char>) -> Self;

    /// Opening quote of an attribute value
    fn is_quote_start(self) -> bool;

    /// Closing quote of an attribute value
    fn is_quote_end(self) -> bool;

    #[inline]
    fn is_terminal(self) -> bool {
        self == Self::UNEXPECTED || self == Self::END_OF_INPUT
    }
}

/// Lexical classes of the bundled XML table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlClass {
    Start,
    Unexpected,
    EndOfInput,
    /// U+FEFF at the very start of the document
    ByteOrderMark,
    /// Character data between tags
    Text,
    /// `<`
    Element,
    /// `/` directly after `<`
    ElementClose,
    ElementName,
    /// Whitespace inside a tag
    ElementSpace,
    AttributeName,
    /// Whitespace between an attribute name and `=`
    AttributeSpace,
    /// `=`
    AttributeAssign,
    /// Whitespace between `=` and the opening quote
    ValueSpace,
    SingleQuoteStart,
    SingleQuoteValue,
    SingleQuoteEnd,
    DoubleQuoteStart,
    DoubleQuoteValue,
    DoubleQuoteEnd,
    /// `/` closing an empty element
    ElementSlash,
    /// `>`
    ElementEnd,
    XmlDecl,
    Doctype,
    CData,
    Comment,
}

impl XmlClass {
    /// Stable lowercase name, used for atoms on the Erlang side
    pub fn name(self) -> &'static str {
        match self {
            XmlClass::Start => "start",
            XmlClass::Unexpected => "unexpected",
            XmlClass::EndOfInput => "eof",
            XmlClass::ByteOrderMark => "bom",
            XmlClass::Text => "text",
            XmlClass::Element => "element",
            XmlClass::ElementClose => "element_close",
            XmlClass::ElementName => "element_name",
            XmlClass::ElementSpace => "element_space",
            XmlClass::AttributeName => "attribute_name",
            XmlClass::AttributeSpace => "attribute_space",
            XmlClass::AttributeAssign => "attribute_assign",
            XmlClass::ValueSpace => "value_space",
            XmlClass::SingleQuoteStart => "single_quote_start",
            XmlClass::SingleQuoteValue => "single_quote_value",
            XmlClass::SingleQuoteEnd => "single_quote_end",
            XmlClass::DoubleQuoteStart => "double_quote_start",
            XmlClass::DoubleQuoteValue => "double_quote_value",
            XmlClass::DoubleQuoteEnd => "double_quote_end",
            XmlClass::ElementSlash => "element_slash",
            XmlClass::ElementEnd => "element_end",
            XmlClass::XmlDecl => "xmldecl",
            XmlClass::Doctype => "doctype",
            XmlClass::CData => "cdata",
            XmlClass::Comment => "comment",
        }
    }
}

/// XML whitespace: space, tab, carriage return, line feed
#[inline]
pub fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Check if char is valid XML name start character
/// Allows ASCII letters, underscore, colon, and any non-ASCII character
#[inline]
fn is_name_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | ':') || !c.is_ascii()
}

/// Check if char is valid XML name character
#[inline]
fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_ascii_digit() || matches!(c, '-' | '.')
}

/// Transitions shared by every state that sits between tags
#[inline]
fn content(c: Option<char>) -> XmlClass {
    match c {
        None => XmlClass::EndOfInput,
        Some('<') => XmlClass::Element,
        Some(_) => XmlClass::Text,
    }
}

/// Transitions after a name or a closing quote inside a tag
#[inline]
fn inside_tag(c: Option<char>) -> XmlClass {
    match c {
        Some(c) if is_xml_whitespace(c) => XmlClass::ElementSpace,
        Some('>') => XmlClass::ElementEnd,
        Some('/') => XmlClass::ElementSlash,
        _ => XmlClass::Unexpected,
    }
}

impl Classifier for XmlClass {
    const START: Self = XmlClass::Start;
    const UNEXPECTED: Self = XmlClass::Unexpected;
    const END_OF_INPUT: Self = XmlClass::EndOfInput;
    const ELEMENT: Self = XmlClass::Element;
    const ELEMENT_NAME: Self = XmlClass::ElementName;
    const ATTRIBUTE_ASSIGN: Self = XmlClass::AttributeAssign;
    const XMLDECL: Self = XmlClass::XmlDecl;
    const DOCTYPE: Self = XmlClass::Doctype;
    const CDATA: Self = XmlClass::CData;
    const COMMENT: Self = XmlClass::Comment;

    fn transition(self, input: Option<char>) -> Self {
        use XmlClass::*;

        match self {
            Unexpected => Unexpected,
            EndOfInput => EndOfInput,

            Start => match input {
                Some('\u{FEFF}') => ByteOrderMark,
                c => content(c),
            },
            ByteOrderMark | Text | ElementEnd => content(input),

            Element => match input {
                Some('/') => ElementClose,
                Some(c) if is_name_start_char(c) => ElementName,
                _ => Unexpected,
            },
            ElementClose => match input {
                Some(c) if is_name_start_char(c) => ElementName,
                _ => Unexpected,
            },
            ElementName => match input {
                Some(c) if is_name_char(c) => ElementName,
                c => inside_tag(c),
            },
            ElementSpace => match input {
                Some(c) if is_xml_whitespace(c) => ElementSpace,
                Some(c) if is_name_start_char(c) => AttributeName,
                c => inside_tag(c),
            },
            AttributeName => match input {
                Some(c) if is_name_char(c) => AttributeName,
                Some(c) if is_xml_whitespace(c) => AttributeSpace,
                Some('=') => AttributeAssign,
                _ => Unexpected,
            },
            AttributeSpace => match input {
                Some(c) if is_xml_whitespace(c) => AttributeSpace,
                Some('=') => AttributeAssign,
                _ => Unexpected,
            },
            AttributeAssign | ValueSpace => match input {
                Some(c) if is_xml_whitespace(c) => ValueSpace,
                Some('\'') => SingleQuoteStart,
                Some('"') => DoubleQuoteStart,
                _ => Unexpected,
            },

            SingleQuoteStart | SingleQuoteValue => match input {
                Some('\'') => SingleQuoteEnd,
                None | Some('<') => Unexpected,
                Some(_) => SingleQuoteValue,
            },
            DoubleQuoteStart | DoubleQuoteValue => match input {
                Some('"') => DoubleQuoteEnd,
                None | Some('<') => Unexpected,
                Some(_) => DoubleQuoteValue,
            },
            SingleQuoteEnd | DoubleQuoteEnd => inside_tag(input),

            ElementSlash => match input {
                Some('>') => ElementEnd,
                _ => Unexpected,
            },

            XmlDecl | Doctype | CData | Comment => match input {
                Some('>') => ElementEnd,
                _ => Unexpected,
            },
        }
    }

    #[inline]
    fn is_quote_start(self) -> bool {
        matches!(self, XmlClass::SingleQuoteStart | XmlClass::DoubleQuoteStart)
    }

    #[inline]
    fn is_quote_end(self) -> bool {
        matches!(self, XmlClass::SingleQuoteEnd | XmlClass::DoubleQuoteEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(from: XmlClass, input: &str) -> Vec<XmlClass> {
        let mut state = from;
        input
            .chars()
            .map(|c| {
                state = state.transition(Some(c));
                state
            })
            .collect()
    }

    #[test]
    fn test_start_tag() {
        use XmlClass::*;
        assert_eq!(
            walk(Start, "<a b='c'>"),
            vec![
                Element,
                ElementName,
                ElementSpace,
                AttributeName,
                AttributeAssign,
                SingleQuoteStart,
                SingleQuoteValue,
                SingleQuoteEnd,
                ElementEnd
            ]
        );
    }

    #[test]
    fn test_end_and_empty_tags() {
        use XmlClass::*;
        assert_eq!(walk(Text, "</a>"), vec![Element, ElementClose, ElementName, ElementEnd]);
        assert_eq!(walk(Text, "<a/>"), vec![Element, ElementName, ElementSlash, ElementEnd]);
    }

    #[test]
    fn test_spaced_assignment() {
        use XmlClass::*;
        assert_eq!(
            walk(ElementSpace, "k = \"v\""),
            vec![
                AttributeName,
                AttributeSpace,
                AttributeAssign,
                ValueSpace,
                DoubleQuoteStart,
                DoubleQuoteValue,
                DoubleQuoteEnd
            ]
        );
    }

    #[test]
    fn test_bang_and_question_are_left_to_recognizers() {
        assert_eq!(XmlClass::Element.transition(Some('!')), XmlClass::Unexpected);
        assert_eq!(XmlClass::Element.transition(Some('?')), XmlClass::Unexpected);
        assert_eq!(XmlClass::Element.transition(Some(' ')), XmlClass::Unexpected);
    }

    #[test]
    fn test_end_of_input() {
        assert_eq!(XmlClass::Start.transition(None), XmlClass::EndOfInput);
        assert_eq!(XmlClass::ElementEnd.transition(None), XmlClass::EndOfInput);
        assert_eq!(XmlClass::ElementName.transition(None), XmlClass::Unexpected);
        assert_eq!(XmlClass::DoubleQuoteValue.transition(None), XmlClass::Unexpected);
    }

    #[test]
    fn test_sentinels_absorb() {
        assert_eq!(XmlClass::Unexpected.transition(Some('<')), XmlClass::Unexpected);
        assert_eq!(XmlClass::EndOfInput.transition(Some('a')), XmlClass::EndOfInput);
        assert!(XmlClass::Unexpected.is_terminal());
        assert!(XmlClass::EndOfInput.is_terminal());
        assert!(!XmlClass::Text.is_terminal());
    }

    #[test]
    fn test_structural_kinds_close_with_gt() {
        for kind in [XmlClass::XmlDecl, XmlClass::Doctype, XmlClass::CData, XmlClass::Comment] {
            assert_eq!(kind.transition(Some('>')), XmlClass::ElementEnd);
            assert_eq!(kind.transition(Some('x')), XmlClass::Unexpected);
        }
    }
}
