//! Template parser using chumsky
//!
//! Grammar:
//!
//! ```text
//! template  := segment*
//! segment   := reference | '%' | <any other token>
//! reference := '%' IDENT (':' <any token but '%'>*)? '%'
//! ```
//!
//! A `%` that does not start a well-formed reference is kept as literal text,
//! so every input parses.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use tracing::warn;

use super::lexer::{Span, Token};

/// A segment as recognized by the grammar, before text is attached
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawSegment {
    /// Plain text token
    Literal(Span),
    /// A `%` that does not open a reference
    Stray(Span),
    /// `%name%` or `%name:argument%`
    Reference {
        name: String,
        name_span: Span,
        has_argument: bool,
        span: Span,
    },
}

/// Parse template source into raw segments
pub(crate) fn parse_segments(input: &str) -> Vec<RawSegment> {
    let len = input.len();
    if len == 0 {
        return Vec::new();
    }

    // Create a logos lexer and convert to token stream
    let token_iter = super::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    match template_parser().parse(token_stream).into_result() {
        Ok(segments) => segments,
        Err(errs) => {
            // Every token is accepted as literal text, so this means a grammar bug
            warn!(target: "template", "Template parse failed with {} error(s), treating as literal", errs.len());
            vec![RawSegment::Literal(0..len)]
        }
    }
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> Span {
    e.start()..e.end()
}

fn template_parser<'a, I>() -> impl Parser<'a, I, Vec<RawSegment>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Ident(s) => s,
    }
    .map_with(|s, e| (s, span_range(&e.span())));

    // The raw argument text is sliced from the source later; only its presence matters here
    let argument = just(Token::Colon)
        .ignore_then(
            any()
                .filter(|t: &Token| *t != Token::Delimiter)
                .repeated(),
        )
        .or_not()
        .map(|arg| arg.is_some());

    let reference = just(Token::Delimiter)
        .ignore_then(name)
        .then(argument)
        .then_ignore(just(Token::Delimiter))
        .map_with(|((name, name_span), has_argument), e| RawSegment::Reference {
            name,
            name_span,
            has_argument,
            span: span_range(&e.span()),
        });

    let stray = just(Token::Delimiter).map_with(|_, e| RawSegment::Stray(span_range(&e.span())));

    let literal = any().map_with(|_, e| RawSegment::Literal(span_range(&e.span())));

    // Order matters: a full reference is tried before a lone delimiter
    choice((reference, stray, literal))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str, name_span: Span, has_argument: bool, span: Span) -> RawSegment {
        RawSegment::Reference {
            name: name.to_string(),
            name_span,
            has_argument,
            span,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_segments("").is_empty());
    }

    #[test]
    fn test_single_reference() {
        assert_eq!(parse_segments("%fps%"), vec![reference("fps", 1..4, false, 0..5)]);
    }

    #[test]
    fn test_reference_with_argument() {
        assert_eq!(parse_segments("%x:2%"), vec![reference("x", 1..2, true, 0..5)]);
    }

    #[test]
    fn test_reference_with_empty_argument() {
        assert_eq!(parse_segments("%x:%"), vec![reference("x", 1..2, true, 0..4)]);
    }

    #[test]
    fn test_adjacent_references() {
        assert_eq!(
            parse_segments("%x%%y%"),
            vec![
                reference("x", 1..2, false, 0..3),
                reference("y", 4..5, false, 3..6)
            ]
        );
    }

    #[test]
    fn test_unterminated_reference() {
        assert_eq!(
            parse_segments("v %fps"),
            vec![
                RawSegment::Literal(0..1),
                RawSegment::Literal(1..2),
                RawSegment::Stray(2..3),
                RawSegment::Literal(3..6),
            ]
        );
    }

    #[test]
    fn test_percent_sign_before_reference() {
        let segments = parse_segments("100% %fps%");
        assert_eq!(segments.last(), Some(&reference("fps", 6..9, false, 5..10)));
        assert!(segments.contains(&RawSegment::Stray(3..4)));
    }
}
