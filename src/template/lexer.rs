//! Lexer for template strings using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Template tokens
///
/// Every byte of the input belongs to exactly one token, so literal text can
/// always be recovered from token spans.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// Opens and closes a function reference
    #[token("%")]
    Delimiter,

    /// Separates a function name from its argument
    #[token(":")]
    Colon,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Anything else: whitespace, digits, punctuation, non-ASCII text
    #[regex(r"[^%:a-zA-Z_]+")]
    Text,
}

/// Tokenize a template into tokens with their byte spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Text), span))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tokens() {
        let tokens: Vec<_> = lex("%fps%").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Delimiter,
                Token::Ident("fps".to_string()),
                Token::Delimiter
            ]
        );
    }

    #[test]
    fn test_argument_tokens() {
        let tokens: Vec<_> = lex("%x:2%").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Delimiter,
                Token::Ident("x".to_string()),
                Token::Colon,
                Token::Text,
                Token::Delimiter
            ]
        );
    }

    #[test]
    fn test_identifiers_with_digits() {
        let tokens: Vec<_> = lex("mem_pct2 1x").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("mem_pct2".to_string()),
                Token::Text,
                Token::Ident("x".to_string())
            ]
        );
    }

    #[test]
    fn test_spans_cover_input() {
        let input = "Pos: %x%, %y%! ünïcode";
        let mut end = 0;
        for (_, span) in lex(input) {
            assert_eq!(span.start, end);
            end = span.end;
        }
        assert_eq!(end, input.len());
    }
}
