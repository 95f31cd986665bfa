//! Template strings with embedded function references
//!
//! A reference is written `%name%`, or `%name:argument%` for functions that
//! take an argument. The argument is the raw text between the first `:` and
//! the closing `%`. Everything outside references is literal text, including
//! a `%` that does not open a well-formed reference.
//!
//! # Example
//!
//! ```rust
//! use function_templates::Template;
//!
//! let template = Template::parse("Pos: %x%, %y:1%, %z% (100%)");
//! let names: Vec<_> = template.references().map(|r| r.name.as_str()).collect();
//! assert_eq!(names, vec!["x", "y", "z"]);
//! ```

mod grammar;
pub mod lexer;
pub mod lint;
mod resolver;

pub use lexer::Span;
pub use lint::{TemplateWarning, WarningCategory};
pub use resolver::{FunctionReference, TemplateResolver};

use grammar::RawSegment;

/// Delimiter opening and closing a function reference
pub const DELIMITER: char = '%';

/// Check whether a function name can be referenced from a template
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A function reference inside a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Function name as written
    pub name: String,
    /// Raw argument text, `None` when no `:` was given
    pub argument: Option<String>,
    /// Span of the whole reference including delimiters
    pub span: Span,
    /// Span of the name
    pub name_span: Span,
}

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal { text: String, span: Span },
    Reference(Reference),
}

/// A parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
    stray_delimiters: Vec<Span>,
}

impl Template {
    /// Parse a template; this never fails
    pub fn parse(source: &str) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut stray_delimiters = Vec::new();

        for raw in grammar::parse_segments(source) {
            match raw {
                RawSegment::Literal(span) => push_literal(&mut segments, source, span),
                RawSegment::Stray(span) => {
                    stray_delimiters.push(span.clone());
                    push_literal(&mut segments, source, span);
                }
                RawSegment::Reference {
                    name,
                    name_span,
                    has_argument,
                    span,
                } => {
                    // Argument runs from after the ':' up to the closing delimiter
                    let argument =
                        has_argument.then(|| source[name_span.end + 1..span.end - 1].to_string());
                    segments.push(Segment::Reference(Reference {
                        name,
                        argument,
                        span,
                        name_span,
                    }));
                }
            }
        }

        Self {
            source: source.to_string(),
            segments,
            stray_delimiters,
        }
    }

    /// The template source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Literal and reference segments in source order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Function references in source order
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Reference(r) => Some(r),
            Segment::Literal { .. } => None,
        })
    }

    /// Check whether the template contains any function reference
    pub fn has_references(&self) -> bool {
        self.references().next().is_some()
    }

    /// Positions of `%` characters that were kept as literal text
    pub fn stray_delimiters(&self) -> &[Span] {
        &self.stray_delimiters
    }
}

/// Append literal text, merging with a directly preceding literal
fn push_literal(segments: &mut Vec<Segment>, source: &str, span: Span) {
    if let Some(Segment::Literal {
        text,
        span: last_span,
    }) = segments.last_mut()
    {
        if last_span.end == span.start {
            text.push_str(&source[span.clone()]);
            last_span.end = span.end;
            return;
        }
    }
    segments.push(Segment::Literal {
        text: source[span.clone()].to_string(),
        span,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn literal(text: &str, span: Span) -> Segment {
        Segment::Literal {
            text: text.to_string(),
            span,
        }
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("fps"));
        assert!(is_valid_name("mem_pct"));
        assert!(is_valid_name("_x1"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1x"));
        assert!(!is_valid_name("mem%"));
        assert!(!is_valid_name("a:b"));
        assert!(!is_valid_name("wörld"));
    }

    #[test]
    fn test_plain_text_is_one_literal() {
        let template = Template::parse("no refs here");
        assert_eq!(template.segments(), &[literal("no refs here", 0..12)]);
        assert!(!template.has_references());
    }

    #[test]
    fn test_mixed_segments() {
        let template = Template::parse("FPS: %fps% @ %clockm%");
        assert_eq!(template.segments().len(), 4);
        assert_eq!(template.segments()[0], literal("FPS: ", 0..5));
        assert_eq!(template.segments()[2], literal(" @ ", 10..13));
    }

    #[test]
    fn test_argument_text_is_raw() {
        let template = Template::parse("%x: 2 %%world:a:b%");
        let args: Vec<_> = template.references().map(|r| r.argument.clone()).collect();
        assert_eq!(args, vec![Some(" 2 ".to_string()), Some("a:b".to_string())]);
    }

    #[test]
    fn test_no_argument_vs_empty_argument() {
        let template = Template::parse("%x%%y:%");
        let args: Vec<_> = template.references().map(|r| r.argument.clone()).collect();
        assert_eq!(args, vec![None, Some(String::new())]);
    }

    #[test]
    fn test_unterminated_reference_is_literal() {
        let template = Template::parse("value: %fps");
        assert_eq!(template.segments(), &[literal("value: %fps", 0..11)]);
        assert_eq!(template.stray_delimiters(), &[7..8]);
    }

    #[test]
    fn test_lone_percent_signs() {
        let template = Template::parse("50% of %% is %");
        assert!(!template.has_references());
        assert_eq!(template.segments(), &[literal("50% of %% is %", 0..14)]);
        assert_eq!(template.stray_delimiters().len(), 4);
    }
}
