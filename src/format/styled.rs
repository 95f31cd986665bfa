//! Styled text handed to the host's text layer

use std::fmt;

/// Logical style of a piece of output text
///
/// The host maps these tags to concrete colors or formatting codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextStyle {
    /// Literal template text
    Normal,
    /// Function display name prefix
    Label,
    /// The not-available marker
    Absent,
    /// A named host color (e.g. `"aqua"`)
    Color(String),
}

/// One run of text with a single style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: TextStyle,
}

/// A sequence of styled spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    spans: Vec<StyledSpan>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text, merging with the previous span when the style matches
    pub fn push(&mut self, text: impl Into<String>, style: TextStyle) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&text),
            _ => self.spans.push(StyledSpan { text, style }),
        }
    }

    /// Append all spans of another styled text
    pub fn append(&mut self, other: StyledText) {
        for span in other.spans {
            self.push(span.text, span.style);
        }
    }

    pub fn spans(&self) -> &[StyledSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Concatenate the text of all spans, dropping styles
    pub fn to_plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}
