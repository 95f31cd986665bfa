//! Turning function values into display text

mod config;
mod number;
mod styled;

pub use config::{FormatterConfig, NumberOverrides};
pub use number::NumberFormat;
pub use styled::{StyledSpan, StyledText, TextStyle};

use crate::function::RegisteredFunction;
use crate::host::HostState;
use crate::value::Value;

/// Default marker for absent values
pub const ABSENT_MARKER: &str = "N/A";

/// Formats values for display
#[derive(Debug, Clone)]
pub struct ValueFormatter {
    /// Number separators and precision
    pub number: NumberFormat,
    /// Text shown for absent values
    pub absent_marker: String,
    /// Style of present values when no explicit style is requested
    pub value_style: TextStyle,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self {
            number: NumberFormat::default(),
            absent_marker: ABSENT_MARKER.to_string(),
            value_style: TextStyle::Normal,
        }
    }
}

impl ValueFormatter {
    /// Create a formatter with `en-US` numbers and the default marker
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter for a locale tag
    pub fn for_locale(tag: &str) -> Self {
        Self::default().with_number_format(NumberFormat::for_locale_or_default(tag))
    }

    pub fn with_number_format(mut self, number: NumberFormat) -> Self {
        self.number = number;
        self
    }

    pub fn with_absent_marker(mut self, marker: impl Into<String>) -> Self {
        self.absent_marker = marker.into();
        self
    }

    /// Render values in the given host color
    pub fn with_value_color(mut self, color: impl Into<String>) -> Self {
        self.value_style = TextStyle::Color(color.into());
        self
    }

    /// Format a value as plain text
    pub fn format(&self, value: &Value) -> String {
        match value {
            Value::Integer(n) => self.number.format_integer(*n),
            Value::Float(n) => self.number.format_float(*n),
            Value::Text(s) => s.clone(),
            Value::Absent => self.absent_marker.clone(),
        }
    }

    /// Format a value as styled text, marking absent values
    pub fn format_styled(&self, value: &Value, style: &TextStyle) -> StyledText {
        let mut text = StyledText::new();
        if value.is_absent() {
            text.push(self.absent_marker.clone(), TextStyle::Absent);
        } else {
            text.push(self.format(value), style.clone());
        }
        text
    }

    /// Render a function's current value, optionally prefixed with its name
    ///
    /// The prefix reads `"<translated name>: "` in the label style. The value
    /// uses `style`, or the absent style when no value is available.
    pub fn render_labeled(
        &self,
        function: &RegisteredFunction,
        host: &dyn HostState,
        argument: Option<&str>,
        style: &TextStyle,
        include_name: bool,
    ) -> StyledText {
        let mut text = StyledText::new();
        if include_name {
            text.push(format!("{}: ", function.translated_name()), TextStyle::Label);
        }
        let value = function.value(host, argument);
        text.append(self.format_styled(&value, style));
        text
    }
}
