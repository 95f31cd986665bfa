//! Formatter configuration loaded from TOML
//!
//! ```toml
//! locale = "de-DE"
//! absent_marker = "n/v"
//! value_color = "aqua"
//!
//! [number]
//! max_fraction_digits = 1
//! ```

use std::path::Path;

use serde::Deserialize;

use super::number::NumberFormat;
use super::ValueFormatter;
use crate::error::ConfigError;

/// Formatter settings as written in a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterConfig {
    /// Locale preset for numbers (`en-US` when omitted)
    pub locale: Option<String>,
    /// Text shown for absent values
    pub absent_marker: Option<String>,
    /// Host color name for values in labeled output
    pub value_color: Option<String>,
    /// Overrides applied on top of the locale preset
    #[serde(default)]
    pub number: NumberOverrides,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberOverrides {
    /// Grouping separator; an empty string disables grouping
    pub grouping: Option<String>,
    pub decimal: Option<char>,
    pub max_fraction_digits: Option<usize>,
}

impl FormatterConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the number format: locale preset first, then overrides
    pub fn number_format(&self) -> NumberFormat {
        let mut format = match &self.locale {
            Some(tag) => NumberFormat::for_locale_or_default(tag),
            None => NumberFormat::default(),
        };
        if let Some(grouping) = &self.number.grouping {
            format = format.with_grouping(grouping.chars().next());
        }
        if let Some(decimal) = self.number.decimal {
            format = format.with_decimal(decimal);
        }
        if let Some(digits) = self.number.max_fraction_digits {
            format = format.with_max_fraction_digits(digits);
        }
        format
    }

    /// Build a formatter from this configuration
    pub fn build(&self) -> ValueFormatter {
        let mut formatter = ValueFormatter::new().with_number_format(self.number_format());
        if let Some(marker) = &self.absent_marker {
            formatter = formatter.with_absent_marker(marker.clone());
        }
        if let Some(color) = &self.value_color {
            formatter = formatter.with_value_color(color.clone());
        }
        formatter
    }
}
