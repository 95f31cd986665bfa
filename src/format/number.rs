//! Locale-aware number formatting

use tracing::warn;

/// Separators and precision used when rendering numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    /// Thousands separator, `None` disables grouping
    pub grouping: Option<char>,
    /// Decimal separator
    pub decimal: char,
    /// Maximum number of fraction digits; trailing zeros are trimmed
    pub max_fraction_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::en_us()
    }
}

impl NumberFormat {
    pub fn en_us() -> Self {
        Self {
            grouping: Some(','),
            decimal: '.',
            max_fraction_digits: 3,
        }
    }

    pub fn de_de() -> Self {
        Self {
            grouping: Some('.'),
            decimal: ',',
            max_fraction_digits: 3,
        }
    }

    pub fn fr_fr() -> Self {
        Self {
            grouping: Some('\u{202f}'),
            decimal: ',',
            max_fraction_digits: 3,
        }
    }

    pub fn de_ch() -> Self {
        Self {
            grouping: Some('\''),
            decimal: '.',
            max_fraction_digits: 3,
        }
    }

    /// No grouping, `.` decimal separator
    pub fn plain() -> Self {
        Self {
            grouping: None,
            decimal: '.',
            max_fraction_digits: 3,
        }
    }

    /// Look up a preset by locale tag (`en-US`, `de_DE`, `fr`, ...)
    pub fn for_locale(tag: &str) -> Option<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "en" | "en-us" | "en-gb" => Some(Self::en_us()),
            "de" | "de-de" | "de-at" | "nl" | "nl-nl" | "es" | "es-es" | "it" | "it-it" => {
                Some(Self::de_de())
            }
            "fr" | "fr-fr" => Some(Self::fr_fr()),
            "de-ch" => Some(Self::de_ch()),
            "plain" | "c" | "posix" => Some(Self::plain()),
            _ => None,
        }
    }

    /// Look up a preset, falling back to `en-US` for unknown tags
    pub fn for_locale_or_default(tag: &str) -> Self {
        Self::for_locale(tag).unwrap_or_else(|| {
            warn!(target: "format", "Unknown locale '{}', using en-US", tag);
            Self::en_us()
        })
    }

    pub fn with_grouping(mut self, grouping: Option<char>) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_decimal(mut self, decimal: char) -> Self {
        self.decimal = decimal;
        self
    }

    pub fn with_max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// Format an integer with grouping
    pub fn format_integer(&self, n: i64) -> String {
        let digits = n.unsigned_abs().to_string();
        let grouped = self.group(&digits);
        if n < 0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Format a float with grouping, rounded to `max_fraction_digits`
    pub fn format_float(&self, n: f64) -> String {
        if n.is_nan() {
            return "NaN".to_string();
        }
        if n.is_infinite() {
            return if n < 0.0 { "-∞" } else { "∞" }.to_string();
        }

        let fixed = format!("{:.*}", self.max_fraction_digits, n.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
            None => (fixed.as_str(), ""),
        };

        let mut out = String::new();
        let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
        if n.is_sign_negative() && !is_zero {
            out.push('-');
        }
        out.push_str(&self.group(int_part));
        if !frac_part.is_empty() {
            out.push(self.decimal);
            out.push_str(frac_part);
        }
        out
    }

    fn group(&self, digits: &str) -> String {
        let Some(separator) = self.grouping else {
            return digits.to_string();
        };

        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(separator);
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_group_integers() {
        let fmt = NumberFormat::en_us();
        assert_eq!(fmt.format_integer(0), "0");
        assert_eq!(fmt.format_integer(60), "60");
        assert_eq!(fmt.format_integer(1234), "1,234");
        assert_eq!(fmt.format_integer(123456), "123,456");
        assert_eq!(fmt.format_integer(-1234567), "-1,234,567");
        assert_eq!(fmt.format_integer(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_float_rounding_and_trimming() {
        let fmt = NumberFormat::en_us();
        assert_eq!(fmt.format_float(1234567.891), "1,234,567.891");
        assert_eq!(fmt.format_float(2.5), "2.5");
        assert_eq!(fmt.format_float(3.0), "3");
        assert_eq!(fmt.format_float(0.12345), "0.123");
        assert_eq!(fmt.format_float(-0.0001), "0");
        assert_eq!(fmt.format_float(-12.5), "-12.5");
    }

    #[test]
    fn test_german_separators() {
        let fmt = NumberFormat::de_de();
        assert_eq!(fmt.format_float(1234567.891), "1.234.567,891");
        assert_eq!(fmt.format_integer(1234), "1.234");
    }

    #[test]
    fn test_plain_has_no_grouping() {
        let fmt = NumberFormat::plain();
        assert_eq!(fmt.format_integer(1234567), "1234567");
    }

    #[test]
    fn test_non_finite() {
        let fmt = NumberFormat::en_us();
        assert_eq!(fmt.format_float(f64::NAN), "NaN");
        assert_eq!(fmt.format_float(f64::INFINITY), "∞");
    }

    #[test]
    fn test_locale_lookup() {
        assert_eq!(NumberFormat::for_locale("de_DE"), Some(NumberFormat::de_de()));
        assert_eq!(NumberFormat::for_locale("EN-us"), Some(NumberFormat::en_us()));
        assert_eq!(NumberFormat::for_locale("tlh"), None);
        assert_eq!(NumberFormat::for_locale_or_default("tlh"), NumberFormat::en_us());
    }

    #[test]
    fn test_zero_fraction_digits() {
        let fmt = NumberFormat::en_us().with_max_fraction_digits(0);
        assert_eq!(fmt.format_float(1999.6), "2,000");
    }
}
