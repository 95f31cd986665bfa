//! Template checks: unknown functions, stray delimiters and disabled functions
//!
//! Rendering never fails, so these checks are the only way to find mistakes
//! in a template before it shows "N/A" in game.

use std::fmt;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use super::{Span, Template, DELIMITER};
use crate::registry::{FunctionRegistry, UpdateSource};

/// A warning about a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateWarning {
    pub category: WarningCategory,
    pub message: String,
    pub span: Span,
    /// Similar function names, for unknown functions
    pub suggestions: Vec<String>,
}

/// Category of template warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCategory {
    /// Reference to a name no function has
    UnknownFunction,
    /// A `%` that does not form a reference
    StrayDelimiter,
    /// Reference to an active function that is not enabled
    DisabledFunction,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningCategory::UnknownFunction => write!(f, "unknown-function"),
            WarningCategory::StrayDelimiter => write!(f, "stray-delimiter"),
            WarningCategory::DisabledFunction => write!(f, "disabled-function"),
        }
    }
}

impl TemplateWarning {
    /// Format the warning with source context using ariadne
    pub fn format(&self, source: &str, filename: &str, color: bool) -> String {
        let note = if self.suggestions.is_empty() {
            String::new()
        } else {
            format!("\nDid you mean: {}", self.suggestions.join(", "))
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Warning, filename, self.span.start)
            .with_config(Config::default().with_color(color))
            .with_message(format!("[{}] {}", self.category, self.message))
            .with_label(
                Label::new((filename, self.span.clone()))
                    .with_message(format!("{}{}", self.message, note))
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: [{}] {}{}", filename, self.category, self.message, note),
        }
    }
}

/// Run all checks on a template
pub fn check<S: UpdateSource>(template: &Template, registry: &FunctionRegistry<S>) -> Vec<TemplateWarning> {
    let mut warnings = Vec::new();
    check_references(template, registry, &mut warnings);
    check_stray_delimiters(template, &mut warnings);
    warnings.sort_by_key(|w| w.span.start);
    warnings
}

fn check_references<S: UpdateSource>(
    template: &Template,
    registry: &FunctionRegistry<S>,
    warnings: &mut Vec<TemplateWarning>,
) {
    for reference in template.references() {
        match registry.resolve_by_name(&reference.name) {
            None => {
                let known: Vec<&str> = registry
                    .functions()
                    .flat_map(|(_, f)| f.all_names())
                    .collect();
                warnings.push(TemplateWarning {
                    category: WarningCategory::UnknownFunction,
                    message: format!("unknown function '{}'", reference.name),
                    span: reference.name_span.clone(),
                    suggestions: find_similar(&known, &reference.name, 2),
                });
            }
            Some(id) if !registry.is_enabled(id) => {
                warnings.push(TemplateWarning {
                    category: WarningCategory::DisabledFunction,
                    message: format!(
                        "function '{}' is not enabled and will render as absent",
                        reference.name
                    ),
                    span: reference.name_span.clone(),
                    suggestions: Vec::new(),
                });
            }
            Some(_) => {}
        }
    }
}

fn check_stray_delimiters(template: &Template, warnings: &mut Vec<TemplateWarning>) {
    for span in template.stray_delimiters() {
        warnings.push(TemplateWarning {
            category: WarningCategory::StrayDelimiter,
            message: format!(
                "'{}' does not start a function reference and is shown as text",
                DELIMITER
            ),
            span: span.clone(),
            suggestions: Vec::new(),
        });
    }
}

/// Compute Levenshtein edit distance between two strings, ignoring ASCII case
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().map(|c| c.to_ascii_lowercase()).collect();
    let b_chars: Vec<char> = b.chars().map(|c| c.to_ascii_lowercase()).collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Find similar names within a maximum edit distance, closest first
fn find_similar(known: &[&str], target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = known
        .iter()
        .map(|name| (*name, levenshtein_distance(name, target)))
        .filter(|(_, dist)| *dist <= max_distance && *dist > 0)
        .collect();

    candidates.sort_by_key(|(_, d)| *d);
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("fps", "fps"), 0);
        assert_eq!(levenshtein_distance("fps", "FPS"), 0);
        assert_eq!(levenshtein_distance("clock", "clok"), 1);
        assert_eq!(levenshtein_distance("cat", "dog"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_find_similar() {
        let known = ["clock", "clockm", "fps"];
        let suggestions = find_similar(&known, "clok", 2);
        assert_eq!(suggestions, vec!["clock".to_string(), "clockm".to_string()]);
    }

    #[test]
    fn test_clean_template_has_no_warnings() {
        let registry = FunctionRegistry::with_builtins();
        let template = Template::parse("%x% %y% %z% @ %clock%");
        assert!(check(&template, &registry).is_empty());
    }

    #[test]
    fn test_unknown_function_with_suggestion() {
        let registry = FunctionRegistry::with_builtins();
        let template = Template::parse("FPS: %fsp%");
        let warnings = check(&template, &registry);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, WarningCategory::UnknownFunction);
        assert_eq!(warnings[0].span, 6..9);
        assert_eq!(warnings[0].suggestions, vec!["fps".to_string()]);
    }

    #[test]
    fn test_disabled_active_function() {
        let mut registry = FunctionRegistry::with_builtins();
        let template = Template::parse("%world%");
        let warnings = check(&template, &registry);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, WarningCategory::DisabledFunction);

        registry.enable_template(&template);
        assert!(check(&template, &registry).is_empty());
    }

    #[test]
    fn test_warnings_sorted_by_position() {
        let registry = FunctionRegistry::with_builtins();
        let template = Template::parse("100% %nope%");
        let categories: Vec<_> = check(&template, &registry)
            .iter()
            .map(|w| w.category)
            .collect();
        assert_eq!(
            categories,
            vec![WarningCategory::StrayDelimiter, WarningCategory::UnknownFunction]
        );
    }

    #[test]
    fn test_format_report() {
        let registry = FunctionRegistry::with_builtins();
        let source = "%clok%";
        let warnings = check(&Template::parse(source), &registry);
        let report = warnings[0].format(source, "hud.txt", false);

        assert!(report.contains("unknown function 'clok'"));
        assert!(report.contains("Did you mean: clock"));
        assert!(report.contains("hud.txt"));
    }
}
