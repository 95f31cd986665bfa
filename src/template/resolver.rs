//! Template resolution - substitutes function references with formatted values

use tracing::trace;

use super::{Segment, Span, Template};
use crate::format::{StyledText, TextStyle, ValueFormatter};
use crate::host::HostState;
use crate::registry::{FunctionId, FunctionRegistry, UpdateSource};
use crate::value::Value;

/// A function reference found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionReference {
    /// Name as written in the template
    pub name: String,
    /// The function it resolves to, if any
    pub function: Option<FunctionId>,
    /// Raw argument text
    pub argument: Option<String>,
    /// Span of the reference in the template
    pub span: Span,
}

/// Renders templates against a registry, host state and formatter
pub struct TemplateResolver<'a, S: UpdateSource> {
    registry: &'a FunctionRegistry<S>,
    host: &'a dyn HostState,
    formatter: &'a ValueFormatter,
}

impl<'a, S: UpdateSource> TemplateResolver<'a, S> {
    pub fn new(
        registry: &'a FunctionRegistry<S>,
        host: &'a dyn HostState,
        formatter: &'a ValueFormatter,
    ) -> Self {
        Self {
            registry,
            host,
            formatter,
        }
    }

    /// Render a template to plain text
    ///
    /// Unknown functions and unavailable values become the absent marker; the
    /// rest of the template still renders.
    pub fn render(&self, template: &str) -> String {
        self.render_template(&Template::parse(template)).to_plain()
    }

    /// Render a template to styled text
    pub fn render_styled(&self, template: &str) -> StyledText {
        self.render_template(&Template::parse(template))
    }

    /// Render an already parsed template
    pub fn render_template(&self, template: &Template) -> StyledText {
        let mut text = StyledText::new();
        for segment in template.segments() {
            match segment {
                Segment::Literal { text: literal, .. } => {
                    text.push(literal.as_str(), TextStyle::Normal);
                }
                Segment::Reference(reference) => {
                    let value = self.value_of(&reference.name, reference.argument.as_deref());
                    text.append(
                        self.formatter
                            .format_styled(&value, &self.formatter.value_style),
                    );
                }
            }
        }
        text
    }

    /// Compute the current value of a function by name
    pub fn value_of(&self, name: &str, argument: Option<&str>) -> Value {
        let value = match self.registry.resolve_by_name(name) {
            Some(id) => self
                .registry
                .get(id)
                .map(|f| f.value(self.host, argument))
                .unwrap_or(Value::Absent),
            None => Value::Absent,
        };
        trace!(target: "template", "Resolved %{}% to {}", name, value);
        value
    }

    /// List the function references of a template in source order
    pub fn extract_functions(&self, template: &str) -> Vec<FunctionReference> {
        Template::parse(template)
            .references()
            .map(|r| FunctionReference {
                name: r.name.clone(),
                function: self.registry.resolve_by_name(&r.name),
                argument: r.argument.clone(),
                span: r.span.clone(),
            })
            .collect()
    }
}
