//! Function Templates - live game values in chat and HUD text
//!
//! This library provides a registry of named value providers ("functions"),
//! their enable/disable lifecycle, locale-aware value formatting, and a
//! template resolver that substitutes `%name%` references with current values.
//!
//! # Example
//!
//! ```rust
//! use function_templates::{render, FunctionRegistry, GameSnapshot};
//!
//! let registry = FunctionRegistry::with_builtins();
//! let host = GameSnapshot::new().with_fps(60).with_position(120.4, 64.0, -33.9);
//!
//! let text = render("FPS: %fps% | %x%, %y%, %z%", &registry, &host);
//! assert_eq!(text, "FPS: 60 | 120, 64, -34");
//! ```

pub mod error;
pub mod format;
pub mod function;
pub mod host;
pub mod registry;
pub mod template;
pub mod value;

pub use error::{ConfigError, RegistryError};
pub use format::{FormatterConfig, NumberFormat, StyledText, TextStyle, ValueFormatter};
pub use function::{ActiveFunction, Function, RegisteredFunction, UpdateEvent};
pub use host::{GameSnapshot, HostState, MemoryStats, Position};
pub use registry::{EventBus, FunctionId, FunctionRegistry, UpdateSource};
pub use template::{FunctionReference, Template, TemplateResolver, TemplateWarning};
pub use value::Value;

/// Render a template with the default `en-US` formatter
///
/// # Example
///
/// ```rust
/// use function_templates::{render, FunctionRegistry, GameSnapshot};
///
/// let registry = FunctionRegistry::with_builtins();
/// let text = render("World: %world%", &registry, &GameSnapshot::new());
/// assert_eq!(text, "World: N/A");
/// ```
pub fn render<S: UpdateSource>(
    template: &str,
    registry: &FunctionRegistry<S>,
    host: &dyn HostState,
) -> String {
    render_with_formatter(template, registry, host, &ValueFormatter::default())
}

/// Render a template with a custom formatter
///
/// # Example
///
/// ```rust
/// use function_templates::{render_with_formatter, FunctionRegistry, GameSnapshot, ValueFormatter};
///
/// let registry = FunctionRegistry::with_builtins();
/// let host = GameSnapshot::new().with_memory(16 << 30, 4 << 30);
/// let formatter = ValueFormatter::for_locale("de-DE");
///
/// let text = render_with_formatter("%mem_used%/%mem_max% MB", &registry, &host, &formatter);
/// assert_eq!(text, "4.096/16.384 MB");
/// ```
pub fn render_with_formatter<S: UpdateSource>(
    template: &str,
    registry: &FunctionRegistry<S>,
    host: &dyn HostState,
    formatter: &ValueFormatter,
) -> String {
    TemplateResolver::new(registry, host, formatter).render(template)
}

/// Check a template for mistakes against a registry
pub fn check<S: UpdateSource>(template: &str, registry: &FunctionRegistry<S>) -> Vec<TemplateWarning> {
    template::lint::check(&Template::parse(template), registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fps() {
        let registry = FunctionRegistry::with_builtins();
        let host = GameSnapshot::new().with_fps(60);
        assert!(render("%fps%", &registry, &host).contains("60"));
    }

    #[test]
    fn test_render_world_after_enable() {
        let mut registry = FunctionRegistry::with_builtins();
        let template = Template::parse("In %world%");
        assert!(registry.enable_template(&template));

        registry.dispatch(&UpdateEvent::WorldChanged {
            world: Some("WC3".to_string()),
        });
        assert_eq!(render("In %world%", &registry, &GameSnapshot::new()), "In WC3");

        registry.disable_template(&template);
        assert_eq!(render("In %world%", &registry, &GameSnapshot::new()), "In N/A");
    }

    #[test]
    fn test_render_with_locale() {
        let registry = FunctionRegistry::with_builtins();
        let host = GameSnapshot::new().with_position(1234.5678, 0.0, 0.0);
        let formatter = ValueFormatter::for_locale("de-DE");
        assert_eq!(
            render_with_formatter("%x:3%", &registry, &host, &formatter),
            "1.234,568"
        );
    }

    #[test]
    fn test_check_reports_unknown() {
        let registry = FunctionRegistry::with_builtins();
        let warnings = check("%fsp%", &registry);
        assert_eq!(warnings.len(), 1);
    }
}
