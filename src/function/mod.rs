//! Functions: named providers of live game values
//!
//! A function is either stateless (computed on demand from [`HostState`]) or
//! active. Active functions keep state fed by live update events and must be
//! enabled through the [`FunctionRegistry`](crate::FunctionRegistry) before
//! their values are meaningful.
//!
//! # Example
//!
//! ```rust
//! use function_templates::{Function, HostState, Value};
//!
//! struct Fps;
//!
//! impl Function for Fps {
//!     fn name(&self) -> &str {
//!         "fps"
//!     }
//!
//!     fn translated_name(&self) -> &str {
//!         "FPS"
//!     }
//!
//!     fn value(&self, host: &dyn HostState, _argument: Option<&str>) -> Value {
//!         host.fps().into()
//!     }
//! }
//! ```

pub mod builtin;

use crate::host::HostState;
use crate::value::Value;

/// A named, optionally parameterized, read-only value provider
pub trait Function {
    /// Primary name used in templates
    fn name(&self) -> &str;

    /// Additional names resolving to this function
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// User-facing display label
    fn translated_name(&self) -> &str;

    /// Compute the current value
    fn value(&self, host: &dyn HostState, argument: Option<&str>) -> Value;
}

/// A function that needs a live update subscription while in use
pub trait ActiveFunction: Function {
    /// One-time setup, called at registration
    fn init(&mut self) {}

    /// Called after subscribing; returning false rolls the subscription back
    fn on_enable(&mut self) -> bool;

    /// Called after unsubscribing
    fn on_disable(&mut self);

    /// Receive an update event while enabled
    fn on_update(&mut self, _event: &UpdateEvent) {}
}

/// Live update events delivered to enabled active functions
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateEvent {
    /// The player moved to another world, or left the game (`None`)
    WorldChanged { world: Option<String> },
    /// A client tick elapsed
    Tick,
}

/// A function as stored by the registry, tagged with its capability set
pub enum RegisteredFunction {
    Stateless(Box<dyn Function>),
    Active(Box<dyn ActiveFunction>),
}

impl RegisteredFunction {
    /// Wrap a stateless function
    pub fn stateless(function: impl Function + 'static) -> Self {
        Self::Stateless(Box::new(function))
    }

    /// Wrap an active function
    pub fn active(function: impl ActiveFunction + 'static) -> Self {
        Self::Active(Box::new(function))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Stateless(f) => f.name(),
            Self::Active(f) => f.name(),
        }
    }

    pub fn aliases(&self) -> &[&str] {
        match self {
            Self::Stateless(f) => f.aliases(),
            Self::Active(f) => f.aliases(),
        }
    }

    pub fn translated_name(&self) -> &str {
        match self {
            Self::Stateless(f) => f.translated_name(),
            Self::Active(f) => f.translated_name(),
        }
    }

    pub fn value(&self, host: &dyn HostState, argument: Option<&str>) -> Value {
        match self {
            Self::Stateless(f) => f.value(host, argument),
            Self::Active(f) => f.value(host, argument),
        }
    }

    /// Check if this is an active function
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Check if `name` matches the primary name or an alias, ignoring case
    pub fn has_name(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
            || self.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Primary name followed by aliases
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name()).chain(self.aliases().iter().copied())
    }
}

impl std::fmt::Debug for RegisteredFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_active() { "Active" } else { "Stateless" };
        f.debug_struct(kind)
            .field("name", &self.name())
            .field("aliases", &self.aliases())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::GameSnapshot;

    struct Constant;

    impl Function for Constant {
        fn name(&self) -> &str {
            "answer"
        }

        fn aliases(&self) -> &[&str] {
            &["the_answer"]
        }

        fn translated_name(&self) -> &str {
            "Answer"
        }

        fn value(&self, _host: &dyn HostState, _argument: Option<&str>) -> Value {
            Value::Integer(42)
        }
    }

    #[test]
    fn test_has_name_ignores_case() {
        let f = RegisteredFunction::stateless(Constant);
        assert!(f.has_name("ANSWER"));
        assert!(f.has_name("The_Answer"));
        assert!(!f.has_name("answers"));
    }

    #[test]
    fn test_all_names_primary_first() {
        let f = RegisteredFunction::stateless(Constant);
        let names: Vec<_> = f.all_names().collect();
        assert_eq!(names, vec!["answer", "the_answer"]);
    }

    #[test]
    fn test_delegates_value() {
        let f = RegisteredFunction::stateless(Constant);
        assert!(!f.is_active());
        assert_eq!(f.value(&GameSnapshot::new(), None), Value::Integer(42));
    }
}
