//! Function registry and active function lifecycle

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::RegistryError;
use crate::function::{builtin, RegisteredFunction, UpdateEvent};
use crate::template::{self, Template};

/// Handle to a registered function
///
/// Handles are only meaningful for the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(usize);

impl FunctionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Source of live updates that active functions subscribe to (the host event bus)
pub trait UpdateSource {
    fn subscribe(&mut self, id: FunctionId);
    fn unsubscribe(&mut self, id: FunctionId);
}

/// In-process update source recording subscriptions
///
/// Subscribing twice is a no-op, as is unsubscribing something that is not
/// subscribed.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: HashSet<FunctionId>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self, id: FunctionId) -> bool {
        self.subscribers.contains(&id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl UpdateSource for EventBus {
    fn subscribe(&mut self, id: FunctionId) {
        self.subscribers.insert(id);
    }

    fn unsubscribe(&mut self, id: FunctionId) {
        self.subscribers.remove(&id);
    }
}

/// Registry of all known functions
///
/// Holds functions in registration order together with the set of active
/// functions that are currently enabled.
#[derive(Debug)]
pub struct FunctionRegistry<S: UpdateSource = EventBus> {
    functions: Vec<RegisteredFunction>,
    enabled: HashSet<FunctionId>,
    source: S,
}

impl Default for FunctionRegistry<EventBus> {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry<EventBus> {
    /// Create an empty registry with an in-process event bus
    pub fn new() -> Self {
        Self::with_source(EventBus::new())
    }

    /// Create a registry holding the built-in functions
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }
}

impl<S: UpdateSource> FunctionRegistry<S> {
    /// Create an empty registry subscribing through `source`
    pub fn with_source(source: S) -> Self {
        Self {
            functions: Vec::new(),
            enabled: HashSet::new(),
            source,
        }
    }

    /// Register every built-in function
    pub fn register_builtins(&mut self) {
        for function in builtin::all() {
            let name = function.name().to_string();
            if let Err(e) = self.register(function) {
                // Only reachable when a caller registered a clashing name first
                warn!(target: "functions", "Skipping built-in function {}: {}", name, e);
            }
        }
    }

    /// Register a function
    ///
    /// Fails if the name or an alias is not a valid template identifier or is
    /// already taken (case-insensitively). Active functions are initialized
    /// right after they are added.
    pub fn register(&mut self, function: RegisteredFunction) -> Result<FunctionId, RegistryError> {
        let names: Vec<&str> = function.all_names().collect();

        for (i, name) in names.iter().enumerate() {
            if !template::is_valid_name(name) {
                return Err(RegistryError::invalid(*name));
            }
            if let Some(earlier) = names[..i].iter().find(|n| n.eq_ignore_ascii_case(name)) {
                return Err(RegistryError::duplicate(*name, *earlier));
            }
            if let Some(existing) = self.functions.iter().find(|f| f.has_name(name)) {
                return Err(RegistryError::duplicate(*name, existing.name()));
            }
        }

        let id = FunctionId(self.functions.len());
        debug!(target: "functions", "Registering function {} as {:?}", function.name(), id);
        self.functions.push(function);

        if let Some(RegisteredFunction::Active(active)) = self.functions.last_mut() {
            active.init();
        }
        Ok(id)
    }

    /// Get a function by handle
    pub fn get(&self, id: FunctionId) -> Option<&RegisteredFunction> {
        self.functions.get(id.0)
    }

    /// Iterate over all functions in registration order
    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &RegisteredFunction)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FunctionId(i), f))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// The update source active functions subscribe through
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Find a function by name or alias, ignoring case
    ///
    /// The earliest registered match wins.
    pub fn resolve_by_name(&self, name: &str) -> Option<FunctionId> {
        self.functions
            .iter()
            .position(|f| f.has_name(name))
            .map(FunctionId)
    }

    /// Enable a function
    ///
    /// Stateless functions are always enabled and return true. Active functions
    /// are subscribed and their `on_enable` hook runs; if it fails the
    /// subscription is rolled back and the function stays disabled.
    pub fn enable(&mut self, id: FunctionId) -> bool {
        let Some(function) = self.functions.get_mut(id.0) else {
            warn!(target: "functions", "Cannot enable unknown function {:?}", id);
            return false;
        };
        let RegisteredFunction::Active(active) = function else {
            return true;
        };

        self.source.subscribe(id);
        let succeeded = active.on_enable();

        if succeeded {
            debug!(target: "functions", "Enabled function {}", active.name());
            self.enabled.insert(id);
        } else {
            warn!(target: "functions", "Function {} failed to enable", active.name());
            self.source.unsubscribe(id);
        }
        succeeded
    }

    /// Disable a function
    ///
    /// No-op for stateless functions. Active functions are unsubscribed, their
    /// `on_disable` hook runs and they leave the enabled set, whether or not
    /// they were enabled before.
    pub fn disable(&mut self, id: FunctionId) {
        let Some(function) = self.functions.get_mut(id.0) else {
            warn!(target: "functions", "Cannot disable unknown function {:?}", id);
            return;
        };
        let RegisteredFunction::Active(active) = function else {
            return;
        };

        self.source.unsubscribe(id);
        active.on_disable();
        self.enabled.remove(&id);
        debug!(target: "functions", "Disabled function {}", active.name());
    }

    /// Check if a function is enabled; stateless functions always are
    pub fn is_enabled(&self, id: FunctionId) -> bool {
        match self.functions.get(id.0) {
            Some(RegisteredFunction::Active(_)) => self.enabled.contains(&id),
            Some(RegisteredFunction::Stateless(_)) => true,
            None => false,
        }
    }

    /// Deliver an update event to every enabled active function
    pub fn dispatch(&mut self, event: &UpdateEvent) {
        for (i, function) in self.functions.iter_mut().enumerate() {
            if let RegisteredFunction::Active(active) = function {
                if self.enabled.contains(&FunctionId(i)) {
                    active.on_update(event);
                }
            }
        }
    }

    /// Enable every active function referenced by a template
    ///
    /// Returns true only if all of them enabled successfully.
    pub fn enable_template(&mut self, template: &Template) -> bool {
        let mut all_enabled = true;
        for id in self.active_references(template) {
            all_enabled &= self.enable(id);
        }
        all_enabled
    }

    /// Disable every active function referenced by a template
    pub fn disable_template(&mut self, template: &Template) {
        for id in self.active_references(template) {
            self.disable(id);
        }
    }

    /// Distinct active functions referenced by a template, in first-use order
    fn active_references(&self, template: &Template) -> Vec<FunctionId> {
        let mut seen = HashSet::new();
        template
            .references()
            .filter_map(|r| self.resolve_by_name(&r.name))
            .filter(|id| self.get(*id).is_some_and(RegisteredFunction::is_active))
            .filter(|id| seen.insert(*id))
            .collect()
    }
}
