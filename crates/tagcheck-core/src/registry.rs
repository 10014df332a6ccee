// File: src/registry.rs
// Purpose: Named validator functions

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::engine::Engine;
use crate::error::{ErrorMap, ErrorValue};
use crate::record::Record;
use crate::value::Value;

/// A validator function: `Ok(())` when the value passes, the error payload otherwise
pub type Rule = Arc<dyn Fn(&Value<'_>) -> Result<(), ErrorValue> + Send + Sync>;

/// Mapping from rule name to validator function.
///
/// Build it once and share it; the engine only reads from it.
#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<String, Rule>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Register `rule` under `name`, replacing any earlier registration.
    ///
    /// Returns `true` if a rule of that name already existed.
    pub fn insert<F>(&mut self, name: impl Into<String>, rule: F) -> bool
    where
        F: Fn(&dyn Any) -> Result<(), ErrorValue> + Send + Sync + 'static,
    {
        self.insert_rule(name, Arc::new(move |value: &Value<'_>| rule(value.as_any())))
    }

    /// Register a rule that sees the whole [`Value`], including its null marker
    pub fn insert_value<F>(&mut self, name: impl Into<String>, rule: F) -> bool
    where
        F: Fn(&Value<'_>) -> Result<(), ErrorValue> + Send + Sync + 'static,
    {
        self.insert_rule(name, Arc::new(rule))
    }

    pub fn insert_rule(&mut self, name: impl Into<String>, rule: Rule) -> bool {
        self.rules.insert(name.into(), rule).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Copy every rule of `other` into this registry; `other` wins on conflicts
    pub fn merge(&mut self, other: &Registry) {
        for (name, rule) in &other.rules {
            self.rules.insert(name.clone(), Arc::clone(rule));
        }
    }

    /// Validate `record` with a default-configured [`Engine`]
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> ErrorMap {
        Engine::new(self).validate(record)
    }

    /// Validate an arbitrary value; anything that is not a record passes
    pub fn validate_value(&self, value: &Value<'_>) -> ErrorMap {
        Engine::new(self).validate_value(value)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("rules", &self.names()).finish()
    }
}

/// Incremental construction of a [`Registry`]
#[derive(Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn rule<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&dyn Any) -> Result<(), ErrorValue> + Send + Sync + 'static,
    {
        self.registry.insert(name, rule);
        self
    }

    pub fn value_rule<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Value<'_>) -> Result<(), ErrorValue> + Send + Sync + 'static,
    {
        self.registry.insert_value(name, rule);
        self
    }

    pub fn extend(mut self, other: &Registry) -> Self {
        self.registry.merge(other);
        self
    }

    pub fn build(self) -> Registry {
        self.registry
    }
}
