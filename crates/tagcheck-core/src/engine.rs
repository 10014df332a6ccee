// File: src/engine.rs
// Purpose: Rule dispatch over a record's fields

use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::error::{ConfigError, ErrorMap, ErrorValue};
use crate::record::{Field, Record, STRUCT_RULE};
use crate::registry::Registry;
use crate::value::Value;

/// Applies the rules declared on a record's fields using a [`Registry`].
///
/// Fields are visited in declaration order. For each visible field:
///
/// 1. a [`SelfValidate`](crate::SelfValidate) value validates itself and its rules are ignored;
/// 2. otherwise the value (or its [`MapValue`](crate::MapValue) projection) is passed to each
///    named rule in turn, and the first failure becomes the field's entry;
/// 3. the reserved `struct` rule validates the value as a nested record instead of
///    consulting the registry.
#[derive(Debug, Clone)]
pub struct Engine<'r> {
    registry: &'r Registry,
    config: EngineConfig,
}

impl<'r> Engine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a record, returning errors keyed by external field name
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> ErrorMap {
        self.walk(record, 0)
    }

    /// Validate a dynamically typed value. Values that are not records always pass.
    pub fn validate_value(&self, value: &Value<'_>) -> ErrorMap {
        match value.as_record() {
            Some(record) => self.walk(record, 0),
            None => {
                trace!("value is not a record, skipping validation");
                ErrorMap::new()
            }
        }
    }

    fn walk<R: Record + ?Sized>(&self, record: &R, depth: usize) -> ErrorMap {
        let mut errors = ErrorMap::new();
        let fields = record.fields();
        debug!(fields = fields.len(), depth, "validating record");

        for field in fields {
            if !field.visible {
                trace!(field = field.name, "skipping private field");
                continue;
            }

            if let Some(error) = self.check_field(&field, depth) {
                debug!(field = field.key(), depth, error = %error, "field failed validation");
                errors.insert(field.key(), error);
            }
        }

        errors
    }

    fn check_field(&self, field: &Field<'_>, depth: usize) -> Option<ErrorValue> {
        if let Some(target) = field.self_validate {
            return target.validate().err();
        }

        let projected = field.map_value.map(|target| target.map_value());
        let value = projected.as_ref().unwrap_or(&field.value);

        for name in field.rule_names() {
            if name == STRUCT_RULE {
                if let Some(error) = self.descend(field, value, depth) {
                    return Some(error);
                }
                continue;
            }

            let Some(rule) = self.registry.get(name) else {
                warn!(field = field.name, rule = name, "undefined validator");
                return Some(ConfigError::UndefinedValidator(name.to_string()).into());
            };

            trace!(field = field.name, rule = name, "applying rule");
            if let Err(error) = rule(value) {
                return Some(error);
            }
        }

        None
    }

    fn descend(&self, field: &Field<'_>, value: &Value<'_>, depth: usize) -> Option<ErrorValue> {
        let Some(nested) = value.as_record() else {
            trace!(field = field.name, "struct rule on a non-record value");
            return None;
        };

        if depth >= self.config.max_depth {
            warn!(field = field.name, max_depth = self.config.max_depth, "nesting too deep");
            return Some(ConfigError::DepthExceeded(self.config.max_depth).into());
        }

        let errors = self.walk(nested, depth + 1);
        if errors.is_empty() {
            None
        } else {
            Some(ErrorValue::Fields(errors))
        }
    }
}
