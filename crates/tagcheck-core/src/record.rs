// File: src/record.rs
// Purpose: Field descriptors and the capability traits a field value may opt into

use std::any::Any;

use crate::error::ErrorValue;
use crate::value::Value;

/// Serialization-name override that means "use the declared name"
pub const IGNORE_MARKER: &str = "-";

/// Rule name reserved by the engine for recursive validation
pub const STRUCT_RULE: &str = "struct";

/// A struct-like value whose fields the engine can walk.
///
/// Usually implemented with `#[derive(Record)]`. `fields` must return descriptors in
/// declaration order; rule functions may rely on that order.
pub trait Record: Any {
    fn fields(&self) -> Vec<Field<'_>>;

    fn as_any(&self) -> &dyn Any;
}

/// A field value that validates itself instead of going through its rule annotation.
pub trait SelfValidate {
    fn validate(&self) -> Result<(), ErrorValue>;
}

/// A field value that presents a substitute value to validators.
pub trait MapValue {
    fn map_value(&self) -> Value<'_>;
}

/// Descriptor for one field of a [`Record`]
pub struct Field<'a> {
    pub name: &'static str,
    pub rename: Option<&'static str>,
    /// Raw comma-separated rule annotation
    pub rules: &'static str,
    pub visible: bool,
    pub value: Value<'a>,
    pub self_validate: Option<&'a dyn SelfValidate>,
    pub map_value: Option<&'a dyn MapValue>,
}

impl<'a> Field<'a> {
    /// A visible field with no rules
    pub fn new(name: &'static str, value: Value<'a>) -> Self {
        Self {
            name,
            rename: None,
            rules: "",
            visible: true,
            value,
            self_validate: None,
            map_value: None,
        }
    }

    pub fn rules(mut self, rules: &'static str) -> Self {
        self.rules = rules;
        self
    }

    pub fn rename(mut self, rename: &'static str) -> Self {
        self.rename = Some(rename);
        self
    }

    pub fn private(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn self_validating(mut self, target: Option<&'a dyn SelfValidate>) -> Self {
        self.self_validate = target;
        self
    }

    pub fn mapped(mut self, target: Option<&'a dyn MapValue>) -> Self {
        self.map_value = target;
        self
    }

    /// Key used in the error map
    pub fn key(&self) -> &'static str {
        match self.rename {
            Some(rename) if !rename.is_empty() && rename != IGNORE_MARKER => rename,
            _ => self.name,
        }
    }

    /// Rule names in declaration order
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> {
        self.rules
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("rename", &self.rename)
            .field("rules", &self.rules)
            .field("visible", &self.visible)
            .field("self_validate", &self.self_validate.is_some())
            .field("map_value", &self.map_value.is_some())
            .finish()
    }
}

impl<R: Record> Record for Box<R> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }
}

// A missing record has no fields and therefore always passes.
impl<R: Record> Record for Option<R> {
    fn fields(&self) -> Vec<Field<'_>> {
        match self {
            Some(record) => record.fields(),
            None => Vec::new(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
