// File: src/error.rs
// Purpose: Error payloads produced by validators and the error mapping returned by the engine

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Payload returned by a failing rule.
///
/// The engine never inspects a payload beyond storing it, so validators are free to
/// pick whichever shape suits them: a message, a nested mapping, per-index results, or
/// arbitrary JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorValue {
    Message(String),
    /// Errors keyed by field, produced by nested records and self-validating types
    Fields(ErrorMap),
    /// Errors keyed by element index, for validators that check each element of a sequence
    Indexed(BTreeMap<usize, ErrorValue>),
    /// Positional results where passing elements are `None`
    List(Vec<Option<ErrorValue>>),
    Json(serde_json::Value),
}

impl ErrorValue {
    /// Wrap any error type as a message payload
    pub fn from_error<E: std::error::Error>(err: E) -> Self {
        ErrorValue::Message(err.to_string())
    }

    pub fn as_message(&self) -> Option<&str> {
        match self {
            ErrorValue::Message(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&ErrorMap> {
        match self {
            ErrorValue::Fields(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_indexed(&self) -> Option<&BTreeMap<usize, ErrorValue>> {
        match self {
            ErrorValue::Indexed(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorValue::Message(msg) => f.write_str(msg),
            ErrorValue::Json(serde_json::Value::String(s)) => f.write_str(s),
            other => match serde_json::to_string(other) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl From<&str> for ErrorValue {
    fn from(msg: &str) -> Self {
        ErrorValue::Message(msg.to_string())
    }
}

impl From<String> for ErrorValue {
    fn from(msg: String) -> Self {
        ErrorValue::Message(msg)
    }
}

impl From<ErrorMap> for ErrorValue {
    fn from(map: ErrorMap) -> Self {
        ErrorValue::Fields(map)
    }
}

impl From<BTreeMap<usize, ErrorValue>> for ErrorValue {
    fn from(map: BTreeMap<usize, ErrorValue>) -> Self {
        ErrorValue::Indexed(map)
    }
}

impl From<Vec<Option<ErrorValue>>> for ErrorValue {
    fn from(list: Vec<Option<ErrorValue>>) -> Self {
        ErrorValue::List(list)
    }
}

impl From<serde_json::Value> for ErrorValue {
    fn from(value: serde_json::Value) -> Self {
        ErrorValue::Json(value)
    }
}

impl From<ConfigError> for ErrorValue {
    fn from(err: ConfigError) -> Self {
        ErrorValue::from_error(err)
    }
}

/// Errors keyed by a record's external field names.
///
/// An empty map means validation passed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, ErrorValue>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, error: impl Into<ErrorValue>) -> Option<ErrorValue> {
        self.0.insert(key.into(), error.into())
    }

    pub fn get(&self, key: &str) -> Option<&ErrorValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ErrorValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// `Ok(())` when no field failed, otherwise the map itself
    pub fn into_result(self) -> Result<(), ErrorMap> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl std::error::Error for ErrorMap {}

impl IntoIterator for ErrorMap {
    type Item = (String, ErrorValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ErrorValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<ErrorValue>> FromIterator<(K, V)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Misconfiguration detected while validating. Reported per field, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("undefined validator: {0:?}")]
    UndefinedValidator(String),

    #[error("maximum nesting depth of {0} exceeded")]
    DepthExceeded(usize),
}
