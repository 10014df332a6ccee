//! # tagcheck
//!
//! Struct-field validation driven by per-field rule annotations.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::any::Any;
//! use tagcheck::{ErrorValue, Record, Registry};
//!
//! #[derive(Record)]
//! struct Inner {
//!     #[validate("nonzero")]
//!     pub a: i32,
//! }
//!
//! #[derive(Record)]
//! struct Outer {
//!     #[serde(rename = "x")]
//!     #[validate("struct")]
//!     pub inner: Inner,
//! }
//!
//! let registry = Registry::builder()
//!     .rule("nonzero", |v: &dyn Any| match v.downcast_ref::<i32>() {
//!         Some(0) => Err(ErrorValue::from("should be nonzero")),
//!         _ => Ok(()),
//!     })
//!     .build();
//!
//! let errors = registry.validate(&Outer { inner: Inner { a: 0 } });
//! assert_eq!(errors.to_string(), r#"{"x":{"a":"should be nonzero"}}"#);
//! ```
//!
//! ## Features
//!
//! - **`default`** - Engine, registry and the `Record` derive
//! - **`validators`** - Re-export the reusable validator library as [`validators`]
//!
//! ## Architecture
//!
//! This crate is a convenience wrapper that re-exports three component crates:
//!
//! - **`tagcheck-core`** - Registry, engine, error payloads and field descriptors
//! - **`tagcheck-derive`** - `#[derive(Record)]`
//! - **`tagcheck-validators`** - Reusable validator functions (optional)

// Re-export derive macro (always available)
pub use tagcheck_derive::Record;

// Re-export core types
pub use tagcheck_core::{
    ConfigError, Engine, EngineConfig, ErrorMap, ErrorValue, Field, MapValue, Record,
    Registry, RegistryBuilder, Rule, SelfValidate, Value, IGNORE_MARKER, STRUCT_RULE,
};

// Module paths for users who want them
pub use tagcheck_core::{config, engine, error, record, registry, value};

#[doc(hidden)]
pub use tagcheck_core::__private;

// Re-export validator library (if feature enabled)
#[cfg(feature = "validators")]
pub use tagcheck_validators as validators;
