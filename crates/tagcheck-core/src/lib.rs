//! # tagcheck-core
//!
//! Rule-driven validation of struct fields.
//!
//! A [`Registry`] maps rule names to validator functions. A [`Record`] describes its
//! fields (name, serialization name, rule annotation, visibility and value). The
//! [`Engine`] walks those fields in declaration order, applies the named rules, and
//! collects the first failure of each field into an [`ErrorMap`].
//!
//! ```rust
//! use std::any::Any;
//! use tagcheck_core::{ErrorValue, Field, Record, Registry, Value};
//!
//! struct Point {
//!     x: i32,
//! }
//!
//! impl Record for Point {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![Field::new("x", Value::new(&self.x)).rules("nonzero")]
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let registry = Registry::builder()
//!     .rule("nonzero", |v: &dyn Any| match v.downcast_ref::<i32>() {
//!         Some(0) => Err(ErrorValue::from("should be nonzero")),
//!         _ => Ok(()),
//!     })
//!     .build();
//!
//! let errors = registry.validate(&Point { x: 0 });
//! assert_eq!(errors.get("x"), Some(&ErrorValue::from("should be nonzero")));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod record;
pub mod registry;
pub mod value;

#[doc(hidden)]
#[path = "private.rs"]
pub mod __private;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{ConfigError, ErrorMap, ErrorValue};
pub use record::{Field, MapValue, Record, SelfValidate, IGNORE_MARKER, STRUCT_RULE};
pub use registry::{Registry, RegistryBuilder, Rule};
pub use value::Value;
