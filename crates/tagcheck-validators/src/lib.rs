//! Tagcheck-Validators
//!
//! Reusable validator functions for the tagcheck engine, plus a ready-made
//! [`default_registry`] that registers them under their conventional names.
//!
//! Every validator takes the field value as `&dyn Any` and reports a type mismatch as a
//! validation failure rather than panicking.

pub mod email;
pub mod numeric;
pub mod password;
pub mod pattern;
pub mod presence;
pub mod registry;
pub mod string;

pub use email::*;
pub use numeric::*;
pub use password::*;
pub use pattern::*;
pub use presence::*;
pub use registry::*;
pub use string::*;
