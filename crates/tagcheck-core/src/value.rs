// File: src/value.rs
// Purpose: Dynamically typed view over a field value

use std::any::Any;
use std::fmt;

use crate::record::Record;

/// A field value as seen by validator functions.
///
/// Validators receive the value as `&dyn Any` and downcast to the concrete types
/// they understand. A value created with [`Value::record`] can additionally be
/// walked by the engine when a field carries the `struct` rule. A value built from an
/// empty `Option` is marked null whatever its element type.
pub struct Value<'a> {
    repr: Repr<'a>,
    null: bool,
}

enum Repr<'a> {
    Plain(&'a dyn Any),
    Record(&'a dyn Record),
    OwnedPlain(Box<dyn Any>),
    OwnedRecord(Box<dyn Record>),
}

impl<'a> Value<'a> {
    /// Borrow a plain value
    pub fn new<T: Any>(value: &'a T) -> Self {
        Self {
            repr: Repr::Plain(value),
            null: false,
        }
    }

    /// Borrow an already type-erased value
    pub fn from_any(value: &'a dyn Any) -> Self {
        Self {
            repr: Repr::Plain(value),
            null: false,
        }
    }

    /// Borrow an optional value; `None` is null
    pub fn option<T: Any>(value: &'a Option<T>) -> Self {
        Self::new(value).with_null(value.is_none())
    }

    /// Borrow a value that the engine may descend into
    pub fn record<R: Record>(record: &'a R) -> Self {
        Self {
            repr: Repr::Record(record),
            null: false,
        }
    }

    /// Take ownership of a computed value (used by projections)
    pub fn owned<T: Any>(value: T) -> Value<'static> {
        Value {
            repr: Repr::OwnedPlain(Box::new(value)),
            null: false,
        }
    }

    /// Take ownership of a computed record (used by projections)
    pub fn owned_record<R: Record>(record: R) -> Value<'static> {
        Value {
            repr: Repr::OwnedRecord(Box::new(record)),
            null: false,
        }
    }

    pub fn with_null(mut self, null: bool) -> Self {
        self.null = null;
        self
    }

    /// Whether the value is a missing optional
    pub fn is_null(&self) -> bool {
        self.null
    }

    pub fn as_any(&self) -> &dyn Any {
        match &self.repr {
            Repr::Plain(v) => *v,
            Repr::Record(r) => r.as_any(),
            Repr::OwnedPlain(v) => &**v,
            Repr::OwnedRecord(r) => (**r).as_any(),
        }
    }

    /// The record view, if this value was built from a [`Record`]
    pub fn as_record(&self) -> Option<&dyn Record> {
        match &self.repr {
            Repr::Record(r) => Some(*r),
            Repr::OwnedRecord(r) => Some(&**r),
            Repr::Plain(_) | Repr::OwnedPlain(_) => None,
        }
    }

    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.repr {
            Repr::Plain(_) => "plain",
            Repr::Record(_) => "record",
            Repr::OwnedPlain(_) => "owned",
            Repr::OwnedRecord(_) => "owned_record",
        };
        f.debug_struct("Value")
            .field("kind", &kind)
            .field("null", &self.null)
            .finish()
    }
}
