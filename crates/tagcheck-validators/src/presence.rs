//! Presence checks for optional values

use std::any::Any;

use tagcheck_core::{ErrorValue, Value};

macro_rules! none_of {
    ($value:expr, $($ty:ty),+ $(,)?) => {
        false $(|| $value.downcast_ref::<Option<$ty>>().is_some_and(Option::is_none))+
    };
}

/// `true` when `value` is a `None` of one of the common std element types
pub fn is_null(value: &dyn Any) -> bool {
    none_of!(
        value,
        String,
        &'static str,
        bool,
        char,
        i8,
        i16,
        i32,
        i64,
        i128,
        isize,
        u8,
        u16,
        u32,
        u64,
        u128,
        usize,
        f32,
        f64,
        Vec<u8>,
        Vec<String>,
        Box<dyn Any + Send + Sync>,
    )
}

/// Rejects missing optional values; every present value passes.
///
/// A value marked null (any `None` field of a derived record) is rejected whatever its
/// element type. Unmarked values fall back to [`is_null`].
pub fn notnull(value: &Value<'_>) -> Result<(), ErrorValue> {
    if value.is_null() || is_null(value.as_any()) {
        Err("Expected non null pointer".into())
    } else {
        Ok(())
    }
}
