//! Numeric validation functions

use std::any::Any;

use tagcheck_core::ErrorValue;

macro_rules! signed_is_negative {
    ($value:expr, $($ty:ty),+) => {{
        let value = $value;
        $(
            if let Some(n) = value.downcast_ref::<$ty>() {
                return Some(*n < 0);
            }
        )+
    }};
}

macro_rules! is_unsigned {
    ($value:expr, $($ty:ty),+) => {
        false $(|| $value.is::<$ty>())+
    };
}

/// `Some(true)` for a negative signed integer, `Some(false)` for any other integer
fn integer_sign(value: &dyn Any) -> Option<bool> {
    signed_is_negative!(value, i8, i16, i32, i64, i128, isize);

    if is_unsigned!(value, u8, u16, u32, u64, u128, usize) {
        return Some(false);
    }

    None
}

/// Rejects negative integers and anything that is not an integer
pub fn nonnegative(value: &dyn Any) -> Result<(), ErrorValue> {
    match integer_sign(value) {
        Some(false) => Ok(()),
        Some(true) => Err("Should be nonnegative".into()),
        None => Err("Should be an integer".into()),
    }
}
