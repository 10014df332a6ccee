//! String validation functions

use std::any::Any;
use std::collections::BTreeMap;

use tagcheck_core::ErrorValue;

/// Borrow a `String` or `&'static str` field as `&str`
pub fn as_str(value: &dyn Any) -> Option<&str> {
    value
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| value.downcast_ref::<&'static str>().copied())
}

/// Rejects empty strings and anything that is not a string
pub fn nonempty(value: &dyn Any) -> Result<(), ErrorValue> {
    match as_str(value) {
        Some("") => Err(ErrorValue::from("Should be nonempty")),
        Some(_) => Ok(()),
        None => Err(ErrorValue::from("Should be a string")),
    }
}

/// Number of characters in `bytes`, counting each byte of an invalid UTF-8 sequence
/// as one character
pub fn char_count(bytes: &[u8]) -> usize {
    bytes
        .utf8_chunks()
        .map(|chunk| chunk.valid().chars().count() + chunk.invalid().len())
        .sum()
}

/// Character-count limits, inclusive on both ends.
///
/// Accepts strings and byte vectors (measured with [`char_count`]). A `Vec<String>` is checked element by
/// element and failures are reported by index.
pub fn str_limit(
    min: usize,
    max: usize,
) -> impl Fn(&dyn Any) -> Result<(), ErrorValue> + Send + Sync + Clone + 'static {
    let min_err = format!("Minimum length is {}", min);
    let max_err = format!("Maximum length is {}", max);

    move |value: &dyn Any| {
        let check = |len: usize| -> Result<(), ErrorValue> {
            if len < min {
                Err(min_err.clone().into())
            } else if len > max {
                Err(max_err.clone().into())
            } else {
                Ok(())
            }
        };

        if let Some(s) = as_str(value) {
            return check(s.chars().count());
        }

        if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
            return check(char_count(bytes));
        }

        if let Some(items) = value.downcast_ref::<Vec<String>>() {
            let errors: BTreeMap<usize, ErrorValue> = items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| check(item.chars().count()).err().map(|e| (i, e)))
                .collect();

            return if errors.is_empty() {
                Ok(())
            } else {
                Err(errors.into())
            };
        }

        Err(ErrorValue::from("Should be a string or byte array"))
    }
}
