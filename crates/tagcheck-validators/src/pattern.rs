//! Regular-expression validation

use std::any::Any;

use anyhow::{Context, Result};
use regex::Regex;
use tagcheck_core::ErrorValue;

use crate::string::as_str;

/// Match `value` against `re`, returning `mismatch` on failure.
///
/// Strings and UTF-8 byte vectors are matched directly. A `Vec<String>` yields a
/// positional list with `None` for every element that matched.
pub fn match_pattern(re: &Regex, mismatch: &ErrorValue, value: &dyn Any) -> Result<(), ErrorValue> {
    let matched = if let Some(s) = as_str(value) {
        re.is_match(s)
    } else if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
        re.is_match(&String::from_utf8_lossy(bytes))
    } else if let Some(items) = value.downcast_ref::<Vec<String>>() {
        let results: Vec<Option<ErrorValue>> = items
            .iter()
            .map(|item| (!re.is_match(item)).then(|| mismatch.clone()))
            .collect();

        return if results.iter().all(Option::is_none) {
            Ok(())
        } else {
            Err(results.into())
        };
    } else {
        return Err("Unsupported type".into());
    };

    if matched {
        Ok(())
    } else {
        Err(mismatch.clone())
    }
}

/// Validator requiring a match of `pattern`, with a message naming the pattern
pub fn re_match(
    pattern: &str,
) -> Result<impl Fn(&dyn Any) -> Result<(), ErrorValue> + Send + Sync + Clone + 'static> {
    re_match_with(pattern, format!("Value should match the pattern: {}", pattern))
}

/// Validator requiring a match of `pattern`, failing with `mismatch`
pub fn re_match_with(
    pattern: &str,
    mismatch: impl Into<ErrorValue>,
) -> Result<impl Fn(&dyn Any) -> Result<(), ErrorValue> + Send + Sync + Clone + 'static> {
    let re = Regex::new(pattern).with_context(|| format!("Invalid pattern: {}", pattern))?;
    let mismatch = mismatch.into();

    Ok(move |value: &dyn Any| match_pattern(&re, &mismatch, value))
}
