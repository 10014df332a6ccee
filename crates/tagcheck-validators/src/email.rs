//! Email address validation

use std::any::Any;

use once_cell::sync::Lazy;
use regex::Regex;
use tagcheck_core::ErrorValue;

use crate::pattern::match_pattern;

const ID_PATTERN: &str = "([0-9a-zA-Z][-0-9a-zA-Z.+_']*)?[0-9a-zA-Z_]";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    let domain = format!(r"{}\.[a-zA-Z]{{2,10}}", ID_PATTERN);
    Regex::new(&format!("^{}@{}$", ID_PATTERN, domain)).unwrap()
});

static EMAIL_ERROR: Lazy<ErrorValue> = Lazy::new(|| ErrorValue::from("invalid email"));

/// Validates an email address (or each address of a `Vec<String>`)
pub fn email(value: &dyn Any) -> Result<(), ErrorValue> {
    match_pattern(&EMAIL_REGEX, &EMAIL_ERROR, value)
}
