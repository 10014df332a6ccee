//! Prebuilt registry with the conventional rule names

use tagcheck_core::Registry;

use crate::{email, nonempty, nonnegative, notnull, password, str_limit};

/// `(min, max)` pairs registered as `strlimit-<min>-<max>`
pub const STR_LIMITS: &[(usize, usize)] = &[
    (2, 2),
    (1, 20),
    (1, 128),
    (1, 256),
    (1, 512),
    (1, 1024),
    (0, 20),
    (0, 256),
    (0, 512),
    (0, 1024),
    (0, 2048),
];

/// Registry holding every validator of this crate
pub fn default_registry() -> Registry {
    let mut registry = Registry::builder()
        .rule("nonnegative", nonnegative)
        .rule("nonempty", nonempty)
        .value_rule("notnull", notnull)
        .rule("email", email)
        .rule("password", password)
        .build();

    for &(min, max) in STR_LIMITS {
        registry.insert(format!("strlimit-{}-{}", min, max), str_limit(min, max));
    }

    registry
}
