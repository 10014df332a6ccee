//! Engine behaviour through #[derive(Record)]
//!
//! Covers rule ordering, first-failure-wins, undefined rules, nested records,
//! private fields, serialization-name keys, self-validation and value projection.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tagcheck::{ErrorMap, ErrorValue, MapValue, Record, Registry, SelfValidate, Value};

fn text(value: &dyn Any) -> &str {
    value.downcast_ref::<String>().map(String::as_str).unwrap_or_default()
}

fn number(value: &dyn Any) -> i32 {
    value.downcast_ref::<i32>().copied().unwrap_or_default()
}

fn long(value: &dyn Any) -> Result<(), ErrorValue> {
    let s = text(value);
    if s.len() < 5 {
        return Err(format!("{:?} is too short", s).into());
    }
    Ok(())
}

fn short(value: &dyn Any) -> Result<(), ErrorValue> {
    let s = text(value);
    if s.len() >= 5 {
        return Err(format!("{:?} is too long", s).into());
    }
    Ok(())
}

fn nonzero(value: &dyn Any) -> Result<(), ErrorValue> {
    if number(value) == 0 {
        return Err("should be nonzero".into());
    }
    Ok(())
}

fn odd(value: &dyn Any) -> Result<(), ErrorValue> {
    let n = number(value);
    if n & 1 == 0 {
        return Err(format!("{} is not odd", n).into());
    }
    Ok(())
}

fn registry() -> Registry {
    Registry::builder()
        .rule("long", long)
        .rule("short", short)
        .rule("nonzero", nonzero)
        .rule("odd", odd)
        .build()
}

fn message<'a>(errors: &'a ErrorMap, key: &str) -> Option<&'a str> {
    errors.get(key).and_then(ErrorValue::as_message)
}

#[derive(Record)]
struct Greeting {
    #[validate("long")]
    pub a: String,
    #[validate("short")]
    pub b: String,
    #[validate("long,short")]
    pub c: String,
    pub d: String,
}

#[test]
fn test_only_failing_fields_are_reported() {
    let errors = registry().validate(&Greeting {
        a: "hello there".into(),
        b: "hi".into(),
        c: "help me".into(),
        d: "I am not validated".into(),
    });

    assert_eq!(errors.len(), 1);
    assert_eq!(message(&errors, "c"), Some(r#""help me" is too long"#));
}

#[derive(Record)]
struct Odd {
    #[validate("odd")]
    pub a: i32,
}

#[test]
fn test_valid_record_has_no_errors() {
    let errors = registry().validate(&Odd { a: 1 });
    assert!(errors.is_empty());
    assert!(errors.into_result().is_ok());
}

#[test]
fn test_record_without_rules_passes() {
    #[derive(Record)]
    struct Plain {
        pub a: i32,
        pub b: String,
    }

    let errors = registry().validate(&Plain {
        a: 0,
        b: String::new(),
    });
    assert!(errors.is_empty());
}

#[test]
fn test_undefined_validator() {
    #[derive(Record)]
    struct X {
        #[validate("oops")]
        pub a: String,
        #[validate("long")]
        pub b: String,
    }

    let errors = registry().validate(&X {
        a: "oh my".into(),
        b: "long enough".into(),
    });

    assert_eq!(errors.len(), 1);
    assert_eq!(message(&errors, "a"), Some(r#"undefined validator: "oops""#));
}

#[derive(Record)]
struct NonzeroOdd {
    #[validate("nonzero,odd")]
    pub a: i32,
}

#[test]
fn test_first_rule_fails() {
    let errors = registry().validate(&NonzeroOdd { a: 0 });
    assert_eq!(errors.len(), 1);
    assert_eq!(message(&errors, "a"), Some("should be nonzero"));
}

#[test]
fn test_first_rule_passes_second_fails() {
    let errors = registry().validate(&NonzeroOdd { a: 2 });
    assert_eq!(errors.len(), 1);
    assert_eq!(message(&errors, "a"), Some("2 is not odd"));
}

#[test]
fn test_rules_after_failure_are_not_invoked() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let registry = Registry::builder()
        .extend(&registry())
        .rule("odd", move |value: &dyn Any| {
            seen.fetch_add(1, Ordering::SeqCst);
            odd(value)
        })
        .build();

    registry.validate(&NonzeroOdd { a: 0 });
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[derive(Record)]
struct Inner {
    #[validate("nonzero")]
    pub a: i32,
}

#[derive(Record)]
struct Outer {
    #[serde(rename = "X")]
    #[validate("struct,odd_inner")]
    pub x: Inner,
}

fn nested_registry() -> Registry {
    Registry::builder()
        .extend(&registry())
        .rule("odd_inner", |value: &dyn Any| match value.downcast_ref::<Inner>() {
            Some(inner) if inner.a & 1 == 0 => Err(format!("{} is not odd", inner.a).into()),
            Some(_) => Ok(()),
            None => Err("expected Inner".into()),
        })
        .build()
}

#[test]
fn test_nested_failure_is_stored_as_map() {
    let errors = nested_registry().validate(&Outer { x: Inner { a: 0 } });

    let expected: ErrorMap = [("X", ErrorMap::from_iter([("a", "should be nonzero")]))]
        .into_iter()
        .collect();
    assert_eq!(errors, expected);
    assert_eq!(errors.to_string(), r#"{"X":{"a":"should be nonzero"}}"#);
}

#[test]
fn test_nested_pass_continues_with_next_rule() {
    let errors = nested_registry().validate(&Outer { x: Inner { a: 2 } });
    assert_eq!(message(&errors, "X"), Some("2 is not odd"));

    assert!(nested_registry().validate(&Outer { x: Inner { a: 3 } }).is_empty());
}

#[test]
fn test_private_fields_are_skipped() {
    #[derive(Record)]
    struct X {
        #[validate("nonzero")]
        a: i32,
        #[validate("oops")]
        pub(crate) b: i32,
    }

    let x = X { a: 0, b: 0 };
    assert!(registry().validate(&x).is_empty());
    assert_eq!(x.a + x.b, 0);
}

#[test]
fn test_non_record_passes() {
    let registry = Registry::builder()
        .rule("wrong", |value: &dyn Any| Err(format!("WRONG: {}", number(value)).into()))
        .build();

    assert!(registry.validate_value(&Value::new(&7i32)).is_empty());
    assert!(registry.validate_value(&Value::new(&"text")).is_empty());
}

#[test]
fn test_record_behind_value_is_validated() {
    let record = NonzeroOdd { a: 0 };
    let errors = registry().validate_value(&Value::record(&record));
    assert_eq!(message(&errors, "a"), Some("should be nonzero"));
}

#[test]
fn test_serialization_name_is_the_key() {
    #[derive(Record)]
    struct X {
        #[serde(rename = "z")]
        #[validate("nonzero")]
        pub a: i32,
    }

    let errors = registry().validate(&X { a: 0 });
    assert_eq!(errors.len(), 1);
    assert_eq!(message(&errors, "z"), Some("should be nonzero"));
}

#[test]
fn test_serialization_name_nested() {
    #[derive(Record)]
    struct Z {
        #[serde(rename = "z")]
        #[validate("nonzero")]
        pub b: i32,
    }

    #[derive(Record)]
    struct X {
        #[serde(rename = "xxx")]
        #[validate("struct")]
        pub a: Z,
    }

    let errors = registry().validate(&X { a: Z { b: 0 } });
    assert_eq!(errors.len(), 1);

    let nested = errors.get("xxx").and_then(ErrorValue::as_fields).unwrap();
    assert_eq!(message(nested, "z"), Some("should be nonzero"));
}

#[test]
fn test_ignore_marker_falls_back_to_field_name() {
    #[derive(Record)]
    struct X {
        #[serde(rename = "-")]
        #[validate("nonzero")]
        pub a: i32,
    }

    let errors = registry().validate(&X { a: 0 });
    assert!(errors.contains_key("a"));
}

#[test]
fn test_fields_are_processed_in_declaration_order() {
    #[derive(Record)]
    struct X {
        #[validate("longer")]
        pub z: String,
        #[validate("longer")]
        pub a: String,
        #[validate("longer")]
        pub b: String,
        pub c: String,
        #[validate("longer")]
        pub d: String,
        pub e: String,
    }

    let max_len = Arc::new(AtomicUsize::new(4));
    let threshold = Arc::clone(&max_len);
    let registry = Registry::builder()
        .rule("longer", move |value: &dyn Any| {
            let s = text(value);
            let max = threshold.load(Ordering::SeqCst);
            if s.len() <= max {
                return Err(format!("{:?} is too short, should be longer than {}", s, max).into());
            }
            threshold.store(s.len(), Ordering::SeqCst);
            Ok(())
        })
        .build();

    let record = |z: &str, a: &str, b: &str, d: &str| X {
        z: z.into(),
        a: a.into(),
        b: b.into(),
        c: "help me".into(),
        d: d.into(),
        e: String::new(),
    };

    max_len.store(4, Ordering::SeqCst);
    let errors = registry.validate(&record("12345", "hello there", "hi, hi, hi!!!", "I am not validated"));
    assert!(errors.is_empty(), "unexpected errors: {}", errors);

    max_len.store(3, Ordering::SeqCst);
    let errors = registry.validate(&record("123", "hello there", "hi, hi, hi!!!", "I am not validated"));
    assert_eq!(errors.len(), 1);
    assert_eq!(message(&errors, "z"), Some(r#""123" is too short, should be longer than 3"#));

    max_len.store(3, Ordering::SeqCst);
    let errors = registry.validate(&record("123", "h", "2", "I"));
    assert_eq!(errors.len(), 4);
    assert_eq!(message(&errors, "z"), Some(r#""123" is too short, should be longer than 3"#));
    assert_eq!(message(&errors, "a"), Some(r#""h" is too short, should be longer than 3"#));
    assert_eq!(message(&errors, "b"), Some(r#""2" is too short, should be longer than 3"#));
    assert_eq!(message(&errors, "d"), Some(r#""I" is too short, should be longer than 3"#));
}

#[derive(Default)]
struct Verdict {
    error: Option<ErrorValue>,
}

impl SelfValidate for Verdict {
    fn validate(&self) -> Result<(), ErrorValue> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Record)]
struct WithVerdict {
    #[validate("oops")]
    pub v: Verdict,
}

#[test]
fn test_self_validation() {
    let registry = Registry::new();

    let ok = WithVerdict { v: Verdict::default() };
    assert!(registry.validate(&ok).is_empty());

    let err1: ErrorMap = [("one", "qwe"), ("two", "asd")].into_iter().collect();
    let x1 = WithVerdict {
        v: Verdict {
            error: Some(err1.clone().into()),
        },
    };
    assert_eq!(registry.validate(&x1).get("v"), Some(&ErrorValue::Fields(err1)));

    let err2: ErrorMap = [("two", "asd")].into_iter().collect();
    let x2 = WithVerdict {
        v: Verdict {
            error: Some(err2.clone().into()),
        },
    };
    assert_eq!(registry.validate(&x2).get("v"), Some(&ErrorValue::Fields(err2)));
}

struct ArrMapper {
    arr: Vec<String>,
}

impl MapValue for ArrMapper {
    fn map_value(&self) -> Value<'_> {
        Value::new(&self.arr)
    }
}

#[test]
fn test_value_projection() {
    #[derive(Record)]
    struct X {
        #[validate("long_each")]
        pub a: ArrMapper,
    }

    let registry = Registry::builder()
        .rule("long_each", |value: &dyn Any| {
            let items = value
                .downcast_ref::<Vec<String>>()
                .ok_or_else(|| ErrorValue::from("expected the projected list"))?;
            let errors: BTreeMap<usize, ErrorValue> = items
                .iter()
                .enumerate()
                .filter(|(_, s)| s.len() < 5)
                .map(|(i, s)| (i, ErrorValue::from(format!("{:?} is too short", s))))
                .collect();
            if errors.is_empty() {
                Ok(())
            } else {
                Err(errors.into())
            }
        })
        .build();

    let mapped = |items: &[&str]| X {
        a: ArrMapper {
            arr: items.iter().map(|s| s.to_string()).collect(),
        },
    };

    assert!(registry.validate(&mapped(&[])).is_empty());
    assert!(registry.validate(&mapped(&["qweas", "12345"])).is_empty());

    let errors = registry.validate(&mapped(&["q", "qweqwe", "asd"]));
    assert_eq!(errors.len(), 1);

    let indexed = errors.get("a").and_then(ErrorValue::as_indexed).unwrap();
    assert_eq!(indexed.len(), 2);
    assert_eq!(indexed[&0], ErrorValue::from(r#""q" is too short"#));
    assert_eq!(indexed[&2], ErrorValue::from(r#""asd" is too short"#));
}

#[test]
fn test_repeated_validation_is_stable() {
    let record = Outer { x: Inner { a: 0 } };
    let registry = nested_registry();
    assert_eq!(registry.validate(&record), registry.validate(&record));
}

#[test]
fn test_boxed_and_optional_nested_records() {
    #[derive(Record)]
    struct X {
        #[validate("struct")]
        pub boxed: Box<Inner>,
        #[validate("struct")]
        pub maybe: Option<Inner>,
    }

    let errors = registry().validate(&X {
        boxed: Box::new(Inner { a: 0 }),
        maybe: None,
    });
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key("boxed"));

    let errors = registry().validate(&X {
        boxed: Box::new(Inner { a: 1 }),
        maybe: Some(Inner { a: 0 }),
    });
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key("maybe"));
}

#[test]
fn test_struct_rule_on_plain_value_passes() {
    #[derive(Record)]
    struct X {
        #[validate("struct,nonzero")]
        pub a: i32,
    }

    assert!(registry().validate(&X { a: 1 }).is_empty());
    assert_eq!(message(&registry().validate(&X { a: 0 }), "a"), Some("should be nonzero"));
}

#[test]
fn test_tuple_and_generic_records() {
    #[derive(Record)]
    struct Pair(#[validate("nonzero")] pub i32, #[validate("nonzero")] i32);

    #[derive(Record)]
    struct Wrapper<T> {
        #[validate("struct")]
        pub inner: T,
    }

    let errors = registry().validate(&Pair(0, 0));
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["0"]);

    let errors = registry().validate(&Wrapper { inner: Inner { a: 0 } });
    assert_eq!(errors.to_string(), r#"{"inner":{"a":"should be nonzero"}}"#);
    assert!(registry().validate(&Wrapper { inner: Inner { a: 1 } }).is_empty());
}

#[test]
fn test_struct_then_rule_through_indirection() {
    fn some(value: &dyn Any) -> Result<(), ErrorValue> {
        match value.downcast_ref::<Option<Inner>>() {
            Some(None) => Err("missing".into()),
            _ => Ok(()),
        }
    }

    #[derive(Record)]
    struct X<T> {
        #[validate("struct,odd_inner")]
        pub boxed: Box<Inner>,
        #[validate("struct,some")]
        pub maybe: Option<Inner>,
        #[validate("struct,odd_inner")]
        pub generic: T,
    }

    let registry = Registry::builder()
        .extend(&nested_registry())
        .rule("some", some)
        .build();

    // Nested failures stop each field before the trailing rule runs
    let errors = registry.validate(&X {
        boxed: Box::new(Inner { a: 0 }),
        maybe: Some(Inner { a: 0 }),
        generic: Inner { a: 0 },
    });
    assert_eq!(
        errors.to_string(),
        r#"{"boxed":{"a":"should be nonzero"},"generic":{"a":"should be nonzero"},"maybe":{"a":"should be nonzero"}}"#
    );

    // Passing nested records continue to the trailing rule
    let errors = registry.validate(&X {
        boxed: Box::new(Inner { a: 2 }),
        maybe: None,
        generic: Inner { a: 4 },
    });
    assert_eq!(message(&errors, "boxed"), Some("2 is not odd"));
    assert_eq!(message(&errors, "maybe"), Some("missing"));
    assert_eq!(message(&errors, "generic"), Some("4 is not odd"));

    let errors = registry.validate(&X {
        boxed: Box::new(Inner { a: 3 }),
        maybe: Some(Inner { a: 5 }),
        generic: Inner { a: 7 },
    });
    assert!(errors.is_empty());
}
