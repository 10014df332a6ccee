use tagcheck::{Record, Registry};

#[derive(Record)]
struct Unit;

#[derive(Record)]
struct Empty {}

#[derive(Record)]
struct Tuple(#[validate("nonzero")] pub i32, String);

#[derive(Record)]
struct Named {
    #[serde(rename = "renamed", default)]
    #[validate("struct")]
    pub inner: Tuple,

    pub r#type: u8,
}

#[derive(Record)]
struct Generic<T, const N: usize> {
    pub items: [T; N],
}

#[derive(Record)]
struct Holder<T> {
    #[validate("struct")]
    pub inner: Option<T>,
}

fn main() {
    let registry = Registry::new();

    assert!(registry.validate(&Unit).is_empty());
    assert!(registry.validate(&Empty {}).is_empty());

    let named = Named {
        inner: Tuple(1, String::new()),
        r#type: 0,
    };
    let _ = registry.validate(&named);
    let _ = registry.validate(&Generic { items: [1u8, 2, 3] });
    let _ = registry.validate(&Holder { inner: Some(Unit) });
    let _ = named.inner.1.len();
}
