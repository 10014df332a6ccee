// tagcheck procedural macros

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod record;

/// Derive macro describing a struct's fields to the validation engine
///
/// Generates a `tagcheck::Record` implementation. Each field contributes a descriptor
/// holding its declared name, its serialization name, its rule annotation, whether it
/// is `pub`, and a view of its value.
///
/// # Example
///
/// ```ignore
/// use tagcheck::Record;
///
/// #[derive(Record)]
/// struct Signup {
///     #[validate("nonempty,email")]
///     pub email: String,
///
///     #[serde(rename = "pwd")]
///     #[validate("password")]
///     pub password: String,
///
///     #[validate("struct")]
///     pub address: Address,
///
///     // Not `pub`: never validated
///     #[validate("nonempty")]
///     note: String,
/// }
/// ```
///
/// # Attributes
///
/// - `#[validate("rule1,rule2")]` - comma-separated rule names, applied in order
/// - `#[serde(rename = "key")]` - key used for this field in the error map
///
/// Field types implementing `SelfValidate`, `MapValue` or `Record` are detected
/// automatically. Fields whose type is a generic parameter are treated as plain values.
#[proc_macro_derive(Record, attributes(validate, serde))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::impl_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
