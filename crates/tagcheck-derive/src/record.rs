// File: tagcheck-derive/src/record.rs
// Purpose: Record derive macro and field attribute processing

use proc_macro2::{Ident, TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::{
    parse_quote, Attribute, Data, DeriveInput, Expr, ExprLit, Fields, GenericParam, Lit, LitStr,
    Member, Type, Visibility,
};

/// Rule name that makes the engine descend into a field
const STRUCT_RULE: &str = "struct";

/// What the derive learned about one field
struct FieldSpec {
    member: Member,
    name: String,
    rename: Option<String>,
    rules: String,
    visible: bool,
    ty: Type,
}

impl FieldSpec {
    fn descends(&self) -> bool {
        self.rules.split(',').any(|rule| rule.trim() == STRUCT_RULE)
    }
}

/// Generate the `Record` implementation for a struct
pub fn impl_record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Record can only be derived for structs",
            ))
        }
    };

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Record requires 'static data; lifetime parameters are not supported",
        ));
    }

    let specs = collect_fields(fields)?;
    let descriptors = specs.iter().map(field_descriptor);

    let mut generics = input.generics.clone();
    let type_params: Vec<_> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.clone()),
            _ => None,
        })
        .collect();
    let where_clause = generics.make_where_clause();
    for ident in type_params {
        where_clause.predicates.push(parse_quote!(#ident: 'static));

        // A `struct` field built from a type parameter must resolve to a record
        if specs
            .iter()
            .any(|spec| spec.descends() && mentions(spec.ty.to_token_stream(), &ident))
        {
            where_clause
                .predicates
                .push(parse_quote!(#ident: ::tagcheck::Record));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tagcheck::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::tagcheck::Field<'_>> {
                #[allow(unused_imports)]
                use ::tagcheck::__private::{
                    NoMapValue as _, NoOption as _, NoSelfValidate as _, ViaAny as _,
                    ViaMapValue as _, ViaOption as _, ViaRecord as _, ViaSelfValidate as _,
                };

                ::std::vec![#(#descriptors),*]
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    })
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldSpec>> {
    let mut specs = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(index.into()), index.to_string()),
        };

        specs.push(FieldSpec {
            member,
            name,
            rename: extract_rename(&field.attrs)?,
            rules: extract_rules(&field.attrs)?,
            visible: matches!(field.vis, Visibility::Public(_)),
            ty: field.ty.clone(),
        });
    }

    Ok(specs)
}

/// Parse `#[validate("a,b")]`; several attributes are joined in order
fn extract_rules(attrs: &[Attribute]) -> syn::Result<String> {
    let mut rules = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("validate") {
            continue;
        }
        let lit: LitStr = attr.parse_args()?;
        rules.push(lit.value());
    }

    Ok(rules.join(","))
}

/// Find the serialization name in `#[serde(rename = "...")]` or
/// `#[serde(rename(serialize = "..."))]`
fn extract_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;

    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                // Skip the value of any other serde option
                if meta.input.peek(syn::Token![=]) {
                    meta.value()?.parse::<Expr>()?;
                } else if meta.input.peek(syn::token::Paren) {
                    meta.input.parse::<proc_macro2::TokenTree>()?;
                }
                return Ok(());
            }

            if meta.input.peek(syn::Token![=]) {
                if let Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) = meta.value()?.parse::<Expr>()?
                {
                    rename = Some(s.value());
                }
                return Ok(());
            }

            meta.parse_nested_meta(|nested| {
                let value = nested.value()?.parse::<Expr>()?;
                if nested.path.is_ident("serialize") {
                    if let Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) = value
                    {
                        rename = Some(s.value());
                    }
                }
                Ok(())
            })
        })?;
    }

    Ok(rename)
}

/// Whether `ident` occurs anywhere in `tokens`
fn mentions(tokens: TokenStream, ident: &Ident) -> bool {
    tokens.into_iter().any(|token| match token {
        TokenTree::Ident(found) => found == *ident,
        TokenTree::Group(group) => mentions(group.stream(), ident),
        _ => false,
    })
}

fn field_descriptor(spec: &FieldSpec) -> TokenStream {
    let member = &spec.member;
    let name = &spec.name;
    let rules = &spec.rules;
    let visible = spec.visible;
    let rename = match &spec.rename {
        Some(rename) => quote! { ::std::option::Option::Some(#rename) },
        None => quote! { ::std::option::Option::None },
    };
    let probe = quote! { (&&::tagcheck::__private::Probe(&self.#member)) };

    quote! {
        ::tagcheck::Field {
            name: #name,
            rename: #rename,
            rules: #rules,
            visible: #visible,
            value: #probe.probe_value().with_null(#probe.probe_null()),
            self_validate: #probe.probe_self_validate(),
            map_value: #probe.probe_map_value(),
        }
    }
}
