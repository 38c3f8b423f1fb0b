//! The `implementors!` payload literal.
//!
//! Input grammar:
//!
//! ```text
//! implementors! {
//!     "group_key" => ["markup", "markup", ...],
//!     ...
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{
    LitStr, Token, bracketed,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

pub(crate) struct Group {
    key: LitStr,
    implementors: Vec<LitStr>,
}

impl Parse for Group {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: LitStr = input.parse()?;
        input.parse::<Token![=>]>()?;
        let content;
        bracketed!(content in input);
        let implementors = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?
            .into_iter()
            .collect();
        Ok(Group { key, implementors })
    }
}

pub(crate) struct Implementors {
    groups: Vec<Group>,
}

impl Parse for Implementors {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let groups = Punctuated::<Group, Token![,]>::parse_terminated(input)?
            .into_iter()
            .collect::<Vec<_>>();

        let mut seen = HashSet::new();
        for group in &groups {
            let key = group.key.value();
            if !seen.insert(key.clone()) {
                return Err(syn::Error::new(
                    group.key.span(),
                    format!("duplicate group key `{}` in one fragment", key),
                ));
            }
        }

        Ok(Implementors { groups })
    }
}

/// Expands to an expression evaluating to a `::muster::FragmentPayload`.
///
/// Keys were checked for uniqueness while parsing, so the expansion goes
/// through the infallible constructor.
pub(crate) fn expand(input: Implementors) -> TokenStream {
    let groups = input.groups.iter().map(|group| {
        let key = &group.key;
        let items = group.implementors.iter();
        quote! {
            (
                ::muster::GroupKey::from_static(#key),
                ::std::vec![#(::muster::Implementor::from_static(#items)),*],
            )
        }
    });

    quote! {
        ::muster::FragmentPayload::from_distinct_groups([#(#groups),*])
    }
}
