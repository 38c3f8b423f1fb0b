use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

mod implementors;

/// Derive macro for implementing `Message` trait.
#[proc_macro_derive(Message)]
pub fn derive_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::muster::Message for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

/// Builds a `FragmentPayload` from literal data.
///
/// Each entry maps a group key to its implementors, in display order. A key
/// may appear only once; a repeated key is a compile error.
///
/// # Example
///
/// ```rust,ignore
/// let payload = muster::implementors! {
///     "polars_core" => [
///         "impl Deref for Series",
///         "impl Deref for GroupPositions",
///     ],
///     "polars_utils" => ["impl<T> Deref for UnitVec<T>"],
/// };
/// ```
#[proc_macro]
pub fn implementors(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as implementors::Implementors);
    TokenStream::from(implementors::expand(input))
}
