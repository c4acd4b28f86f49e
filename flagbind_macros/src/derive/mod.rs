//! Expansion of `#[derive(Flags)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;
#[cfg(test)]
mod tests;

use parse::{ParsedInput, parse_input};

/// Expand the derive for `input` into an `impl Flags` block.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ParsedInput {
        ident,
        generics,
        struct_attrs,
        fields,
    } = parse_input(input)?;
    let krate = crate_path::resolve(struct_attrs.crate_path.as_ref());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let bind = generate::bind_body(&krate, &fields);
    let options = generate::set_options(&krate, &struct_attrs);
    let load_config = generate::load_config(&krate, &fields);

    Ok(quote! {
        impl #impl_generics #krate::Flags for #ident #ty_generics #where_clause {
            fn bind<'__flagbind>(
                &'__flagbind mut self,
                set: &mut #krate::FlagSet<'__flagbind>,
            ) -> #krate::FlagResult<()> {
                #bind
            }

            fn set_options() -> #krate::SetOptions {
                #options
            }

            #load_config
        }
    })
}
