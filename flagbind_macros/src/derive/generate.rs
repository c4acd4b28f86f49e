//! Token generation for the `Flags` derive macro.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldAttrs, StructAttrs, Text};

/// Builds the `FieldTags` expression describing one field.
pub(crate) fn field_tags(krate: &TokenStream, ident: &syn::Ident, attrs: &FieldAttrs) -> TokenStream {
    let field_name = ident.to_string();
    let mut calls = Vec::new();
    if let Some(spec) = &attrs.name {
        calls.push(quote! { .flag(#spec) });
    }
    if let Some(short) = attrs.short {
        calls.push(quote! { .short(#short) });
    }
    if let Some(usage) = attrs.usage_text() {
        calls.push(quote! { .usage(#usage) });
    }
    if let Some(alias) = &attrs.alias {
        calls.push(quote! { .alias(#alias) });
    }
    if let Some(env) = &attrs.env {
        calls.push(quote! { .env(#env) });
    }
    if attrs.hidden {
        calls.push(quote! { .hidden(true) });
    }
    if let Some(reason) = &attrs.deprecated {
        calls.push(quote! { .deprecated(#reason) });
    }
    if attrs.file {
        calls.push(quote! { .file(true) });
    }
    quote! { #krate::FieldTags::new(#field_name) #(#calls)* }
}

/// Body of `Flags::bind`: destructure `self` and register each bound field.
pub(crate) fn bind_body(krate: &TokenStream, fields: &[(syn::Ident, FieldAttrs)]) -> TokenStream {
    let bound: Vec<_> = fields.iter().filter(|(_, attrs)| !attrs.skip).collect();
    if bound.is_empty() {
        return quote! {
            let _ = (self, set);
            ::core::result::Result::Ok(())
        };
    }
    let idents: Vec<_> = bound.iter().map(|(ident, _)| ident).collect();
    let tags = bound
        .iter()
        .map(|(ident, attrs)| field_tags(krate, ident, attrs));
    let rest = (bound.len() < fields.len()).then(|| quote! { .. });
    quote! {
        let Self { #(#idents,)* #rest } = self;
        #( set.bind_field(#idents, #tags)?; )*
        ::core::result::Result::Ok(())
    }
}

/// Builder chain returned from `Flags::set_options`.
pub(crate) fn set_options(krate: &TokenStream, attrs: &StructAttrs) -> TokenStream {
    let mut calls = Vec::new();
    if let Some(name) = &attrs.name {
        calls.push(quote! { .name(#name) });
    }
    match &attrs.version {
        Some(Text::Literal(version)) => calls.push(quote! { .version(#version) }),
        Some(Text::Package) => calls.push(quote! { .version(::core::env!("CARGO_PKG_VERSION")) }),
        None => {}
    }
    match (&attrs.about, &attrs.doc) {
        (Some(Text::Literal(about)), _) => calls.push(quote! { .description(#about) }),
        (Some(Text::Package), _) => {
            calls.push(quote! { .description(::core::env!("CARGO_PKG_DESCRIPTION")) });
        }
        (None, Some(doc)) => calls.push(quote! { .description(#doc) }),
        (None, None) => {}
    }
    if let Some(build_time) = &attrs.build_time {
        calls.push(quote! { .build_time_rfc3339(#build_time) });
    }
    if let Some(prefix) = &attrs.prefix {
        calls.push(quote! { .prefix(#prefix) });
    }
    if let Some(env_prefix) = &attrs.env_prefix {
        calls.push(quote! { .env_prefix(#env_prefix) });
    }
    if let Some(auto_env) = attrs.auto_env {
        calls.push(quote! { .auto_env(#auto_env) });
    }
    quote! { #krate::SetOptions::new() #(#calls)* }
}

/// `Flags::load_config` override, emitted only for types with a
/// config-file field.
pub(crate) fn load_config(krate: &TokenStream, fields: &[(syn::Ident, FieldAttrs)]) -> TokenStream {
    let has_file = fields
        .iter()
        .any(|(_, attrs)| !attrs.skip && attrs.is_config_file());
    if !has_file {
        return TokenStream::new();
    }
    quote! {
        fn load_config(&mut self, source: &str) -> #krate::FlagResult<bool> {
            #krate::load_config_file(source, self)
        }
    }
}
