//! Procedural macros for `flagbind`.
//!
//! `#[derive(Flags)]` turns every named field of a struct into a flag
//! binding. Field names become `kebab-case` flag names unless a
//! `#[flag(name = "...")]` attribute says otherwise, and doc comments serve
//! as usage text when no `usage` key is given.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `flagbind::Flags`.
///
/// Field keys inside `#[flag(...)]`: `name`, `short`, `usage`, `alias`,
/// `env`, `hidden`, `deprecated`, `file` and `skip`. Struct keys inside
/// `#[flags(...)]`: `name`, `version`, `about`, `build_time`, `prefix`,
/// `env_prefix`, `auto_env` and `crate`.
#[proc_macro_derive(Flags, attributes(flag, flags))]
pub fn derive_flags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
