//! Parsing utilities for the `Flags` derive macro.

use syn::parenthesized;
use syn::{Attribute, Expr, Lit, LitStr, Token};

mod input;
mod literals;
#[cfg(test)]
mod tests;

pub(crate) use input::{ParsedInput, parse_input};
use literals::{lit_bool, lit_char, lit_str};

/// Suffix on a `name` value marking a config-file path field.
const FILE_SUFFIX: &str = ",file";

/// Text that is either written out or taken from the package manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Text {
    Literal(String),
    /// Read from a `CARGO_PKG_*` variable at compile time.
    Package,
}

/// Struct-level attributes recognised by `#[derive(Flags)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub name: Option<String>,
    pub version: Option<Text>,
    pub about: Option<Text>,
    /// RFC 3339 build timestamp.
    pub build_time: Option<String>,
    pub prefix: Option<String>,
    pub env_prefix: Option<String>,
    pub auto_env: Option<bool>,
    /// Doc comment on the struct; used as the description when `about` is
    /// absent.
    pub doc: Option<String>,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Flags)]`.
///
/// - `name` is the flag specification: long name, optional one-character
///   shorthand and an optional `,file` suffix.
/// - `short` sets the shorthand explicitly.
/// - `usage` falls back to the field's doc comment.
/// - `skip`, or a `name` of `-`, leaves the field unbound.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub name: Option<String>,
    pub short: Option<char>,
    pub usage: Option<String>,
    pub alias: Option<String>,
    pub env: Option<String>,
    pub hidden: bool,
    pub deprecated: Option<String>,
    pub file: bool,
    pub skip: bool,
    pub doc: Option<String>,
}

impl FieldAttrs {
    /// Whether the field names a configuration file.
    pub(crate) fn is_config_file(&self) -> bool {
        self.file
            || self
                .name
                .as_deref()
                .is_some_and(|name| name.trim_end().ends_with(FILE_SUFFIX))
    }

    /// Usage text from the attribute, else from the doc comment.
    pub(crate) fn usage_text(&self) -> Option<&str> {
        self.usage.as_deref().or(self.doc.as_deref())
    }
}

/// Iterate all attributes named `name` once and apply a callback.
fn parse_attr<F>(attrs: &[Attribute], name: &str, mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident(name)) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Reads `key` or `key = true|false`.
fn flag_or_bool(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        lit_bool(meta, key)
    } else {
        Ok(true)
    }
}

/// Reads `key` or `key = "text"`.
fn text_or_package(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<Text> {
    if meta.input.peek(Token![=]) {
        Ok(Text::Literal(lit_str(meta, key)?.value()))
    } else {
        Ok(Text::Package)
    }
}

/// Joins `///` lines into one line of text.
///
/// Returns `None` when the item carries no doc comment.
pub(crate) fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value().trim().to_owned()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

/// Extracts `#[flags(...)]` metadata applied to a struct.
///
/// Unknown keys are ignored so callers keep compiling when new attributes
/// appear.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs {
        doc: doc_text(attrs),
        ..StructAttrs::default()
    };
    parse_attr(attrs, "flags", |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => out.name = Some(lit_str(meta, "name")?.value()),
            Some("version") => out.version = Some(text_or_package(meta, "version")?),
            Some("about") => out.about = Some(text_or_package(meta, "about")?),
            Some("build_time") => out.build_time = Some(lit_str(meta, "build_time")?.value()),
            Some("prefix") => out.prefix = Some(lit_str(meta, "prefix")?.value()),
            Some("env_prefix") => out.env_prefix = Some(lit_str(meta, "env_prefix")?.value()),
            Some("auto_env") => out.auto_env = Some(flag_or_bool(meta, "auto_env")?),
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
            }
            _ => discard_unknown(meta)?,
        }
        Ok(())
    })?;
    Ok(out)
}

/// Applies a recognised field attribute, returning `true` if handled.
fn apply_field_attr(meta: &syn::meta::ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<bool> {
    let Some(ident) = meta.path.get_ident() else {
        return Ok(false);
    };
    match ident.to_string().as_str() {
        "name" => {
            let name = lit_str(meta, "name")?.value();
            if name.trim() == "-" {
                out.skip = true;
            }
            out.name = Some(name);
        }
        "short" => out.short = Some(lit_char(meta, "short")?),
        "usage" => out.usage = Some(lit_str(meta, "usage")?.value()),
        "alias" => out.alias = Some(lit_str(meta, "alias")?.value()),
        "env" => out.env = Some(lit_str(meta, "env")?.value()),
        "hidden" => out.hidden = flag_or_bool(meta, "hidden")?,
        "file" => out.file = flag_or_bool(meta, "file")?,
        "skip" => out.skip = flag_or_bool(meta, "skip")?,
        "deprecated" => {
            let reason: Option<LitStr> = if meta.input.peek(Token![=]) {
                Some(lit_str(meta, "deprecated")?)
            } else {
                None
            };
            out.deprecated = Some(reason.map_or_else(|| "deprecated".to_owned(), |s| s.value()));
        }
        _ => return Ok(false),
    }
    Ok(true)
}

/// Parses field-level `#[flag(...)]` attributes.
///
/// Unknown keys are ignored, matching [`parse_struct_attrs`].
pub(crate) fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs {
        doc: doc_text(&field.attrs),
        ..FieldAttrs::default()
    };
    parse_attr(&field.attrs, "flag", |meta| {
        if !apply_field_attr(meta, &mut out)? {
            discard_unknown(meta)?;
        }
        Ok(())
    })?;
    Ok(out)
}
