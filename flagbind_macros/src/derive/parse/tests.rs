//! Unit tests for `#[flag]` and `#[flags]` attribute parsing.

use super::*;
use rstest::rstest;
use syn::parse_quote;

fn field(tokens: syn::Field) -> FieldAttrs {
    parse_field_attrs(&tokens).expect("field attributes parse")
}

#[rstest]
fn parses_every_field_key() {
    let attrs = field(parse_quote! {
        #[flag(name = "host h", short = 'H', usage = "server host", alias = "addr",
               env = "HOST", hidden, deprecated = "use --addr", file = false)]
        host: String
    });
    assert_eq!(attrs.name.as_deref(), Some("host h"));
    assert_eq!(attrs.short, Some('H'));
    assert_eq!(attrs.usage.as_deref(), Some("server host"));
    assert_eq!(attrs.alias.as_deref(), Some("addr"));
    assert_eq!(attrs.env.as_deref(), Some("HOST"));
    assert!(attrs.hidden);
    assert_eq!(attrs.deprecated.as_deref(), Some("use --addr"));
    assert!(!attrs.file);
    assert!(!attrs.skip);
}

#[rstest]
fn bare_deprecated_uses_generic_reason() {
    let attrs = field(parse_quote! { #[flag(deprecated)] old: bool });
    assert_eq!(attrs.deprecated.as_deref(), Some("deprecated"));
}

#[rstest]
fn doc_comment_is_usage_fallback() {
    let attrs = field(parse_quote! {
        /// listen port
        ///
        /// for incoming connections
        port: u16
    });
    assert_eq!(attrs.usage_text(), Some("listen port for incoming connections"));

    let explicit = field(parse_quote! {
        /// ignored
        #[flag(usage = "explicit")]
        port: u16
    });
    assert_eq!(explicit.usage_text(), Some("explicit"));
}

#[rstest]
#[case::suffix(parse_quote! { #[flag(name = "config c,file")] config: String }, true)]
#[case::key(parse_quote! { #[flag(file)] config: String }, true)]
#[case::plain(parse_quote! { #[flag(name = "config c")] config: String }, false)]
fn detects_config_file_fields(#[case] tokens: syn::Field, #[case] expected: bool) {
    assert_eq!(field(tokens).is_config_file(), expected);
}

#[rstest]
fn unknown_keys_are_ignored() {
    let attrs = field(parse_quote! {
        #[flag(future = "x", other(a, b), skip)]
        internal: u8
    });
    assert!(attrs.skip);
}

#[rstest]
#[case::skip(parse_quote! { #[flag(skip)] extra: Table })]
#[case::dash(parse_quote! { #[flag(name = "-")] extra: Table })]
#[case::padded_dash(parse_quote! { #[flag(name = " - ")] extra: Table })]
fn skip_markers_unbind_the_field(#[case] tokens: syn::Field) {
    assert!(field(tokens).skip);
}

#[rstest]
fn wrong_literal_type_is_rejected() {
    let tokens: syn::Field = parse_quote! { #[flag(short = "p")] port: u16 };
    let err = parse_field_attrs(&tokens).err().expect("short must be a char");
    assert_eq!(err.to_string(), "short must be a char");
}

#[rstest]
fn parses_struct_keys() {
    let attrs: Vec<Attribute> = parse_quote! {
        /// demo server
        #[flags(name = "demo", version, about = "about text", prefix = "app-",
                env_prefix = "app", auto_env = false, build_time = "2024-01-02T03:04:05Z",
                crate = "deps::flagbind")]
    };
    let parsed = parse_struct_attrs(&attrs).expect("struct attributes parse");
    assert_eq!(parsed.name.as_deref(), Some("demo"));
    assert_eq!(parsed.version, Some(Text::Package));
    assert_eq!(parsed.about, Some(Text::Literal("about text".to_owned())));
    assert_eq!(parsed.doc.as_deref(), Some("demo server"));
    assert_eq!(parsed.prefix.as_deref(), Some("app-"));
    assert_eq!(parsed.env_prefix.as_deref(), Some("app"));
    assert_eq!(parsed.auto_env, Some(false));
    assert_eq!(parsed.build_time.as_deref(), Some("2024-01-02T03:04:05Z"));
    assert!(parsed.crate_path.is_some());
}
