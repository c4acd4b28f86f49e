//! Expansion tests for `#[derive(Flags)]`.

use super::*;
use rstest::rstest;
use syn::parse_quote;

fn expanded(input: &DeriveInput) -> String {
    expand(input).expect("derive expands").to_string()
}

#[rstest]
fn binds_fields_in_declaration_order() {
    let input: DeriveInput = parse_quote! {
        struct Config {
            /// server host
            #[flag(name = "host h", env = "SERVER_HOST")]
            host: String,
            port: u16,
        }
    };
    let expected = quote! {
        impl ::flagbind::Flags for Config {
            fn bind<'__flagbind>(
                &'__flagbind mut self,
                set: &mut ::flagbind::FlagSet<'__flagbind>,
            ) -> ::flagbind::FlagResult<()> {
                let Self { host, port, } = self;
                set.bind_field(host, ::flagbind::FieldTags::new("host")
                    .flag("host h")
                    .usage("server host")
                    .env("SERVER_HOST"))?;
                set.bind_field(port, ::flagbind::FieldTags::new("port"))?;
                ::core::result::Result::Ok(())
            }

            fn set_options() -> ::flagbind::SetOptions {
                ::flagbind::SetOptions::new()
            }
        }
    };
    assert_eq!(expanded(&input), expected.to_string());
}

#[rstest]
fn skipped_fields_are_left_out() {
    let input: DeriveInput = parse_quote! {
        struct Config {
            port: u16,
            #[flag(skip)]
            cache: Vec<u8>,
        }
    };
    let text = expanded(&input);
    assert!(text.contains("let Self { port , .. } = self ;"), "{text}");
    assert!(!text.contains("\"cache\""), "{text}");
}

#[rstest]
fn dash_named_fields_are_left_out() {
    let input: DeriveInput = parse_quote! {
        struct Config {
            port: u16,
            #[flag(name = "-")]
            extra: HashMap<String, String>,
        }
    };
    let text = expanded(&input);
    assert!(text.contains("let Self { port , .. } = self ;"), "{text}");
    assert!(!text.contains("\"extra\""), "{text}");
}

#[rstest]
fn struct_without_bound_fields_still_implements_bind() {
    let input: DeriveInput = parse_quote! {
        struct Empty {
            #[flag(skip)]
            cache: Vec<u8>,
        }
    };
    assert!(expanded(&input).contains("let _ = (self , set) ;"));
}

#[rstest]
#[case::suffix(parse_quote! { struct C { #[flag(name = "config c,file")] config: String } })]
#[case::key(parse_quote! { struct C { #[flag(file)] config: String } })]
fn config_file_field_emits_loader(#[case] input: DeriveInput) {
    let text = expanded(&input);
    assert!(text.contains("fn load_config"), "{text}");
    assert!(text.contains(":: flagbind :: load_config_file (source , self)"), "{text}");
}

#[rstest]
fn plain_struct_keeps_default_loader() {
    let input: DeriveInput = parse_quote! { struct C { port: u16 } };
    assert!(!expanded(&input).contains("load_config"));
}

#[rstest]
fn struct_options_become_builder_calls() {
    let input: DeriveInput = parse_quote! {
        /// demo server
        #[flags(name = "demo", version, env_prefix = "app", auto_env = false,
                crate = "deps::flagbind")]
        struct C { port: u16 }
    };
    let text = expanded(&input);
    for piece in [
        "impl deps :: flagbind :: Flags for C",
        ". name (\"demo\")",
        ". version (:: core :: env ! (\"CARGO_PKG_VERSION\"))",
        ". description (\"demo server\")",
        ". env_prefix (\"app\")",
        ". auto_env (false)",
    ] {
        assert!(text.contains(piece), "missing {piece} in {text}");
    }
}

#[rstest]
fn generics_are_forwarded() {
    let input: DeriveInput = parse_quote! {
        struct C<T: Clone> where T: Default { value: T }
    };
    assert!(expanded(&input).contains("impl < T : Clone > :: flagbind :: Flags for C < T > where T : Default"));
}

#[rstest]
#[case::tuple(parse_quote! { struct C(u16); }, "Flags requires named fields")]
#[case::unit(parse_quote! { struct C; }, "Flags requires named fields")]
#[case::enumeration(parse_quote! { enum C { A } }, "Flags can only be derived for structs")]
fn rejects_unsupported_shapes(#[case] input: DeriveInput, #[case] message: &str) {
    let err = expand(&input).err().expect("expansion fails");
    assert_eq!(err.to_string(), message);
}
