//! Environment fallback against the real process environment.

use flagbind::{FlagError, Flags, is_display_request, parse_struct};
use rstest::{fixture, rstest};
use serial_test::serial;
use test_helpers::env;

#[derive(Debug, Default, Flags)]
#[flags(env_prefix = "flagbind_it")]
struct Settings {
    port: u16,
    #[flag(env = "FLAGBIND_IT_ALT_HOST FLAGBIND_IT_HOST")]
    host: String,
    tags: Vec<String>,
    #[flag(env = "-")]
    secret: String,
    /// Hidden from help
    #[flag(hidden)]
    trace: bool,
}

#[fixture]
fn settings() -> Settings {
    Settings {
        port: 80,
        ..Settings::default()
    }
}

#[rstest]
#[serial]
fn process_environment_supplies_unset_flags(mut settings: Settings) {
    let _lock = env::lock();
    let _port = env::set_var("FLAGBIND_IT_PORT", "9100");
    let _alt = env::set_var("FLAGBIND_IT_ALT_HOST", "");
    let _host = env::set_var("FLAGBIND_IT_HOST", "second.example");
    let _tags = env::set_var("FLAGBIND_IT_TAGS", "a, b");
    let _secret = env::set_var("FLAGBIND_IT_SECRET", "leaked");
    let _trace = env::set_var("FLAGBIND_IT_TRACE", "true");

    parse_struct(&mut settings, ["app"]).expect("parse");

    assert_eq!(settings.port, 9100);
    assert_eq!(settings.host, "second.example");
    assert_eq!(settings.tags, ["a", "b"]);
    assert_eq!(settings.secret, "");
    assert!(settings.trace);
}

#[rstest]
#[serial]
fn command_line_sequence_ignores_environment(mut settings: Settings) {
    let _lock = env::lock();
    let _tags = env::set_var("FLAGBIND_IT_TAGS", "from-env");

    parse_struct(&mut settings, ["app", "--tags", "x", "--tags", "y"]).expect("parse");

    assert_eq!(settings.tags, ["x", "y"]);
}

#[rstest]
#[serial]
fn malformed_environment_value_names_the_flag(mut settings: Settings) {
    let _lock = env::lock();
    let _port = env::set_var("FLAGBIND_IT_PORT", "eighty");

    let err = parse_struct(&mut settings, ["app"]).expect_err("invalid port");

    assert_eq!(err.flag(), Some("port"));
    assert_eq!(settings.port, 80);
}

#[rstest]
fn help_request_is_a_display_request(mut settings: Settings) {
    let err = parse_struct(&mut settings, ["app", "--help"]).expect_err("help");
    let FlagError::CliParsing(clap_err) = &err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert!(is_display_request(clap_err));
    let rendered = clap_err.to_string();
    assert!(rendered.contains("--port"), "{rendered}");
    assert!(!rendered.contains("--trace"), "{rendered}");
}
