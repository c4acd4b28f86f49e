//! End-to-end tests for `#[derive(Flags)]` bindings.

use std::collections::HashMap;
use std::time::Duration;

use flagbind::{Deprecation, FieldBinding, FlagError, FlagResult, FlagSet, Flags, Parsed, ValueSource};
use rstest::{fixture, rstest};
use test_helpers::text::collapse_spaces;

#[derive(Debug, Flags)]
#[flags(name = "server", version = "1.2.3", about = "demo server", env_prefix = "app")]
struct Server {
    /// server host **DEPRECATED** use --addr instead
    #[flag(name = "host h", alias = "address")]
    host: String,
    #[flag(name = "port p", usage = "listen port", env = "LISTEN_PORT")]
    port: u16,
    /// connection limit
    max_connections: u32,
    /// API token
    #[flag(env = "-")]
    token: String,
    /// chatty output
    verbose: bool,
    numbers: Vec<i64>,
    wait: Duration,
    #[flag(name = "-")]
    internal: HashMap<String, String>,
    #[flag(skip)]
    cache: Vec<u8>,
}

#[fixture]
fn server() -> Server {
    Server {
        host: "localhost".to_owned(),
        port: 8080,
        max_connections: 100,
        token: String::new(),
        verbose: false,
        numbers: Vec::new(),
        wait: Duration::from_secs(5),
        internal: HashMap::from([("owner".to_owned(), "ops".to_owned())]),
        cache: Vec::new(),
    }
}

fn parse_with(server: &mut Server, vars: &[(&str, &str)], args: &[&str]) -> FlagResult<Parsed> {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    let mut set = FlagSet::new(Server::set_options()).with_env_lookup(|key| env.get(key).cloned());
    set.bind(server)?;
    set.parse_from(args.iter().copied())
}

#[rstest]
fn command_line_fills_every_kind(mut server: Server) {
    parse_with(
        &mut server,
        &[],
        &[
            "server",
            "-h",
            "example.org",
            "-p",
            "9000",
            "--max-connections",
            "3",
            "--verbose",
            "--numbers",
            "1",
            "--numbers",
            "2",
            "--wait",
            "1m30s",
        ],
    )
    .expect("parse");
    assert_eq!(server.host, "example.org");
    assert_eq!(server.port, 9000);
    assert_eq!(server.max_connections, 3);
    assert!(server.verbose);
    assert_eq!(server.numbers, vec![1, 2]);
    assert_eq!(server.wait, Duration::from_secs(90));
}

#[rstest]
fn alias_sets_the_same_field(mut server: Server) {
    parse_with(&mut server, &[], &["server", "--address", "alias.example"]).expect("parse");
    assert_eq!(server.host, "alias.example");
}

#[rstest]
fn command_line_overrides_environment(mut server: Server) {
    parse_with(&mut server, &[("LISTEN_PORT", "9000")], &["server", "--port", "8080"])
        .expect("parse");
    assert_eq!(server.port, 8080);
}

#[rstest]
fn explicit_env_key_replaces_derived_key(mut server: Server) {
    parse_with(&mut server, &[("APP_PORT", "1"), ("LISTEN_PORT", "7000")], &["server"])
        .expect("parse");
    assert_eq!(server.port, 7000);
}

#[rstest]
fn derived_env_key_carries_prefix(mut server: Server) {
    parse_with(&mut server, &[("APP_HOST", "env.example")], &["server"]).expect("parse");
    assert_eq!(server.host, "env.example");
}

#[rstest]
#[case::fuzzy(&[("MAXCONN", "5")], 100)]
#[case::unprefixed(&[("MAX_CONNECTIONS", "5")], 100)]
#[case::exact(&[("APP_MAX_CONNECTIONS", "7")], 7)]
fn derived_env_key_matches_exactly(
    mut server: Server,
    #[case] env: &[(&str, &str)],
    #[case] expected: u32,
) {
    parse_with(&mut server, env, &["server"]).expect("parse");
    assert_eq!(server.max_connections, expected);
}

#[rstest]
fn disabled_env_is_never_read(mut server: Server) {
    parse_with(
        &mut server,
        &[("TOKEN", "leaked"), ("APP_TOKEN", "leaked")],
        &["server"],
    )
    .expect("parse");
    assert_eq!(server.token, "");
}

#[rstest]
fn sequence_env_value_is_split(mut server: Server) {
    parse_with(&mut server, &[("APP_NUMBERS", "[4, 5]")], &["server"]).expect("parse");
    assert_eq!(server.numbers, vec![4, 5]);
}

#[rstest]
#[case::presence(&["server", "--verbose"], true)]
#[case::explicit_false(&["server", "--verbose=false"], false)]
#[case::absent(&["server"], false)]
fn boolean_flags_are_presence_only(
    mut server: Server,
    #[case] args: &[&str],
    #[case] expected: bool,
) {
    parse_with(&mut server, &[], args).expect("parse");
    assert_eq!(server.verbose, expected);
}

#[rstest]
fn deprecated_use_is_recorded(mut server: Server) {
    let parsed = parse_with(&mut server, &[], &["server", "--host", "old.example"]).expect("parse");
    assert_eq!(
        parsed.deprecations(),
        &[Deprecation {
            flag: "host".to_owned(),
            reason: "use --addr instead".to_owned(),
        }]
    );
}

#[rstest]
fn unbound_fields_are_unknown_flags(mut server: Server) {
    for flag in ["--internal", "--cache"] {
        let err = parse_with(&mut server, &[], &["server", flag, "1"]).expect_err("unknown flag");
        assert!(matches!(err, FlagError::CliParsing(_)), "{err:?}");
    }
    assert_eq!(server.internal.get("owner").map(String::as_str), Some("ops"));
    assert!(server.cache.is_empty());
}

#[rstest]
fn value_errors_are_aggregated(mut server: Server) {
    let err = parse_with(&mut server, &[], &["server", "--port", "nope", "--wait", "5"])
        .expect_err("invalid values");
    let FlagError::Aggregate(errors) = err else {
        panic!("expected aggregate, got {err:?}");
    };
    let flags: Vec<_> = errors.iter().filter_map(FlagError::flag).collect();
    assert_eq!(flags, ["port", "wait"]);
}

#[rstest]
fn binding_table_follows_declaration_order(mut server: Server) {
    let mut set = FlagSet::new(Server::set_options()).with_env_lookup(|_| None);
    set.bind(&mut server).expect("bind");
    let names: Vec<_> = set.bindings().iter().map(FieldBinding::name).collect();
    assert_eq!(
        names,
        ["host", "port", "max-connections", "token", "verbose", "numbers", "wait"]
    );
    let token = set.lookup("token").expect("token bound");
    assert!(token.env_keys().is_empty());
    let limit = set.lookup("max-connections").expect("limit bound");
    assert_eq!(limit.env_keys(), ["APP_MAX_CONNECTIONS"]);
    assert_eq!(limit.source(), ValueSource::Default);
}

#[rstest]
fn help_lists_visible_flags(mut server: Server) {
    let mut set = FlagSet::new(Server::set_options()).with_env_lookup(|_| None);
    set.bind(&mut server).expect("bind");
    let usage = set.usage();
    let lines: Vec<_> = usage.lines().map(collapse_spaces).collect();
    for expected in [
        "server - version 1.2.3",
        "demo server",
        "server [OPTIONS]",
        "-h, --host, --address string [APP_HOST] server host (default: \"localhost\")",
        "-p, --port uint16 [LISTEN_PORT] listen port (default: \"8080\")",
        "--max-connections uint32 [APP_MAX_CONNECTIONS] connection limit (default: \"100\")",
        "--token string API token",
        "--verbose [APP_VERBOSE] chatty output",
        "--numbers int64Slice [APP_NUMBERS]",
        "--wait duration [APP_WAIT] (default: \"5s\")",
    ] {
        assert!(lines.iter().any(|line| line == expected), "missing {expected:?} in\n{usage}");
    }
    assert!(!usage.contains("DEPRECATED"));
    assert!(!usage.contains("internal"));
    assert!(!usage.contains("cache"));
}
