//! Tests for the value codec.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;

use super::*;

#[rstest]
#[case("", true)]
#[case("1", true)]
#[case("t", true)]
#[case("TRUE", true)]
#[case("True", true)]
#[case("0", false)]
#[case("F", false)]
#[case("false", false)]
fn parses_boolean_spellings(#[case] raw: &str, #[case] expected: bool) {
    let mut flag = !expected;
    flag.set_from_str(raw).expect("boolean spelling");
    assert_eq!(flag, expected);
}

#[test]
fn rejects_unknown_boolean_spelling() {
    let mut flag = false;
    let err = flag.set_from_str("yes").expect_err("not a boolean");
    assert_eq!(
        err,
        ValueError::InvalidBool {
            value: "yes".into()
        }
    );
    assert!(!flag);
}

#[rstest]
#[case("42", 42)]
#[case("-7", -7)]
#[case("0", 0)]
fn parses_signed_integers(#[case] raw: &str, #[case] expected: i32) {
    let mut value = 1_i32;
    value.set_from_str(raw).expect("integer");
    assert_eq!(value, expected);
}

#[rstest]
#[case::overflow("300")]
#[case::negative("-1")]
#[case::text("abc")]
fn rejects_out_of_range_unsigned(#[case] raw: &str) {
    let mut value = 5_u8;
    let err = value.set_from_str(raw).expect_err("must fail");
    assert!(matches!(err, ValueError::InvalidNumber { .. }));
    assert_eq!(value, 5);
}

#[test]
fn empty_input_is_a_no_op_for_non_booleans() {
    let mut port = 8080_u16;
    port.set_from_str("").expect("no-op");
    assert_eq!(port, 8080);

    let mut name = String::from("keep");
    name.set_from_str("").expect("no-op");
    assert_eq!(name, "keep");
}

#[test]
fn floats_format_with_fixed_precision() {
    let value = 0.5_f64;
    assert_eq!(value.format_value(), "0.5000000000000000000");
    let round_trip: f64 = value.format_value().parse().expect("float text");
    assert!((round_trip - value).abs() < f64::EPSILON);
}

#[test]
fn zero_values_format_as_empty() {
    assert_eq!(0_i64.format_value(), "");
    assert_eq!(false.format_value(), "");
    assert_eq!(String::new().format_value(), "");
    assert_eq!(Duration::ZERO.format_value(), "");
    assert_eq!(IpAddr::V4(Ipv4Addr::UNSPECIFIED).format_value(), "");
    assert_eq!(Vec::<u32>::new().format_value(), "");
    let zero = DateTime::<Utc>::from_timestamp(time::ZERO_TIMESTAMP_SECS, 0).expect("year one");
    assert_eq!(zero.format_value(), "");
}

#[test]
fn epoch_is_an_ordinary_timestamp() {
    assert_eq!(DateTime::<Utc>::UNIX_EPOCH.format_value(), "1970-01-01T00:00:00Z");
    let zero = DateTime::<Utc>::from_timestamp(time::ZERO_TIMESTAMP_SECS, 0).expect("year one");
    assert_eq!(zero.format_scalar(), "0001-01-01T00:00:00Z");
    let offset = zero.fixed_offset();
    assert_eq!(offset.format_value(), "");
}

#[rstest]
#[case("300ms", Duration::from_millis(300))]
#[case("1.5s", Duration::from_millis(1_500))]
#[case("1h30m", Duration::from_secs(5_400))]
#[case("2h45m10s", Duration::from_secs(9_910))]
#[case("10us", Duration::from_micros(10))]
#[case("10\u{b5}s", Duration::from_micros(10))]
#[case("7ns", Duration::from_nanos(7))]
#[case("0", Duration::ZERO)]
#[case("-0", Duration::ZERO)]
#[case(".5m", Duration::from_secs(30))]
fn parses_durations(#[case] raw: &str, #[case] expected: Duration) {
    assert_eq!(parse_duration(raw).expect("valid duration"), expected);
}

#[rstest]
#[case::empty("")]
#[case::missing_unit("10")]
#[case::unknown_unit("5 days")]
#[case::negative("-5s")]
#[case::no_number("ms")]
fn rejects_malformed_durations(#[case] raw: &str) {
    let err = parse_duration(raw).expect_err("must fail");
    assert!(matches!(err, ValueError::InvalidDuration { .. }));
    assert!(err.to_string().contains("invalid duration"));
}

#[rstest]
#[case(Duration::ZERO, "0s")]
#[case(Duration::from_nanos(12), "12ns")]
#[case(Duration::from_nanos(1_500), "1.5\u{b5}s")]
#[case(Duration::from_millis(300), "300ms")]
#[case(Duration::from_millis(1_500), "1.5s")]
#[case(Duration::from_secs(90), "1m30s")]
#[case(Duration::from_secs(5_400), "1h30m")]
#[case(Duration::from_secs(3_600), "1h")]
fn formats_durations(#[case] value: Duration, #[case] expected: &str) {
    assert_eq!(format_duration(value), expected);
}

#[test]
fn formatted_durations_parse_back() {
    for value in [
        Duration::from_nanos(1_234_567_891),
        Duration::from_secs(86_400 + 61),
        Duration::from_micros(999),
    ] {
        assert_eq!(parse_duration(&format_duration(value)).expect("round trip"), value);
    }
}

#[test]
fn malformed_addresses_are_ignored() {
    let original = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    let mut addr = original;
    addr.set_from_str("not-an-ip").expect("lenient");
    assert_eq!(addr, original);

    let mut net = IpNet::default();
    net.set_from_str("10.0.0.0/99").expect("lenient");
    assert_eq!(net, IpNet::default());
}

#[test]
fn networks_are_masked_to_their_prefix() {
    let mut net = IpNet::default();
    net.set_from_str("192.168.1.77/24").expect("network");
    assert_eq!(net.to_string(), "192.168.1.0/24");
    assert!(net.contains(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 200))));
    assert!(!net.contains(IpAddr::V4(Ipv4Addr::new(192, 168, 2, 1))));
    assert_eq!(net.type_label(), "ipNet");
}

#[test]
fn timestamps_round_trip_through_rfc3339() {
    let mut ts = DateTime::<Utc>::UNIX_EPOCH;
    ts.set_from_str("2024-03-01T12:30:00+02:00").expect("timestamp");
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).single().expect("valid");
    assert_eq!(ts, expected);
    assert_eq!(ts.format_value(), "2024-03-01T10:30:00Z");

    let err = ts.set_from_str("yesterday").expect_err("not rfc3339");
    assert!(matches!(err, ValueError::InvalidTimestamp { .. }));
}

#[test]
fn sequences_accumulate_and_render_bracketed() {
    let mut ports: Vec<u16> = Vec::new();
    ports.set_from_str("1").expect("first");
    ports.set_from_str("2").expect("second");
    assert_eq!(ports, vec![1, 2]);
    assert_eq!(ports.format_value(), "[1,2]");
    assert_eq!(ports.type_label(), "uint16Slice");
    assert!(ports.is_sequence());
    assert!(!ports.is_bool_flag());
}

#[test]
fn batch_updates_commit_all_or_nothing() {
    let mut ports: Vec<u16> = vec![80];
    let err = ports.set_all(&["8080", "port", "9090"]).expect_err("bad item");
    assert!(matches!(err, ValueError::InvalidNumber { .. }));
    assert_eq!(ports, vec![80]);

    ports.set_all(&["8080", "", "9090"]).expect("valid items");
    assert_eq!(ports, vec![80, 8080, 9090]);

    let mut wait = Duration::from_secs(1);
    wait.set_all(&["2s", "soon"]).expect_err("bad duration");
    assert_eq!(wait, Duration::from_secs(1));
}

#[test]
fn optional_fields_start_absent() {
    let mut path: Option<PathBuf> = None;
    assert_eq!(path.format_value(), "");
    path.set_from_str("/etc/app.toml").expect("path");
    assert_eq!(path, Some(PathBuf::from("/etc/app.toml")));
    assert_eq!(path.type_label(), "path");
}

#[test]
fn labels_follow_flag_conventions() {
    assert_eq!(0_isize.type_label(), "int");
    assert_eq!(0_i8.type_label(), "int8");
    assert_eq!(0_u64.type_label(), "uint64");
    assert_eq!(0.0_f32.type_label(), "float32");
    assert_eq!(Duration::ZERO.type_label(), "duration");
    assert_eq!(DateTime::<Utc>::UNIX_EPOCH.type_label(), "time");
    assert_eq!(Vec::<String>::new().type_label(), "stringSlice");
}
