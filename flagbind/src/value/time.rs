//! RFC 3339 timestamps backed by chrono.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use super::{Kind, Scalar, ValueError};

/// Seconds from the Unix epoch to `0001-01-01T00:00:00Z`, the zero timestamp.
///
/// The epoch itself is an ordinary value and shows up as a help default.
/// Fields with no meaningful default should be `Option<DateTime<_>>`.
pub(crate) const ZERO_TIMESTAMP_SECS: i64 = -62_135_596_800;

fn is_zero_instant(secs: i64, nanos: u32) -> bool {
    secs == ZERO_TIMESTAMP_SECS && nanos == 0
}

fn parse_rfc3339(raw: &str) -> Result<DateTime<FixedOffset>, ValueError> {
    DateTime::parse_from_rfc3339(raw).map_err(|err| ValueError::InvalidTimestamp {
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}

impl Scalar for DateTime<Utc> {
    const LABEL: &'static str = "time";

    fn kind() -> Kind {
        Kind::Timestamp
    }

    fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError> {
        parse_rfc3339(raw).map(|ts| Some(ts.with_timezone(&Utc)))
    }

    fn format_scalar(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn is_zero(&self) -> bool {
        is_zero_instant(self.timestamp(), self.timestamp_subsec_nanos())
    }
}

impl Scalar for DateTime<FixedOffset> {
    const LABEL: &'static str = "time";

    fn kind() -> Kind {
        Kind::Timestamp
    }

    fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError> {
        parse_rfc3339(raw).map(Some)
    }

    fn format_scalar(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn is_zero(&self) -> bool {
        is_zero_instant(self.timestamp(), self.timestamp_subsec_nanos())
    }
}
