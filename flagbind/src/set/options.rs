//! Builder options for a flag set and for individual flags.

use chrono::{DateTime, Utc};

use crate::tag::{EnvSpec, FlagMeta, split_deprecation};

/// Options describing a whole flag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOptions {
    pub(crate) name: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) build_time: Option<DateTime<Utc>>,
    pub(crate) prefix: String,
    pub(crate) env_prefix: String,
    pub(crate) auto_env: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            name: None,
            version: None,
            description: None,
            build_time: None,
            prefix: String::new(),
            env_prefix: String::new(),
            auto_env: true,
        }
    }
}

impl SetOptions {
    /// Options with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Program name shown in help; defaults to the file name of argv[0].
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Version shown in the help header and by `--version`.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into()).filter(|v: &String| !v.is_empty());
        self
    }

    /// One-line program description shown below the help header.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into()).filter(|d: &String| !d.is_empty());
        self
    }

    /// Build time shown in the help header.
    #[must_use]
    pub const fn build_time(mut self, build_time: DateTime<Utc>) -> Self {
        self.build_time = Some(build_time);
        self
    }

    /// Build time from RFC 3339 text; unparsable or empty text is ignored.
    #[must_use]
    pub fn build_time_rfc3339(mut self, raw: &str) -> Self {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => self.build_time = Some(ts.with_timezone(&Utc)),
            Err(err) if !raw.is_empty() => {
                tracing::debug!(value = raw, error = %err, "ignoring unparsable build time");
            }
            Err(_) => {}
        }
        self
    }

    /// Build time from seconds since the Unix epoch; non-positive values are ignored.
    #[must_use]
    pub fn build_time_unix(mut self, secs: i64) -> Self {
        if secs > 0 {
            self.build_time = DateTime::from_timestamp(secs, 0).or(self.build_time);
        }
        self
    }

    /// Build time from milliseconds since the Unix epoch; non-positive values are ignored.
    #[must_use]
    pub fn build_time_unix_millis(mut self, millis: i64) -> Self {
        if millis > 0 {
            self.build_time = DateTime::from_timestamp_millis(millis).or(self.build_time);
        }
        self
    }

    /// Prefix prepended to every flag name and alias.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Prefix prepended to derived environment keys, normalized to `PREFIX_`.
    #[must_use]
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = crate::name::normalize_env_prefix(prefix);
        self
    }

    /// Whether fields without an explicit `env` key get a derived one.
    #[must_use]
    pub const fn auto_env(mut self, enabled: bool) -> Self {
        self.auto_env = enabled;
        self
    }
}

/// Per-flag options for the builder API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagOptions {
    short: Option<char>,
    usage: String,
    aliases: Vec<String>,
    env: Vec<String>,
    no_env: bool,
    deprecated: Option<String>,
    short_deprecated: Option<String>,
    hidden: bool,
    config_file: bool,
}

impl FlagOptions {
    /// Options with no shorthand, usage or environment keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-character shorthand.
    #[must_use]
    pub const fn shorthand(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Shorthand that still parses but is deprecated for `reason`.
    ///
    /// The shorthand is left out of help; the long name is unaffected.
    #[must_use]
    pub fn shorthand_deprecated(mut self, short: char, reason: impl Into<String>) -> Self {
        self.short = Some(short);
        self.short_deprecated = Some(reason.into());
        self
    }

    /// Usage text; a `**DEPRECATED**` marker is honoured.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Add an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Append environment keys to the lookup list.
    #[must_use]
    pub fn env<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Replace the environment key list.
    #[must_use]
    pub fn env_set<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Never read this flag from the environment.
    #[must_use]
    pub const fn no_env(mut self) -> Self {
        self.no_env = true;
        self
    }

    /// Mark the flag deprecated.
    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecated = Some(reason.into());
        self
    }

    /// Omit the flag from help output.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Treat the flag's value as a configuration file path.
    #[must_use]
    pub const fn config_file(mut self) -> Self {
        self.config_file = true;
        self
    }

    pub(crate) fn into_meta(self, name: &str) -> FlagMeta {
        let (usage, marker_reason) = split_deprecation(&self.usage);
        let env = if self.no_env {
            EnvSpec::Disabled
        } else if self.env.is_empty() {
            EnvSpec::Derived
        } else {
            EnvSpec::Explicit(self.env)
        };
        FlagMeta {
            name: name.to_owned(),
            short: self.short,
            aliases: self.aliases,
            usage,
            deprecated: self.deprecated.or(marker_reason),
            short_deprecated: self.short_deprecated.filter(|_| self.short.is_some()),
            env,
            hidden: self.hidden,
            config_file: self.config_file,
        }
    }
}
