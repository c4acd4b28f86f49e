//! Parsing of declarative field metadata into flag metadata.
//!
//! [`FieldTags`] holds the raw strings attached to a field, either emitted by
//! `#[derive(Flags)]` or assembled by hand. [`FieldTags::parse`] turns them
//! into a [`FlagMeta`]; it never fails, malformed text simply yields fewer
//! tokens.

use crate::name::derive_flag_name;

/// Marker that separates displayed usage from a deprecation reason.
pub const DEPRECATION_MARKER: &str = "**DEPRECATED**";

/// Suffix on a flag specification marking a config-file path field.
pub const FILE_SUFFIX: &str = ",file";

/// Generic reason recorded when a deprecation marker has no tail.
const GENERIC_DEPRECATION: &str = "deprecated";

/// Raw metadata attached to one struct field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTags {
    ident: String,
    flag: Option<String>,
    short: Option<char>,
    usage: Option<String>,
    alias: Option<String>,
    env: Option<String>,
    hidden: bool,
    deprecated: Option<String>,
    file: bool,
}

/// Where a binding looks for environment values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSpec {
    /// Use the key derived from the flag name, when automatic env is on.
    Derived,
    /// Check these keys in order; they are used verbatim.
    Explicit(Vec<String>),
    /// Never read the environment.
    Disabled,
}

/// Flag metadata produced by [`FieldTags::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagMeta {
    /// Canonical long name.
    pub name: String,
    /// Single-character shorthand.
    pub short: Option<char>,
    /// Additional long names, in declaration order.
    pub aliases: Vec<String>,
    /// Usage text with any deprecation marker removed.
    pub usage: String,
    /// Deprecation reason, when the flag is deprecated.
    pub deprecated: Option<String>,
    /// Deprecation reason for the shorthand spelling alone.
    pub short_deprecated: Option<String>,
    /// Environment binding policy.
    pub env: EnvSpec,
    /// Whether the flag is omitted from help output.
    pub hidden: bool,
    /// Whether the field names a configuration file.
    pub config_file: bool,
}

/// Split tag text on spaces, commas, semicolons and other whitespace.
///
/// # Examples
///
/// ```
/// use flagbind::split_tokens;
/// assert_eq!(split_tokens("host, h;server"), vec!["host", "h", "server"]);
/// ```
#[must_use]
pub fn split_tokens(raw: &str) -> Vec<&str> {
    raw.split(|ch: char| ch == ',' || ch == ';' || ch.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Separate a deprecation marker from usage text.
///
/// Returns the displayed usage and, when the marker is present, the reason.
///
/// # Examples
///
/// ```
/// use flagbind::split_deprecation;
/// let (usage, reason) = split_deprecation("old flag **DEPRECATED** use --new instead");
/// assert_eq!(usage, "old flag");
/// assert_eq!(reason.as_deref(), Some("use --new instead"));
/// ```
#[must_use]
pub fn split_deprecation(usage: &str) -> (String, Option<String>) {
    match usage.split_once(DEPRECATION_MARKER) {
        Some((head, tail)) => {
            let tail = tail.trim();
            let reason = if tail.is_empty() {
                GENERIC_DEPRECATION
            } else {
                tail
            };
            (head.trim_end().to_owned(), Some(reason.to_owned()))
        }
        None => (usage.to_owned(), None),
    }
}

impl FieldTags {
    /// Start a tag set for the field named `ident`.
    #[must_use]
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            ..Self::default()
        }
    }

    /// Set the flag specification (`"name"`, `"name x"`, `"-"`, `"name,file"`).
    #[must_use]
    pub fn flag(mut self, spec: impl Into<String>) -> Self {
        self.flag = Some(spec.into());
        self
    }

    /// Set an explicit shorthand, overriding one found in the flag spec.
    #[must_use]
    pub const fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Set the usage text.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Set the alias list text.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the environment key list text; `"-"` disables env binding.
    #[must_use]
    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Hide the flag from help output.
    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Mark the flag deprecated with `reason`.
    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecated = Some(reason.into());
        self
    }

    /// Mark the field as a configuration-file path.
    #[must_use]
    pub const fn file(mut self, file: bool) -> Self {
        self.file = file;
        self
    }

    /// Field identifier the tags were declared on.
    #[must_use]
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Resolve the tags into flag metadata; `None` means skip the field.
    #[must_use]
    pub fn parse(&self) -> Option<FlagMeta> {
        let mut spec = self.flag.as_deref().unwrap_or_default().trim();
        if spec == "-" {
            return None;
        }
        let mut config_file = self.file;
        if let Some(stripped) = spec.strip_suffix(FILE_SUFFIX) {
            spec = stripped;
            config_file = true;
        }

        let tokens = split_tokens(spec);
        let name = tokens
            .iter()
            .find(|token| token.chars().count() > 1)
            .map_or_else(|| derive_flag_name(&self.ident), |token| (*token).to_owned());
        let short = self.short.or_else(|| {
            tokens.iter().find_map(|token| {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if ch != '-' => Some(ch),
                    _ => None,
                }
            })
        });

        let aliases = self
            .alias
            .as_deref()
            .map(split_tokens)
            .unwrap_or_default()
            .into_iter()
            .map(str::to_owned)
            .collect();

        let (usage, marker_reason) = split_deprecation(self.usage.as_deref().unwrap_or_default());
        let deprecated = self.deprecated.clone().or(marker_reason);

        Some(FlagMeta {
            name,
            short,
            aliases,
            usage,
            deprecated,
            short_deprecated: None,
            env: self.env_spec(),
            hidden: self.hidden,
            config_file,
        })
    }

    fn env_spec(&self) -> EnvSpec {
        let Some(raw) = self.env.as_deref() else {
            return EnvSpec::Derived;
        };
        if raw.trim() == "-" {
            return EnvSpec::Disabled;
        }
        let keys: Vec<String> = split_tokens(raw).into_iter().map(str::to_owned).collect();
        if keys.is_empty() {
            EnvSpec::Derived
        } else {
            EnvSpec::Explicit(keys)
        }
    }
}
