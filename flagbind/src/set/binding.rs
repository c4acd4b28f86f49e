//! One registered field and where its value came from.

use std::borrow::Cow;

use crate::tag::FlagMeta;
use crate::value::{FlagValue, Kind, ValueError};

/// Origin of a binding's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueSource {
    /// The field still holds the value it had when it was bound.
    #[default]
    Default,
    /// An environment variable supplied the value.
    Environment,
    /// The command line supplied the value.
    CommandLine,
}

/// Association between a flag's names and a field's storage.
///
/// The binding borrows the destination mutably for `'a`; setting the flag
/// writes straight into the caller's struct.
pub struct FieldBinding<'a> {
    meta: FlagMeta,
    env_keys: Vec<String>,
    value: &'a mut dyn FlagValue,
    source: ValueSource,
}

impl<'a> FieldBinding<'a> {
    pub(crate) fn new(meta: FlagMeta, env_keys: Vec<String>, value: &'a mut dyn FlagValue) -> Self {
        Self {
            meta,
            env_keys,
            value,
            source: ValueSource::Default,
        }
    }

    /// Canonical flag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Additional long names.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.meta.aliases
    }

    /// Single-character shorthand.
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        self.meta.short
    }

    /// Displayed usage text.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.meta.usage
    }

    /// Environment keys consulted in order.
    #[must_use]
    pub fn env_keys(&self) -> &[String] {
        &self.env_keys
    }

    /// Deprecation reason, if the flag is deprecated.
    #[must_use]
    pub fn deprecated(&self) -> Option<&str> {
        self.meta.deprecated.as_deref()
    }

    /// Deprecation reason for the shorthand spelling, if any.
    #[must_use]
    pub fn short_deprecated(&self) -> Option<&str> {
        self.meta.short_deprecated.as_deref()
    }

    /// Whether the flag is omitted from help output.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.meta.hidden
    }

    /// Whether the field names a configuration file.
    #[must_use]
    pub const fn is_config_file(&self) -> bool {
        self.meta.config_file
    }

    /// Semantic kind of the bound field.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Help label for the bound field.
    #[must_use]
    pub fn type_label(&self) -> Cow<'static, str> {
        self.value.type_label()
    }

    /// Current value as flag text.
    #[must_use]
    pub fn format_value(&self) -> String {
        self.value.format_value()
    }

    /// Where the current value came from.
    #[must_use]
    pub const fn source(&self) -> ValueSource {
        self.source
    }

    /// Whether `name` is the canonical name or one of the aliases.
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.meta.name == name || self.meta.aliases.iter().any(|alias| alias == name)
    }

    /// Every long name, canonical first.
    pub(crate) fn long_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.meta.name.as_str()).chain(self.meta.aliases.iter().map(String::as_str))
    }

    pub(crate) fn is_bool_flag(&self) -> bool {
        self.value.is_bool_flag()
    }

    pub(crate) fn is_sequence(&self) -> bool {
        self.value.is_sequence()
    }

    pub(crate) fn set(&mut self, raw: &str, source: ValueSource) -> Result<(), ValueError> {
        self.set_all(&[raw], source)
    }

    /// Apply `items` as one update; nothing is written if any item fails.
    pub(crate) fn set_all(&mut self, items: &[&str], source: ValueSource) -> Result<(), ValueError> {
        self.value.set_all(items)?;
        self.source = source;
        Ok(())
    }
}

impl std::fmt::Debug for FieldBinding<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("meta", &self.meta)
            .field("env_keys", &self.env_keys)
            .field("value", &self.value.format_value())
            .field("source", &self.source)
            .finish()
    }
}
