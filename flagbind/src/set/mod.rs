//! The binding set: registration, parsing, env fallback and inspection.
//!
//! A [`FlagSet`] is an explicit context object. It borrows each bound field
//! mutably for its lifetime `'a`, so the caller's struct is written in place
//! and becomes readable again once the set is dropped.

use std::any::{Any, type_name};
use std::ffi::OsString;
use std::path::Path;

use chrono::{DateTime, Utc};
use clap::error::ErrorKind;
use clap::{ArgMatches, Command};

use crate::error::{FlagError, FlagResult};
use crate::help::{self, Header, HelpLayout};
use crate::name::derive_env_key;
use crate::tag::{EnvSpec, FieldTags, FlagMeta};
use crate::value::FlagValue;
use crate::Flags;

mod binding;
mod engine;
mod env;
mod options;
mod registry;

pub use binding::{FieldBinding, ValueSource};
pub use env::EnvLookup;
pub use options::{FlagOptions, SetOptions};

/// A deprecated flag that was used on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    /// Canonical name of the flag.
    pub flag: String,
    /// Recorded deprecation reason.
    pub reason: String,
}

/// Outcome of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    config_file: Option<String>,
    args: Vec<String>,
    deprecations: Vec<Deprecation>,
}

impl Parsed {
    /// Config file named by the config-file flag, when it is non-empty.
    #[must_use]
    pub fn config_file(&self) -> Option<&str> {
        self.config_file.as_deref()
    }

    /// Positional arguments in command-line order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Deprecated flags that were used.
    #[must_use]
    pub fn deprecations(&self) -> &[Deprecation] {
        &self.deprecations
    }
}

/// Program name derived from the first process argument.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace)
}

fn valid_short(short: char) -> bool {
    short != '-' && short != '=' && !short.is_whitespace() && !short.is_control()
}

/// A set of field bindings sharing one command line and environment.
pub struct FlagSet<'a> {
    name: String,
    options: SetOptions,
    bindings: Vec<FieldBinding<'a>>,
    layout: HelpLayout,
    env_lookup: EnvLookup<'a>,
}

impl std::fmt::Debug for FlagSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

impl Default for FlagSet<'_> {
    fn default() -> Self {
        Self::new(SetOptions::default())
    }
}

impl<'a> FlagSet<'a> {
    /// Create an empty set reading the process environment.
    #[must_use]
    pub fn new(options: SetOptions) -> Self {
        let name = options.name.clone().unwrap_or_else(program_name);
        Self {
            name,
            options,
            bindings: Vec::new(),
            layout: HelpLayout::default(),
            env_lookup: env::process_env(),
        }
    }

    /// Replace the environment source used for fallback values.
    #[must_use]
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        self.env_lookup = Box::new(lookup);
        self
    }

    /// Program name used in help output.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.options.version.as_deref()
    }

    /// Configured description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.options.description.as_deref()
    }

    /// Configured build time.
    #[must_use]
    pub const fn build_time(&self) -> Option<DateTime<Utc>> {
        self.options.build_time
    }

    /// Bind every field of `value`.
    ///
    /// # Errors
    ///
    /// Returns the first registration error reported by the generated binder.
    pub fn bind<T: Flags + ?Sized>(&mut self, value: &'a mut T) -> FlagResult<()> {
        value.bind(self)
    }

    /// Bind one field described by `tags`. Fields tagged `-` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when the resulting name or shorthand is invalid or
    /// already registered.
    pub fn bind_field<T: FlagValue>(&mut self, value: &'a mut T, tags: FieldTags) -> FlagResult<()> {
        match tags.parse() {
            Some(meta) => self.register(meta, value),
            None => {
                tracing::debug!(field = tags.ident(), "skipping field");
                Ok(())
            }
        }
    }

    /// Bind `value` under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the name or shorthand is invalid or already
    /// registered.
    pub fn var<T: FlagValue>(&mut self, value: &'a mut T, name: &str, options: FlagOptions) -> FlagResult<()> {
        self.register(options.into_meta(name), value)
    }

    /// Bind a value whose type is only known at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::UnsupportedFieldType`] when `T` has no flag
    /// representation, plus the errors of [`FlagSet::var`].
    pub fn var_any<T: Any>(&mut self, value: &'a mut T, name: &str, options: FlagOptions) -> FlagResult<()> {
        let unsupported = || FlagError::UnsupportedFieldType {
            flag: name.to_owned(),
            type_name: type_name::<T>(),
        };
        let any: &'a mut dyn Any = value;
        let caster = registry::find(any).ok_or_else(unsupported)?;
        let flag_value = (caster.cast)(any).ok_or_else(unsupported)?;
        self.register(options.into_meta(name), flag_value)
    }

    fn register(&mut self, mut meta: FlagMeta, value: &'a mut dyn FlagValue) -> FlagResult<()> {
        if !self.options.prefix.is_empty() {
            meta.name = format!("{}{}", self.options.prefix, meta.name);
            for alias in &mut meta.aliases {
                *alias = format!("{}{alias}", self.options.prefix);
            }
        }
        self.validate(&meta)?;

        let env_keys = match &meta.env {
            EnvSpec::Derived if self.options.auto_env => {
                vec![derive_env_key(&self.options.env_prefix, &meta.name)]
            }
            EnvSpec::Explicit(keys) => keys.clone(),
            EnvSpec::Derived | EnvSpec::Disabled => Vec::new(),
        };
        tracing::debug!(
            flag = %meta.name,
            kind = ?value.kind(),
            env = ?env_keys,
            "registered flag"
        );
        let binding = FieldBinding::new(meta, env_keys, value);
        self.layout.observe(&binding);
        self.bindings.push(binding);
        Ok(())
    }

    fn validate(&self, meta: &FlagMeta) -> FlagResult<()> {
        let names: Vec<&String> = std::iter::once(&meta.name).chain(&meta.aliases).collect();
        for (index, name) in names.iter().enumerate() {
            if !valid_name(name) {
                return Err(FlagError::InvalidFlagName {
                    name: (*name).clone(),
                });
            }
            let earlier = names.get(..index).unwrap_or_default();
            let existing = if earlier.contains(name) {
                Some(meta.name.as_str())
            } else {
                self.bindings
                    .iter()
                    .find(|b| b.answers_to(name))
                    .map(FieldBinding::name)
            };
            if let Some(existing) = existing {
                return Err(FlagError::DuplicateFlag {
                    name: (*name).clone(),
                    existing: existing.to_owned(),
                });
            }
        }
        if let Some(short) = meta.short {
            if !valid_short(short) {
                return Err(FlagError::InvalidShorthand {
                    flag: meta.name.clone(),
                    short,
                });
            }
            if let Some(existing) = self.bindings.iter().find(|b| b.short() == Some(short)) {
                return Err(FlagError::DuplicateShorthand {
                    short,
                    existing: existing.name().to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Registered bindings in registration order.
    #[must_use]
    pub fn bindings(&self) -> &[FieldBinding<'a>] {
        &self.bindings
    }

    /// Find a binding by long name, alias, or one-character shorthand.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&FieldBinding<'a>> {
        let mut chars = name.chars();
        let short = match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        };
        self.bindings
            .iter()
            .find(|b| b.answers_to(name) || (short.is_some() && b.short() == short))
    }

    /// Whether the named flag was given on the command line.
    #[must_use]
    pub fn changed(&self, name: &str) -> bool {
        self.lookup(name)
            .is_some_and(|b| b.source() == ValueSource::CommandLine)
    }

    /// Set a flag programmatically, as if it appeared on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::InvalidFlagName`] for an unknown flag or
    /// [`FlagError::Value`] when the value does not convert.
    pub fn set(&mut self, name: &str, raw: &str) -> FlagResult<()> {
        let binding = self
            .bindings
            .iter_mut()
            .find(|b| b.answers_to(name))
            .ok_or_else(|| FlagError::InvalidFlagName {
                name: name.to_owned(),
            })?;
        let flag = binding.name().to_owned();
        binding
            .set(raw, ValueSource::CommandLine)
            .map_err(|err| FlagError::value(flag, err))
    }

    /// Rendered help text.
    #[must_use]
    pub fn usage(&self) -> String {
        let header = Header {
            name: &self.name,
            version: self.options.version.as_deref(),
            description: self.options.description.as_deref(),
            build_time: self.options.build_time,
        };
        help::render(&header, &self.layout, &self.bindings, |binding| {
            self.displayed_default(binding)
        })
    }

    /// Default shown in help: a pending environment value wins over the
    /// field's own value until the set has been parsed.
    fn displayed_default(&self, binding: &FieldBinding<'_>) -> String {
        if binding.source() != ValueSource::Default {
            return binding.format_value();
        }
        match env::first_value(&self.env_lookup, binding.env_keys()) {
            Some((_, raw)) if binding.is_sequence() => {
                format!("[{}]", env::split_list(&raw).join(","))
            }
            Some((_, raw)) => raw,
            None => binding.format_value(),
        }
    }

    /// The engine command for the current bindings.
    #[must_use]
    pub fn command(&self) -> Command {
        let spec = engine::CommandSpec {
            name: &self.name,
            version: self.options.version.as_deref(),
            help: self.usage(),
        };
        engine::build_command(spec, &self.bindings)
    }

    /// Parse `args`, whose first item is the program name.
    ///
    /// Command-line values are applied first; bindings not given on the
    /// command line then take the first non-empty value among their
    /// environment keys. Value errors are collected across all flags.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::CliParsing`] for engine failures, including
    /// help and version requests (see [`crate::is_display_request`]), and
    /// value errors attributed to their flag.
    pub fn parse_from<I, S>(&mut self, args: I) -> FlagResult<Parsed>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let matches = self.command().try_get_matches_from(&args)?;
        let used_shorts = engine::used_shorts(&args, &self.bindings);
        self.apply(&matches, &used_shorts)
    }

    /// Parse the process arguments.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::parse_from`].
    pub fn parse(&mut self) -> FlagResult<Parsed> {
        self.parse_from(std::env::args_os())
    }

    /// Parse the process arguments, exiting on help, version or error.
    pub fn parse_or_exit(&mut self) -> Parsed {
        self.parse_from_or_exit(std::env::args_os())
    }

    /// Parse `args`, exiting on help, version or error.
    ///
    /// Help and version requests exit with status 0 after printing to
    /// stdout; errors are printed to stderr with usage and exit non-zero.
    pub fn parse_from_or_exit<I, S>(&mut self, args: I) -> Parsed
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        match self.parse_from(args) {
            Ok(parsed) => parsed,
            Err(err) => self.exit_with(&err),
        }
    }

    /// Report `err` the way the engine reports its own errors and exit.
    pub fn exit_with(&self, err: &FlagError) -> ! {
        match err {
            FlagError::CliParsing(clap_err) => clap_err.exit(),
            other => self.command().error(ErrorKind::InvalidValue, other).exit(),
        }
    }

    fn apply(&mut self, matches: &ArgMatches, used_shorts: &[char]) -> FlagResult<Parsed> {
        let mut errors = Vec::new();
        let mut deprecations = Vec::new();

        for binding in &mut self.bindings {
            if let Some(values) = engine::explicit_values(matches, binding) {
                let items: Vec<&str> = values.iter().map(String::as_str).collect();
                if let Err(err) = binding.set_all(&items, ValueSource::CommandLine) {
                    errors.push(FlagError::value(binding.name(), err));
                }
                if let Some(reason) = binding.deprecated() {
                    tracing::warn!(flag = binding.name(), reason, "deprecated flag used");
                    deprecations.push(Deprecation {
                        flag: binding.name().to_owned(),
                        reason: reason.to_owned(),
                    });
                }
                let short_used = binding.short().is_some_and(|short| used_shorts.contains(&short));
                if let Some(reason) = binding.short_deprecated().filter(|_| short_used) {
                    tracing::warn!(
                        flag = binding.name(),
                        short = ?binding.short(),
                        reason,
                        "deprecated shorthand used"
                    );
                    deprecations.push(Deprecation {
                        flag: binding.name().to_owned(),
                        reason: reason.to_owned(),
                    });
                }
                continue;
            }

            let Some((key, raw)) = env::first_value(&self.env_lookup, binding.env_keys()) else {
                continue;
            };
            tracing::debug!(flag = binding.name(), key = %key, "applying environment value");
            let items = if binding.is_sequence() {
                env::split_list(&raw)
            } else {
                vec![raw.as_str()]
            };
            if let Err(err) = binding.set_all(&items, ValueSource::Environment) {
                errors.push(FlagError::value(binding.name(), err));
            }
        }

        if let Some(err) = FlagError::try_aggregate(errors) {
            return Err(err);
        }

        let config_file = self
            .bindings
            .iter()
            .find(|b| b.is_config_file())
            .map(FieldBinding::format_value)
            .filter(|path| !path.is_empty());

        Ok(Parsed {
            config_file,
            args: engine::positional(matches),
            deprecations,
        })
    }

    /// Log every bound value at debug level.
    pub fn log_values(&self) {
        for binding in &self.bindings {
            tracing::debug!(
                flag = binding.name(),
                value = %binding.format_value(),
                source = ?binding.source(),
                "flag value"
            );
        }
    }
}
