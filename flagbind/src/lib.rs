//! Bind struct fields to command-line flags.
//!
//! `flagbind` maps each field of a struct to a flag, fills unset flags from
//! environment variables and renders an aligned help table. The derive macro
//! in the companion `flagbind_macros` crate generates the binding table;
//! [`FlagSet`] consumes it, drives `clap` as the parsing engine and writes
//! the results straight into the caller's struct.
//!
//! ```rust,no_run
//! use flagbind::Flags;
//!
//! #[derive(Flags)]
//! #[flags(version = "1.0.0", about = "demo server")]
//! struct Config {
//!     /// server host
//!     #[flag(name = "host h", env = "SERVER_HOST")]
//!     host: String,
//!     #[flag(name = "port p", usage = "server port")]
//!     port: u16,
//!     #[flag(skip)]
//!     internal: u8,
//! }
//!
//! let mut config = Config { host: "localhost".into(), port: 8080, internal: 0 };
//! let parsed = flagbind::parse_struct_or_exit(&mut config);
//! println!("{}:{} {:?}", config.host, config.port, parsed.args());
//! ```

extern crate self as flagbind;

pub use flagbind_macros::Flags;

mod error;
mod file;
mod help;
mod name;
mod set;
mod tag;
mod value;

use std::ffi::OsString;

pub use error::{AggregatedErrors, FlagError, FlagResult, is_display_request};
pub use file::{ConfigFormat, Ini, IniError, load_config_file, resolve_source};
#[cfg(feature = "yaml")]
pub use file::SaphyrYaml;
pub use name::{derive_env_key, derive_flag_name, normalize_env_prefix};
pub use set::{
    Deprecation, EnvLookup, FieldBinding, FlagOptions, FlagSet, Parsed, SetOptions, ValueSource,
};
pub use tag::{DEPRECATION_MARKER, EnvSpec, FieldTags, FlagMeta, split_deprecation, split_tokens};
pub use value::{
    FlagValue, IpNet, IpNetParseError, Kind, Scalar, ValueError, format_duration, parse_duration,
    text,
};

/// Types whose fields can be bound to flags.
///
/// Usually implemented with `#[derive(Flags)]`.
pub trait Flags {
    /// Register every bound field with `set`.
    ///
    /// # Errors
    ///
    /// Returns the first registration error, such as a duplicate flag name.
    fn bind<'a>(&'a mut self, set: &mut FlagSet<'a>) -> FlagResult<()>;

    /// Set options declared on the type.
    #[must_use]
    fn set_options() -> SetOptions
    where
        Self: Sized,
    {
        SetOptions::default()
    }

    /// Merge the configuration file named by `source` into `self`.
    ///
    /// Types without a config-file field return `Ok(false)`.
    ///
    /// # Errors
    ///
    /// See [`load_config_file`].
    fn load_config(&mut self, source: &str) -> FlagResult<bool> {
        let _ = source;
        Ok(false)
    }
}

/// Bind `value`, parse `args` and merge any named config file.
///
/// `args` includes the program name. The config file is loaded after the
/// command line and environment have been applied, so its values take
/// precedence over both.
///
/// # Errors
///
/// Returns registration, parse and config-file errors.
pub fn parse_struct<T, I, S>(value: &mut T, args: I) -> FlagResult<Parsed>
where
    T: Flags,
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let parsed = {
        let mut set = FlagSet::new(T::set_options());
        set.bind(value)?;
        set.parse_from(args)?
    };
    if let Some(source) = parsed.config_file() {
        value.load_config(source)?;
    }
    Ok(parsed)
}

/// Like [`parse_struct`] over the process arguments, exiting on failure.
///
/// Help and version requests exit with status 0; any error is printed to
/// stderr and exits with the engine's usage status.
pub fn parse_struct_or_exit<T: Flags>(value: &mut T) -> Parsed {
    let parsed = {
        let mut set = FlagSet::new(T::set_options());
        if let Err(err) = set.bind(value) {
            set.exit_with(&err);
        }
        set.parse_or_exit()
    };
    if let Some(source) = parsed.config_file()
        && let Err(err) = value.load_config(source)
    {
        clap::Error::raw(clap::error::ErrorKind::Io, format!("{err}\n")).exit();
    }
    parsed
}
