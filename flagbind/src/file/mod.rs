//! Loading configuration files over already-parsed flag values.

mod error;
mod format;
mod ini;
mod loader;
#[cfg(feature = "yaml")]
mod yaml;

pub use format::{ConfigFormat, resolve_source};
pub use ini::{Ini, IniError};
pub use loader::load_config_file;
#[cfg(feature = "yaml")]
pub use yaml::SaphyrYaml;
