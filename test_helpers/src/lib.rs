//! Test helpers shared across the flagbind workspace.
//!
//! - [`env`] serialises process-environment mutation behind RAII guards.
//! - [`jail`] wraps `figment::Jail` so closures can report `anyhow` errors.
//! - [`text`] normalises rendered help text for comparisons.

pub mod env;
pub mod jail;
pub mod text;
