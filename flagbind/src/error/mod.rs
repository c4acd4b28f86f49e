//! Error types produced while binding, parsing and loading flags.

mod aggregate;
mod constructors;
mod conversions;
mod helpers;
mod types;

pub use aggregate::AggregatedErrors;
pub use helpers::is_display_request;
pub use types::{FlagError, FlagResult};
