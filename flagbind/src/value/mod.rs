//! Bidirectional conversion between typed fields and flag strings.
//!
//! [`Scalar`] captures the element-level rules (parse, format, zero test)
//! for every supported kind. [`FlagValue`] is the object-safe view the binder
//! stores for each field; it is implemented for every scalar, for `Vec<T>`
//! (repeated occurrences append) and for `Option<T>` (absent until set).

use std::borrow::Cow;

use thiserror::Error;

mod duration;
mod net;
mod scalar;
pub mod text;
mod time;

pub use duration::{format_duration, parse_duration};
pub use net::{IpNet, IpNetParseError};

/// Semantic value category driving codec behaviour and help labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// `true`/`false`; presence-only on the command line.
    Bool,
    /// Base-10 signed integer of any width.
    SignedInt,
    /// Base-10 unsigned integer of any width.
    UnsignedInt,
    /// Floating point number.
    Float,
    /// Verbatim text, including paths.
    String,
    /// Span of time such as `1h30m`.
    Duration,
    /// IPv4 or IPv6 address.
    IpAddr,
    /// CIDR network such as `10.0.0.0/8`.
    IpNet,
    /// RFC 3339 timestamp.
    Timestamp,
    /// Homogeneous sequence; each occurrence appends one element.
    Sequence(Box<Kind>),
}

/// Conversion failures reported by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValueError {
    /// Malformed or out-of-range number.
    #[error("invalid number '{value}': {reason}")]
    InvalidNumber {
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Text that is not a recognised boolean spelling.
    #[error("invalid boolean '{value}'")]
    InvalidBool {
        /// Rejected input.
        value: String,
    },

    /// Text outside the duration grammar.
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration {
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Text that is not an RFC 3339 timestamp.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Element-level codec rules for one supported type.
pub trait Scalar: Sized {
    /// Help label, following the flag engine's naming (`int32`, `ipNet`, ...).
    const LABEL: &'static str;

    /// Whether an empty string is a real value rather than a no-op.
    const EMPTY_IS_VALUE: bool = false;

    /// Semantic kind of the type.
    fn kind() -> Kind;

    /// Parse one element.
    ///
    /// `Ok(None)` means the input was deliberately ignored (the lenient
    /// address kinds) and the destination must stay untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when the text is malformed for this type.
    fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError>;

    /// Format one element.
    fn format_scalar(&self) -> String;

    /// Whether this is the type's zero value.
    fn is_zero(&self) -> bool;
}

/// Object-safe view of a bound field used by the binder.
pub trait FlagValue {
    /// Semantic kind of the bound field.
    fn kind(&self) -> Kind;

    /// Label shown in the help table.
    fn type_label(&self) -> Cow<'static, str>;

    /// Current value as flag text; empty for zero values.
    fn format_value(&self) -> String;

    /// Apply several occurrences of the flag as one update.
    ///
    /// Every item is converted before anything is written, so a single bad
    /// item leaves the destination exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns the [`ValueError`] of the first item that cannot be converted.
    fn set_all(&mut self, items: &[&str]) -> Result<(), ValueError>;

    /// Apply one occurrence of the flag.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when `raw` cannot be converted. The
    /// destination is left unchanged on error.
    fn set_from_str(&mut self, raw: &str) -> Result<(), ValueError> {
        self.set_all(&[raw])
    }

    /// Whether the flag may appear without a value.
    fn is_bool_flag(&self) -> bool {
        matches!(self.kind(), Kind::Bool)
    }

    /// Whether repeated occurrences accumulate.
    fn is_sequence(&self) -> bool {
        matches!(self.kind(), Kind::Sequence(_))
    }
}

/// Parse one element, honouring the empty-input rule.
///
/// # Errors
///
/// Propagates the element type's parse failure.
pub fn parse_element<T: Scalar>(raw: &str) -> Result<Option<T>, ValueError> {
    if raw.is_empty() && !T::EMPTY_IS_VALUE {
        return Ok(None);
    }
    T::parse_scalar(raw)
}

/// Last value among `items`, or `None` when every item was ignored.
fn parse_last<T: Scalar>(items: &[&str]) -> Result<Option<T>, ValueError> {
    let mut last = None;
    for raw in items {
        if let Some(value) = parse_element::<T>(raw)? {
            last = Some(value);
        }
    }
    Ok(last)
}

impl<T: Scalar> FlagValue for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Sequence(Box::new(T::kind()))
    }

    fn type_label(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{}Slice", T::LABEL))
    }

    fn format_value(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let items: Vec<String> = self.iter().map(Scalar::format_scalar).collect();
        format!("[{}]", items.join(","))
    }

    fn set_all(&mut self, items: &[&str]) -> Result<(), ValueError> {
        let parsed = items
            .iter()
            .map(|raw| parse_element::<T>(raw))
            .collect::<Result<Vec<_>, _>>()?;
        self.extend(parsed.into_iter().flatten());
        Ok(())
    }
}

impl<T: Scalar> FlagValue for Option<T> {
    fn kind(&self) -> Kind {
        T::kind()
    }

    fn type_label(&self) -> Cow<'static, str> {
        Cow::Borrowed(T::LABEL)
    }

    fn format_value(&self) -> String {
        self.as_ref().map(Scalar::format_scalar).unwrap_or_default()
    }

    fn set_all(&mut self, items: &[&str]) -> Result<(), ValueError> {
        if let Some(item) = parse_last::<T>(items)? {
            *self = Some(item);
        }
        Ok(())
    }
}

/// Invokes `$callback!` with every scalar type the binder supports.
///
/// The scalar impls below and the runtime type switch both expand from this
/// list so the supported set is declared once.
macro_rules! for_each_scalar {
    ($callback:ident) => {
        $callback!(
            bool,
            i8,
            i16,
            i32,
            i64,
            isize,
            u8,
            u16,
            u32,
            u64,
            usize,
            f32,
            f64,
            String,
            std::path::PathBuf,
            std::time::Duration,
            std::net::IpAddr,
            std::net::Ipv4Addr,
            std::net::Ipv6Addr,
            $crate::value::IpNet,
            chrono::DateTime<chrono::Utc>,
            chrono::DateTime<chrono::FixedOffset>,
        );
    };
}
pub(crate) use for_each_scalar;

/// Implements [`FlagValue`] for plain scalar fields.
macro_rules! scalar_flag_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FlagValue for $ty {
                fn kind(&self) -> Kind {
                    <$ty as Scalar>::kind()
                }

                fn type_label(&self) -> Cow<'static, str> {
                    Cow::Borrowed(<$ty as Scalar>::LABEL)
                }

                fn format_value(&self) -> String {
                    if Scalar::is_zero(self) {
                        String::new()
                    } else {
                        self.format_scalar()
                    }
                }

                fn set_all(&mut self, items: &[&str]) -> Result<(), ValueError> {
                    if let Some(value) = parse_last::<$ty>(items)? {
                        *self = value;
                    }
                    Ok(())
                }
            }
        )*
    };
}

for_each_scalar!(scalar_flag_value);

#[cfg(test)]
mod tests;
