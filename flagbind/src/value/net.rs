//! Address codecs. Malformed addresses are ignored rather than rejected.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

use super::{Kind, Scalar, ValueError};

/// An IP network in CIDR notation, stored with host bits cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpNet {
    addr: IpAddr,
    prefix_len: u8,
}

/// Failure to parse CIDR text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid CIDR network '{0}'")]
pub struct IpNetParseError(String);

impl IpNet {
    /// Build a network, masking `addr` to `prefix_len` bits.
    ///
    /// Returns `None` when the prefix is longer than the address family.
    #[must_use]
    pub fn new(addr: IpAddr, prefix_len: u8) -> Option<Self> {
        let addr = match addr {
            IpAddr::V4(v4) => {
                if prefix_len > 32 {
                    return None;
                }
                let mask = u32::MAX.checked_shl(32 - u32::from(prefix_len)).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(u32::from(v4) & mask))
            }
            IpAddr::V6(v6) => {
                if prefix_len > 128 {
                    return None;
                }
                let mask = u128::MAX.checked_shl(128 - u32::from(prefix_len)).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(u128::from(v6) & mask))
            }
        };
        Some(Self { addr, prefix_len })
    }

    /// Network address.
    #[must_use]
    pub const fn addr(&self) -> IpAddr {
        self.addr
    }

    /// Number of leading network bits.
    #[must_use]
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Whether `ip` falls inside this network.
    #[must_use]
    pub fn contains(&self, ip: IpAddr) -> bool {
        Self::new(ip, self.prefix_len).is_some_and(|net| net.addr == self.addr)
    }
}

impl Default for IpNet {
    fn default() -> Self {
        Self {
            addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            prefix_len: 0,
        }
    }
}

impl FromStr for IpNet {
    type Err = IpNetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IpNetParseError(s.to_owned());
        let (addr_text, len_text) = s.split_once('/').ok_or_else(err)?;
        let addr: IpAddr = addr_text.parse().map_err(|_| err())?;
        let prefix_len: u8 = len_text.parse().map_err(|_| err())?;
        Self::new(addr, prefix_len).ok_or_else(err)
    }
}

impl fmt::Display for IpNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl Serialize for IpNet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IpNet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

macro_rules! address_scalar {
    ($($ty:ty: $label:literal => $kind:ident, $zero:expr),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const LABEL: &'static str = $label;

                fn kind() -> Kind {
                    Kind::$kind
                }

                fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError> {
                    let parsed = raw.parse::<$ty>().ok();
                    if parsed.is_none() {
                        tracing::debug!(value = raw, kind = $label, "ignoring malformed address");
                    }
                    Ok(parsed)
                }

                fn format_scalar(&self) -> String {
                    self.to_string()
                }

                fn is_zero(&self) -> bool {
                    let zero: fn(&$ty) -> bool = $zero;
                    zero(self)
                }
            }
        )*
    };
}

address_scalar!(
    IpAddr: "ip" => IpAddr, IpAddr::is_unspecified,
    Ipv4Addr: "ip" => IpAddr, Ipv4Addr::is_unspecified,
    Ipv6Addr: "ip" => IpAddr, Ipv6Addr::is_unspecified,
    IpNet: "ipNet" => IpNet, |net| net.addr.is_unspecified() && net.prefix_len == 0,
);
