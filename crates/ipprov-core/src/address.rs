//! Canonical IPv4/IPv6 host addresses.
//!
//! [`Address`] wraps a parsed [`IpAddr`] together with the text it was read
//! from. Equality, hashing and ordering only look at `(version, value)`, so
//! `"2001:DB8::1"` and `"2001:db8::1"` are the same set member and every IPv4
//! address sorts before every IPv6 address.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::ProvenanceError;
use crate::ignore::IgnoreList;

/// IP protocol version of an [`Address`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IpVersion {
    /// IPv4
    V4 = 4,
    /// IPv6
    V6 = 6,
}

/// Reason an address is dropped from a reconciliation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exclusion {
    /// `0.0.0.0` or `::`
    Unspecified,
    /// `224.0.0.0/4` or `ff00::/8`
    Multicast,
    /// Limited broadcast, `0.0.0.0/8` or `240.0.0.0/4`
    Reserved,
    /// RFC 1918, loopback, link-local or unique-local
    Private,
    /// Listed in the configured [`IgnoreList`]
    Ignored,
}

/// A single IPv4 or IPv6 host address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    ip: IpAddr,
    raw: String,
}

impl Address {
    /// Parse an address token, ignoring surrounding whitespace.
    pub fn parse(token: &str) -> crate::Result<Self> {
        let raw = token.trim();
        let ip = IpAddr::from_str(raw)
            .map_err(|_| ProvenanceError::InvalidAddress(raw.to_string()))?;
        Ok(Self {
            ip,
            raw: raw.to_string(),
        })
    }

    /// The parsed address.
    #[must_use]
    pub const fn ip(&self) -> IpAddr {
        self.ip
    }

    /// The text this address was parsed from.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn version(&self) -> IpVersion {
        match self.ip {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }

    /// Numeric value of the address.
    #[must_use]
    pub fn value(&self) -> u128 {
        match self.ip {
            IpAddr::V4(v4) => u128::from(u32::from(v4)),
            IpAddr::V6(v6) => u128::from(v6),
        }
    }

    /// Loopback, link-local and RFC 1918 (IPv4) or unique-local (IPv6).
    ///
    /// IPv4-mapped IPv6 addresses are judged by the embedded IPv4 address.
    #[must_use]
    pub fn is_private(&self) -> bool {
        match self.ip {
            IpAddr::V4(v4) => ipv4_is_private(v4),
            IpAddr::V6(v6) => v6
                .to_ipv4_mapped()
                .map_or_else(|| ipv6_is_private(v6), ipv4_is_private),
        }
    }

    /// IPv4 "this network" (`0.0.0.0/8`), class E (`240.0.0.0/4`) and the
    /// limited broadcast address, which never name a remote host.
    ///
    /// IPv4-mapped IPv6 addresses are judged by the embedded IPv4 address.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        match self.ip {
            IpAddr::V4(v4) => ipv4_is_reserved(v4),
            IpAddr::V6(v6) => v6.to_ipv4_mapped().is_some_and(ipv4_is_reserved),
        }
    }

    #[must_use]
    pub const fn is_multicast(&self) -> bool {
        self.ip.is_multicast()
    }

    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        self.ip.is_unspecified()
    }

    /// Why this address would be filtered out of a reconciliation result.
    ///
    /// Reasons are checked in the order unspecified, multicast, reserved,
    /// private, ignored; the first that applies is returned.
    #[must_use]
    pub fn exclusion(&self, ignore: &IgnoreList) -> Option<Exclusion> {
        if self.is_unspecified() {
            Some(Exclusion::Unspecified)
        } else if self.is_multicast() {
            Some(Exclusion::Multicast)
        } else if self.is_reserved() {
            Some(Exclusion::Reserved)
        } else if self.is_private() {
            Some(Exclusion::Private)
        } else if ignore.contains(self) {
            Some(Exclusion::Ignored)
        } else {
            None
        }
    }

    fn sort_key(&self) -> (IpVersion, u128) {
        (self.version(), self.value())
    }
}

fn ipv4_is_private(ip: Ipv4Addr) -> bool {
    ip.is_private() || ip.is_loopback() || ip.is_link_local()
}

fn ipv4_is_reserved(ip: Ipv4Addr) -> bool {
    let first = ip.octets()[0];
    // 0.0.0.0/8, 240.0.0.0/4 (includes 255.255.255.255)
    first == 0 || first >= 240
}

fn ipv6_is_private(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    ip.is_loopback()
        // fe80::/10
        || (first & 0xffc0) == 0xfe80
        // fc00::/7
        || (first & 0xfe00) == 0xfc00
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        Self {
            ip,
            raw: ip.to_string(),
        }
    }
}

impl FromStr for Address {
    type Err = ProvenanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = ProvenanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.ip.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.ip == other.ip
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ip.hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
