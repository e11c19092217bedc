// RovSim: AS-level BGP and ROV Simulator written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! IPv4 CIDR prefixes. Routing tables and Route Origin Authorizations are keyed by these.

use std::{fmt::Display, net::Ipv4Addr, str::FromStr};

use ipnet::{AddrParseError, Ipv4Net, PrefixLenError};
use serde::{de::Error, Deserialize, Serialize};

use prefix_trie::Prefix as PPrefix;

/// An IPv4 prefix in canonical form (all host bits below the mask are zero).
///
/// The canonical form makes the prefix usable as a routing-table key: two textual
/// representations of the same network (`10.0.1.2/8` and `10.0.0.0/8`) compare equal. Parsing
/// canonicalizes automatically.
///
/// ```
/// # use rovsim::types::Ipv4Prefix;
/// let p: Ipv4Prefix = "10.1.2.3/8".parse().unwrap();
/// assert_eq!(p.to_string(), "10.0.0.0/8");
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Ipv4Prefix(Ipv4Net);

impl Ipv4Prefix {
    /// Create a prefix from a network address and a prefix length (0 to 32). Host bits are
    /// masked away.
    pub fn new(addr: Ipv4Addr, len: u8) -> Result<Self, PrefixLenError> {
        Ipv4Net::new(addr, len).map(|net| Self(net.trunc()))
    }

    /// Create a prefix from the numeric (big-endian) representation of its network address.
    pub fn from_num(repr: u32, len: u8) -> Result<Self, PrefixLenError> {
        Self::new(Ipv4Addr::from(repr), len)
    }

    /// The network address.
    pub fn addr(&self) -> Ipv4Addr {
        self.0.addr()
    }

    /// The numeric (big-endian) representation of the network address.
    pub fn as_num(&self) -> u32 {
        self.0.addr().into()
    }

    /// The prefix length.
    pub fn prefix_len(&self) -> u8 {
        self.0.prefix_len()
    }

    /// Check whether `self` covers `other`, i.e., `self` is equally or less specific and the
    /// top `prefix_len()` bits of both network addresses agree. Every prefix covers itself.
    pub fn covers(&self, other: &Self) -> bool {
        self.0.contains(&other.0)
    }

    /// The covering prefix of `self` with the given (shorter or equal) length, or `None` if
    /// `len` is larger than the length of `self`.
    pub fn supernet_at(&self, len: u8) -> Option<Self> {
        (len <= self.prefix_len()).then(|| Self::new(self.addr(), len).unwrap())
    }
}

impl PPrefix for Ipv4Prefix {
    type R = u32;

    fn repr(&self) -> u32 {
        self.0.addr().into()
    }

    fn prefix_len(&self) -> u8 {
        self.0.prefix_len()
    }

    fn from_repr_len(repr: u32, len: u8) -> Self {
        Ipv4Prefix(Ipv4Net::new(repr.into(), len).unwrap())
    }

    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn mask(&self) -> u32 {
        self.0.network().into()
    }

    fn zero() -> Self {
        Self(Default::default())
    }

    fn contains(&self, other: &Self) -> bool {
        self.0.contains(&other.0)
    }
}

impl Serialize for Ipv4Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4Net::from_str(&s)
            .map_err(|s| D::Error::custom(format!("Expected IP Network, found {s}")))
            .map(|net| Self(net.trunc()))
    }
}

impl FromStr for Ipv4Prefix {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4Net::from_str(s).map(|net| Self(net.trunc()))
    }
}

impl Display for Ipv4Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Ipv4Net> for Ipv4Prefix {
    fn from(value: Ipv4Net) -> Self {
        Self(value.trunc())
    }
}

impl From<Ipv4Prefix> for Ipv4Net {
    fn from(value: Ipv4Prefix) -> Self {
        value.0
    }
}

impl From<Ipv4Prefix> for Ipv4Addr {
    fn from(value: Ipv4Prefix) -> Self {
        value.0.addr()
    }
}

impl From<Ipv4Prefix> for u32 {
    fn from(value: Ipv4Prefix) -> Self {
        value.0.addr().into()
    }
}
