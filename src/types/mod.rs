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

//! Module containing all type definitions

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod prefix;
pub use prefix::Ipv4Prefix;

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asn(pub u32);

impl std::fmt::Display for Asn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Asn {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

impl From<u64> for Asn {
    fn from(x: u64) -> Self {
        Self(x as u32)
    }
}

impl From<usize> for Asn {
    fn from(x: usize) -> Self {
        Self(x as u32)
    }
}

impl From<i32> for Asn {
    fn from(x: i32) -> Self {
        Self(x as u32)
    }
}

impl<T> From<&T> for Asn
where
    T: Into<Asn> + Copy,
{
    fn from(x: &T) -> Self {
        (*x).into()
    }
}

/// The business relationship under which a route is learned or exported.
///
/// The first three variants label an edge of the AS graph as seen from one endpoint:
/// `Customer` means the neighbor on the other end is a customer of this AS. `Origin` is
/// reserved for routes an AS originates itself and never labels an edge.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Relationship {
    /// The neighbor is a customer of this AS (the customer pays for transit).
    Customer,
    /// The neighbor is a provider of this AS (this AS pays for transit).
    Provider,
    /// The neighbor is a settlement-free peer.
    Peer,
    /// The route was originated by this AS itself.
    Origin,
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relationship::Customer => write!(f, "customer"),
            Relationship::Provider => write!(f, "provider"),
            Relationship::Peer => write!(f, "peer"),
            Relationship::Origin => write!(f, "origin"),
        }
    }
}

/// Outcome of Route Origin Validation for a (prefix, origin) pair, following the semantics of
/// RFC 6811.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum RovState {
    /// A covering ROA authorizes the origin at this prefix length.
    Valid,
    /// A covering ROA exists, but none authorizes the (origin, length) combination.
    Invalid,
    /// No covering ROA exists.
    Unknown,
}

impl RovState {
    /// Numeric preference of the state, higher is preferred. Used by enforcing ASes in the
    /// route decision process.
    pub fn preference(&self) -> u8 {
        match self {
            RovState::Valid => 2,
            RovState::Unknown => 1,
            RovState::Invalid => 0,
        }
    }
}

impl std::fmt::Display for RovState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RovState::Valid => write!(f, "valid"),
            RovState::Invalid => write!(f, "invalid"),
            RovState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Topology Errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The provider-customer hierarchy contains a cycle. Such a topology has no valley-free
    /// fixed point, and the propagation engine refuses to run on it.
    #[error("provider-customer cycle detected: {}", .0.iter().join(" -> "))]
    CycleDetected(Vec<Asn>),
    /// Propagation ranks are missing or stale. They must be (re)computed after the last
    /// topology change before the propagation engine can run.
    #[error("propagation ranks have not been computed for the current topology")]
    RanksNotComputed,
}
