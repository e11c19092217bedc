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

//! Route Origin Validation against a set of Route Origin Authorizations.

use prefix_trie::PrefixMap;
use serde::{Deserialize, Serialize};

use crate::types::{Asn, Ipv4Prefix, RovState};

/// A Route Origin Authorization: `asn` is authorized to originate `prefix` and any
/// more-specific prefix up to `max_length` bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roa {
    /// The authorized prefix.
    pub prefix: Ipv4Prefix,
    /// The AS authorized to originate the prefix.
    pub asn: Asn,
    /// The maximum prefix length the authorization extends to. At least `prefix.prefix_len()`.
    pub max_length: u8,
}

impl Roa {
    /// Create a new ROA. A `max_length` below the prefix length is raised to the prefix
    /// length, so the ROA always authorizes at least its own prefix.
    pub fn new(prefix: Ipv4Prefix, asn: Asn, max_length: u8) -> Self {
        Self {
            prefix,
            asn,
            max_length: max_length.max(prefix.prefix_len()),
        }
    }

    /// Check whether this ROA authorizes `origin` to announce a route of the given prefix
    /// length. The caller must have already established that `self.prefix` covers the
    /// announced prefix.
    fn authorizes(&self, origin: Asn, announced_len: u8) -> bool {
        self.asn == origin && announced_len <= self.max_length
    }
}

/// The validated ROA store, indexed by the exact ROA prefix.
///
/// The validator is populated once before the simulation and is read-only during propagation,
/// so a single instance serves every AS in the graph.
#[derive(Debug, Clone, Default)]
pub struct RovValidator {
    roas: PrefixMap<Ipv4Prefix, Vec<Roa>>,
}

impl RovValidator {
    /// Create an empty validator. With no ROAs installed, every announcement validates as
    /// [`RovState::Unknown`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of installed ROAs.
    pub fn len(&self) -> usize {
        self.roas.iter().map(|(_, roas)| roas.len()).sum()
    }

    /// Check whether no ROAs are installed.
    pub fn is_empty(&self) -> bool {
        self.roas.iter().next().is_none()
    }

    /// Install a ROA.
    pub fn add_roa(&mut self, roa: Roa) {
        match self.roas.get_mut(&roa.prefix) {
            Some(roas) => roas.push(roa),
            None => {
                let prefix = roa.prefix;
                self.roas.insert(prefix, vec![roa]);
            }
        }
    }

    /// The ROAs registered at exactly the given prefix.
    pub fn roas_at(&self, prefix: &Ipv4Prefix) -> &[Roa] {
        self.roas.get(prefix).map(Vec::as_slice).unwrap_or_default()
    }

    /// Classify the (prefix, origin) pair of an announcement.
    ///
    /// ROAs registered at exactly the announced prefix take precedence: if any exist, the
    /// announcement is [`RovState::Valid`] if one of them authorizes the origin at this
    /// length, and [`RovState::Invalid`] otherwise. Without an exact entry, all ROAs at
    /// covering (less specific) prefixes are consulted the same way. If no covering ROA
    /// exists at all, the announcement is [`RovState::Unknown`].
    pub fn validate(&self, prefix: &Ipv4Prefix, origin: Asn) -> RovState {
        let len = prefix.prefix_len();

        if let Some(roas) = self.roas.get(prefix) {
            return if roas.iter().any(|roa| roa.authorizes(origin, len)) {
                RovState::Valid
            } else {
                RovState::Invalid
            };
        }

        // No exact entry. Probe every less-specific covering prefix, longest first.
        let mut covered = false;
        for ancestor_len in (0..len).rev() {
            let ancestor = match prefix.supernet_at(ancestor_len) {
                Some(p) => p,
                None => continue,
            };
            if let Some(roas) = self.roas.get(&ancestor) {
                covered = true;
                if roas.iter().any(|roa| roa.authorizes(origin, len)) {
                    return RovState::Valid;
                }
            }
        }

        if covered {
            RovState::Invalid
        } else {
            RovState::Unknown
        }
    }
}
