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

//! The routing-information record exchanged between ASes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    policy,
    types::{Asn, Ipv4Prefix, Relationship, RovState},
};

/// Well-known community: do not export this route to peers or providers.
pub const NO_EXPORT: u32 = 0xFFFF_FF01;
/// Well-known community: do not advertise this route to any neighbor.
pub const NO_ADVERTISE: u32 = 0xFFFF_FF02;

/// A route announcement for a single prefix.
///
/// The announcement is a value type: it is copied on every propagation hop, and the receiving
/// AS prepends itself to the path of its copy. The AS path is ordered most-recent-first, so
/// the head is the AS holding the announcement and the last element is the origin. An
/// announcement stored in a routing table therefore always has the owning AS at the head of
/// its path.
///
/// `relationship` records how the *holding* AS learned the route (or [`Relationship::Origin`]
/// for self-originated routes), and `local_pref` is derived from it. Both are rewritten on
/// every hop; the ROV state is recomputed on every hop as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// The AS that originated the route.
    pub origin: Asn,
    /// The announced prefix.
    pub prefix: Ipv4Prefix,
    /// AS path, most recent hop first, origin last.
    pub as_path: Vec<Asn>,
    /// The relationship under which the holding AS learned this route.
    pub relationship: Relationship,
    /// Local preference, derived from `relationship`.
    pub local_pref: u32,
    /// Route Origin Validation outcome for (prefix, origin).
    pub rov_state: RovState,
    /// BGP community values attached to the route.
    pub communities: BTreeSet<u32>,
}

impl Announcement {
    /// Create a self-originated announcement. The path consists of the origin alone.
    pub fn originate(origin: Asn, prefix: Ipv4Prefix) -> Self {
        Self {
            origin,
            prefix,
            as_path: vec![origin],
            relationship: Relationship::Origin,
            local_pref: policy::local_pref(Relationship::Origin),
            rov_state: RovState::Unknown,
            communities: BTreeSet::new(),
        }
    }

    /// Return a copy of this announcement with `asn` prepended to the AS path. All other
    /// fields are preserved.
    pub fn prepend_hop(&self, asn: Asn) -> Self {
        let mut ann = self.clone();
        ann.as_path.insert(0, asn);
        ann
    }

    /// Check whether `asn` appears anywhere in the AS path. Used for loop prevention.
    pub fn has_asn(&self, asn: Asn) -> bool {
        self.as_path.contains(&asn)
    }

    /// Length of the AS path. At least 1 for any well-formed announcement.
    pub fn path_len(&self) -> usize {
        self.as_path.len()
    }

    /// The ASN of the neighbor this route was learned from, taken from the path itself. For a
    /// self-originated route (path length 1) this is the origin.
    pub fn neighbor_asn(&self) -> Asn {
        self.as_path[1.min(self.as_path.len() - 1)]
    }

    /// Record that the route was received under `relationship`, updating the local preference
    /// accordingly.
    pub fn set_relationship(&mut self, relationship: Relationship) {
        self.relationship = relationship;
        self.local_pref = policy::local_pref(relationship);
    }
}
