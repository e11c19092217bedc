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

//! A single Autonomous System: its neighbor lists, its routing table, and the local route
//! decision process.

use std::collections::{BTreeMap, VecDeque};

use log::trace;

use crate::{
    announcement::{Announcement, NO_ADVERTISE, NO_EXPORT},
    policy,
    propagation::ConvergenceReport,
    rov::RovValidator,
    types::{Asn, Ipv4Prefix, Relationship, RovState},
};

/// A node of the AS graph.
///
/// Each node keeps three neighbor lists (customers, providers, and peers, each sorted by ASN
/// and mutually disjoint), a routing table mapping each known prefix to the single best
/// announcement, and a queue of announcements received but not yet processed.
///
/// Received announcements are only enqueued by [`AsNode::receive`]; all validation and the
/// route decision happen later in [`AsNode::process_incoming_queue`]. This split is what
/// gives the propagation engine its synchronous-update semantics: within one propagation
/// sweep, no AS can observe a routing-table change a neighbor made in the same sweep.
#[derive(Debug, Clone)]
pub struct AsNode {
    asn: Asn,
    customers: Vec<Asn>,
    providers: Vec<Asn>,
    peers: Vec<Asn>,
    rank: usize,
    rib: BTreeMap<Ipv4Prefix, Announcement>,
    incoming: VecDeque<(Announcement, Asn)>,
    to_propagate: BTreeMap<Ipv4Prefix, Announcement>,
    drop_invalid: bool,
}

impl AsNode {
    pub(crate) fn new(asn: Asn) -> Self {
        Self {
            asn,
            customers: Vec::new(),
            providers: Vec::new(),
            peers: Vec::new(),
            rank: 0,
            rib: BTreeMap::new(),
            incoming: VecDeque::new(),
            to_propagate: BTreeMap::new(),
            drop_invalid: false,
        }
    }

    /// The ASN of this AS.
    pub fn asn(&self) -> Asn {
        self.asn
    }

    /// The customers of this AS, sorted by ASN.
    pub fn customers(&self) -> &[Asn] {
        &self.customers
    }

    /// The providers of this AS, sorted by ASN.
    pub fn providers(&self) -> &[Asn] {
        &self.providers
    }

    /// The peers of this AS, sorted by ASN.
    pub fn peers(&self) -> &[Asn] {
        &self.peers
    }

    /// The propagation rank: the height of this AS in the customer-to-provider hierarchy.
    /// ASes without customers sit at rank 0.
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub(crate) fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }

    /// Whether this AS enforces Route Origin Validation by dropping invalid announcements.
    pub fn drop_invalid(&self) -> bool {
        self.drop_invalid
    }

    pub(crate) fn set_drop_invalid(&mut self, drop_invalid: bool) {
        self.drop_invalid = drop_invalid;
    }

    /// The routing table: the selected best announcement for every known prefix.
    pub fn rib(&self) -> &BTreeMap<Ipv4Prefix, Announcement> {
        &self.rib
    }

    /// The selected route for the given prefix, if one is installed.
    pub fn get_route(&self, prefix: &Ipv4Prefix) -> Option<&Announcement> {
        self.rib.get(prefix)
    }

    /// Routes installed or replaced since the node was created. The propagation sweeps
    /// re-export the full routing table, so this map is informational and never drained.
    pub fn pending_exports(&self) -> &BTreeMap<Ipv4Prefix, Announcement> {
        &self.to_propagate
    }

    /// The number of received announcements waiting to be processed.
    pub fn pending_incoming(&self) -> usize {
        self.incoming.len()
    }

    pub(crate) fn add_customer(&mut self, asn: Asn) {
        Self::insert_sorted(&mut self.customers, asn);
    }

    pub(crate) fn add_provider(&mut self, asn: Asn) {
        Self::insert_sorted(&mut self.providers, asn);
    }

    pub(crate) fn add_peer(&mut self, asn: Asn) {
        Self::insert_sorted(&mut self.peers, asn);
    }

    fn insert_sorted(list: &mut Vec<Asn>, asn: Asn) {
        if let Err(pos) = list.binary_search(&asn) {
            list.insert(pos, asn);
        }
    }

    /// How the given neighbor relates to this AS, or `None` if it is not a neighbor at all.
    pub fn relationship_of(&self, neighbor: Asn) -> Option<Relationship> {
        if self.customers.binary_search(&neighbor).is_ok() {
            Some(Relationship::Customer)
        } else if self.providers.binary_search(&neighbor).is_ok() {
            Some(Relationship::Provider)
        } else if self.peers.binary_search(&neighbor).is_ok() {
            Some(Relationship::Peer)
        } else {
            None
        }
    }

    /// Enqueue an announcement received from `from`. The announcement is neither validated
    /// nor installed here; that happens in [`AsNode::process_incoming_queue`].
    pub fn receive(&mut self, ann: Announcement, from: Asn) {
        self.incoming.push_back((ann, from));
    }

    /// Originate a prefix at this AS. The resulting route carries this AS as its only path
    /// element, is validated against the given validator, and is always installed, replacing
    /// any previously learned route for the prefix.
    pub fn originate_prefix(&mut self, prefix: Ipv4Prefix, validator: Option<&RovValidator>) {
        let mut ann = Announcement::originate(self.asn, prefix);
        if let Some(validator) = validator {
            ann.rov_state = validator.validate(&prefix, self.asn);
        }
        self.to_propagate.insert(prefix, ann.clone());
        self.rib.insert(prefix, ann);
    }

    /// Drain the incoming queue and update the routing table, returning whether any entry
    /// was installed or replaced.
    ///
    /// Every queued announcement passes, in order: a neighbor check (the sender must appear
    /// in one of the neighbor lists), loop prevention (the path must not contain this AS),
    /// the hop transform (prepend own ASN, rewrite relationship and local preference), and
    /// ROV validation (an enforcing AS drops invalid announcements). Survivors are compared
    /// against the installed route and take its place if they win the decision process.
    pub fn process_incoming_queue(
        &mut self,
        validator: Option<&RovValidator>,
        report: &mut ConvergenceReport,
    ) -> bool {
        let mut changed = false;

        while let Some((ann, from)) = self.incoming.pop_front() {
            let relationship = match self.relationship_of(from) {
                Some(r) => r,
                None => {
                    report.dropped_non_neighbor += 1;
                    continue;
                }
            };

            if ann.has_asn(self.asn) {
                report.dropped_path_loop += 1;
                continue;
            }

            let mut ann = ann.prepend_hop(self.asn);
            ann.set_relationship(relationship);

            if let Some(validator) = validator {
                ann.rov_state = validator.validate(&ann.prefix, ann.origin);
                if self.drop_invalid && ann.rov_state == RovState::Invalid {
                    trace!("AS{}: drop invalid route for {}", self.asn, ann.prefix);
                    report.dropped_invalid += 1;
                    continue;
                }
            }

            let rov_active = self.drop_invalid && validator.is_some();
            let install = match self.rib.get(&ann.prefix) {
                None => true,
                Some(current) => Self::is_better_path(&ann, current, rov_active),
            };

            if install {
                trace!(
                    "AS{}: install route for {} via {}",
                    self.asn,
                    ann.prefix,
                    ann.neighbor_asn()
                );
                report.rib_updates += 1;
                self.to_propagate.insert(ann.prefix, ann.clone());
                self.rib.insert(ann.prefix, ann);
                changed = true;
            }
        }

        changed
    }

    /// The route decision process. Returns whether `new` replaces `current`.
    ///
    /// Comparators apply top to bottom, the first that differentiates decides. The ROV tier
    /// only participates on enforcing ASes; everyone else routes by plain BGP preference.
    /// Ties fall to the incumbent, which makes the outcome first-come first-served and the
    /// whole process total and deterministic.
    fn is_better_path(new: &Announcement, current: &Announcement, rov_active: bool) -> bool {
        // 0. Valid beats Unknown beats Invalid, on enforcing ASes only.
        if rov_active && new.rov_state.preference() != current.rov_state.preference() {
            return new.rov_state.preference() > current.rov_state.preference();
        }

        // 1. Higher local preference (customer > peer > provider).
        if new.local_pref != current.local_pref {
            return new.local_pref > current.local_pref;
        }

        // 2. Shorter AS path.
        if new.path_len() != current.path_len() {
            return new.path_len() < current.path_len();
        }

        // 3. Lower ASN of the neighbor the route was learned from.
        if new.neighbor_asn() != current.neighbor_asn() {
            return new.neighbor_asn() < current.neighbor_asn();
        }

        // 4. Keep the incumbent.
        false
    }

    /// All routes this AS may export towards neighbors of kind `to`, in ascending prefix
    /// order. Applies the valley-free export filter and the well-known communities.
    pub fn exportable_routes(&self, to: Relationship) -> Vec<Announcement> {
        self.rib
            .values()
            .filter(|ann| !ann.communities.contains(&NO_ADVERTISE))
            .filter(|ann| to == Relationship::Customer || !ann.communities.contains(&NO_EXPORT))
            .filter(|ann| policy::should_export(ann.relationship, to))
            .cloned()
            .collect()
    }
}
