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

//! The convergence engine: rank-ordered, three-phase propagation to a fixed point.
//!
//! One round consists of three direction-scoped sweeps over the rank buckets:
//!
//! 1. **Up**: ascending by rank, every AS drains its queue and then exports towards its
//!    providers. Providers sit at strictly higher ranks, so announcements climb the
//!    hierarchy within a single sweep.
//! 2. **Flat**: every AS exports towards its peers, then every AS drains its queue.
//! 3. **Down**: descending by rank, every AS drains its queue and then exports towards its
//!    customers, so announcements descend the hierarchy within a single sweep.
//!
//! Rounds repeat until one of them leaves every routing table untouched. Exchanges are
//! batched through the per-AS incoming queues and drained only at the next sweep point, so
//! within a sweep no AS observes a routing-table change of a neighbor made in that same
//! sweep. Together with the ASN-ordered traversal of rank buckets and neighbor lists, this
//! makes the fixed point a pure function of the inputs.
//!
//! Splitting the round by export direction is not an optimization but the policy itself:
//! provider-learned and peer-learned routes are structurally unable to flow back up or
//! sideways, because the up and flat sweeps only ever carry exports that the valley-free
//! filter admits in that direction.

use std::fmt;

use log::debug;

use crate::{graph::AsGraph, types::TopologyError};

/// Counters describing one convergence run.
///
/// Dropped announcements are not errors: refusing a route from an unknown sender, a looped
/// path, or an invalid origin is the intended behavior, and the counters merely make those
/// decisions observable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvergenceReport {
    /// Number of full three-phase rounds, including the final round that made no change.
    pub rounds: usize,
    /// Number of routing-table installs and replacements across all ASes.
    pub rib_updates: usize,
    /// Announcements dropped because the sender was not a neighbor of the receiver.
    pub dropped_non_neighbor: usize,
    /// Announcements dropped by loop prevention (own ASN already in the path).
    pub dropped_path_loop: usize,
    /// Announcements dropped by enforcing ASes because their origin failed validation.
    pub dropped_invalid: usize,
}

impl fmt::Display for ConvergenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "converged after {} rounds ({} updates, dropped: {} non-neighbor, {} loop, {} invalid)",
            self.rounds,
            self.rib_updates,
            self.dropped_non_neighbor,
            self.dropped_path_loop,
            self.dropped_invalid
        )
    }
}

/// Run the three-phase propagation until a whole round changes no routing table.
///
/// The graph must have up-to-date propagation ranks; call
/// [`AsGraph::compute_propagation_ranks`] after the last topology change. This also
/// guarantees the provider-customer hierarchy is acyclic, the one topology on which the
/// sweep order is meaningful.
///
/// The engine never fails on announcement-level problems. Unknown senders, looped paths,
/// and invalid origins are dropped and counted in the returned report.
pub fn converge(graph: &mut AsGraph) -> Result<ConvergenceReport, TopologyError> {
    if graph.ranks().is_empty() && !graph.is_empty() {
        return Err(TopologyError::RanksNotComputed);
    }

    let ranks = graph.ranks().to_vec();
    let num_ranks = ranks.len();
    let mut report = ConvergenceReport::default();

    loop {
        report.rounds += 1;
        let mut changed = false;

        // Phase 1: climb from the stubs towards the Tier-1s.
        for (i, rank) in ranks.iter().enumerate() {
            if i > 0 {
                for &asn in rank {
                    changed |= graph.process_incoming_queue(asn, &mut report);
                }
            }
            for &asn in rank {
                graph.propagate_to_providers(asn);
            }
        }

        // Phase 2: exchange across peering edges, then drain everywhere.
        for rank in &ranks {
            for &asn in rank {
                graph.propagate_to_peers(asn);
            }
        }
        for rank in &ranks {
            for &asn in rank {
                changed |= graph.process_incoming_queue(asn, &mut report);
            }
        }

        // Phase 3: descend from the Tier-1s towards the stubs.
        for (i, rank) in ranks.iter().enumerate().rev() {
            if i + 1 < num_ranks {
                for &asn in rank {
                    changed |= graph.process_incoming_queue(asn, &mut report);
                }
            }
            for &asn in rank {
                graph.propagate_to_customers(asn);
            }
        }

        debug!(
            "round {}: {}",
            report.rounds,
            if changed { "routing tables changed" } else { "stable" }
        );

        if !changed {
            break;
        }
    }

    Ok(report)
}
