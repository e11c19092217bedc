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

//! The AS-level topology: an arena of AS nodes wired by provider, customer, and peer links.

use std::collections::BTreeMap;

use petgraph::{algo::toposort, graph::DiGraph, prelude::NodeIndex, Direction};

use crate::{
    as_node::AsNode,
    propagation::ConvergenceReport,
    rov::RovValidator,
    types::{Asn, Ipv4Prefix, Relationship, TopologyError},
};

/// The AS graph owns every [`AsNode`] and the shared [`RovValidator`].
///
/// Nodes are kept in a map ordered by ASN, and neighbor links are stored as ASNs rather than
/// references. This breaks the ownership cycles a neighbor pointer graph would create, and it
/// makes every whole-graph traversal deterministic: iterating the arena visits ASes in
/// strictly ascending ASN order.
///
/// The provider-customer relation must form a DAG. [`AsGraph::compute_propagation_ranks`]
/// verifies this and groups the ASes into rank buckets, which the propagation engine sweeps
/// in order. Any topology change invalidates the ranks, and they must be recomputed before
/// the next simulation run.
#[derive(Debug, Clone, Default)]
pub struct AsGraph {
    ases: BTreeMap<Asn, AsNode>,
    validator: RovValidator,
    ranks: Vec<Vec<Asn>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DfsState {
    InStack,
    Done,
}

impl AsGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of ASes in the graph.
    pub fn len(&self) -> usize {
        self.ases.len()
    }

    /// Check whether the graph contains no ASes.
    pub fn is_empty(&self) -> bool {
        self.ases.is_empty()
    }

    /// Look up an AS by its number.
    pub fn get(&self, asn: Asn) -> Option<&AsNode> {
        self.ases.get(&asn)
    }

    /// Iterate over all ASes in ascending ASN order.
    pub fn ases(&self) -> impl Iterator<Item = &AsNode> {
        self.ases.values()
    }

    /// The shared ROA store used to validate announcements.
    pub fn validator(&self) -> &RovValidator {
        &self.validator
    }

    /// Mutable access to the ROA store, for installing ROAs before a simulation run.
    pub fn validator_mut(&mut self) -> &mut RovValidator {
        &mut self.validator
    }

    /// Get the AS with the given number, creating it (without any neighbors) if it does not
    /// exist yet.
    pub fn get_or_create(&mut self, asn: Asn) -> &mut AsNode {
        self.ases.entry(asn).or_insert_with(|| {
            self.ranks.clear();
            AsNode::new(asn)
        })
    }

    /// Wire a provider-customer link. Both ASes are created if necessary, and both directions
    /// of the link are recorded. Adding the same link twice is a no-op.
    pub fn add_customer_provider(&mut self, provider: Asn, customer: Asn) {
        self.get_or_create(provider).add_customer(customer);
        self.get_or_create(customer).add_provider(provider);
        self.ranks.clear();
    }

    /// Wire a symmetric peering link between two ASes, creating them if necessary.
    pub fn add_peering(&mut self, a: Asn, b: Asn) {
        self.get_or_create(a).add_peer(b);
        self.get_or_create(b).add_peer(a);
        self.ranks.clear();
    }

    /// Enable or disable ROV enforcement (dropping invalid routes) on the given AS. Returns
    /// `false` if the AS is not part of the graph.
    pub fn set_drop_invalid(&mut self, asn: Asn, drop_invalid: bool) -> bool {
        match self.ases.get_mut(&asn) {
            Some(node) => {
                node.set_drop_invalid(drop_invalid);
                true
            }
            None => false,
        }
    }

    /// Originate a prefix at the given AS, validating it against the graph's ROA store.
    /// Returns `false` if the AS is not part of the graph.
    pub fn originate_prefix(&mut self, asn: Asn, prefix: Ipv4Prefix) -> bool {
        let validator = &self.validator;
        match self.ases.get_mut(&asn) {
            Some(node) => {
                node.originate_prefix(prefix, Some(validator));
                true
            }
            None => false,
        }
    }

    /// Check whether the provider-customer hierarchy contains a cycle.
    pub fn has_cycle(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Find a provider-customer cycle, if one exists, for diagnostics. The returned path
    /// walks customer to provider and repeats the first AS at the end.
    ///
    /// The search is a depth-first walk along provider links where every AS is unvisited, on
    /// the active stack, or done. Reaching an AS that is still on the stack closes a cycle.
    pub fn find_cycle(&self) -> Option<Vec<Asn>> {
        let mut state: BTreeMap<Asn, DfsState> = BTreeMap::new();

        for &start in self.ases.keys() {
            if state.contains_key(&start) {
                continue;
            }
            let mut path = vec![start];
            let mut stack: Vec<(Asn, usize)> = vec![(start, 0)];
            state.insert(start, DfsState::InStack);

            while let Some(&(asn, next_idx)) = stack.last() {
                let providers = self.ases[&asn].providers();
                if let Some(&provider) = providers.get(next_idx) {
                    stack.last_mut().unwrap().1 += 1;
                    match state.get(&provider).copied() {
                        Some(DfsState::InStack) => {
                            let pos = path.iter().position(|&p| p == provider).unwrap();
                            let mut cycle = path[pos..].to_vec();
                            cycle.push(provider);
                            return Some(cycle);
                        }
                        Some(DfsState::Done) => {}
                        None => {
                            state.insert(provider, DfsState::InStack);
                            path.push(provider);
                            stack.push((provider, 0));
                        }
                    }
                } else {
                    state.insert(asn, DfsState::Done);
                    path.pop();
                    stack.pop();
                }
            }
        }

        None
    }

    /// Compute the propagation ranks and group the ASes into rank buckets.
    ///
    /// The rank of an AS is the length of the longest customer chain below it: ASes without
    /// customers sit at rank 0 and Tier-1 providers end up on top. Every provider is thus at
    /// a strictly higher rank than each of its customers, which is the property the
    /// rank-ordered propagation sweeps rely on.
    ///
    /// Fails with [`TopologyError::CycleDetected`] if the provider-customer relation is not
    /// acyclic.
    pub fn compute_propagation_ranks(&mut self) -> Result<(), TopologyError> {
        let mut dag: DiGraph<Asn, ()> = DiGraph::new();
        let mut index: BTreeMap<Asn, NodeIndex> = BTreeMap::new();
        for &asn in self.ases.keys() {
            index.insert(asn, dag.add_node(asn));
        }
        for (asn, node) in &self.ases {
            for provider in node.providers() {
                dag.add_edge(index[asn], index[provider], ());
            }
        }

        let order = toposort(&dag, None)
            .map_err(|_| TopologyError::CycleDetected(self.find_cycle().unwrap_or_default()))?;

        // Customers come before their providers in topological order, so a single pass
        // suffices to relax rank(provider) >= rank(customer) + 1.
        let mut rank_of: BTreeMap<Asn, usize> = BTreeMap::new();
        let mut max_rank = 0;
        for ni in order {
            let rank = dag
                .neighbors_directed(ni, Direction::Incoming)
                .map(|customer| rank_of[&dag[customer]] + 1)
                .max()
                .unwrap_or(0);
            max_rank = max_rank.max(rank);
            rank_of.insert(dag[ni], rank);
        }

        self.ranks = vec![Vec::new(); if self.ases.is_empty() { 0 } else { max_rank + 1 }];
        for (&asn, &rank) in &rank_of {
            self.ases.get_mut(&asn).unwrap().set_rank(rank);
            self.ranks[rank].push(asn);
        }

        Ok(())
    }

    /// The rank buckets from the last [`AsGraph::compute_propagation_ranks`] call. Bucket `i`
    /// holds all ASes of rank `i` in ascending ASN order. Empty if ranks were never computed
    /// or are stale.
    pub fn ranks(&self) -> &[Vec<Asn>] {
        &self.ranks
    }

    /// Export all eligible routes of the given AS to its providers.
    pub fn propagate_to_providers(&mut self, asn: Asn) {
        self.propagate(asn, Relationship::Provider);
    }

    /// Export all eligible routes of the given AS to its peers.
    pub fn propagate_to_peers(&mut self, asn: Asn) {
        self.propagate(asn, Relationship::Peer);
    }

    /// Export all eligible routes of the given AS to its customers.
    pub fn propagate_to_customers(&mut self, asn: Asn) {
        self.propagate(asn, Relationship::Customer);
    }

    fn propagate(&mut self, from: Asn, to: Relationship) {
        let node = match self.ases.get(&from) {
            Some(node) => node,
            None => return,
        };
        let targets = match to {
            Relationship::Provider => node.providers().to_vec(),
            Relationship::Peer => node.peers().to_vec(),
            Relationship::Customer => node.customers().to_vec(),
            Relationship::Origin => return,
        };
        if targets.is_empty() {
            return;
        }
        for ann in node.exportable_routes(to) {
            for &target in &targets {
                if let Some(neighbor) = self.ases.get_mut(&target) {
                    neighbor.receive(ann.clone(), from);
                }
            }
        }
    }

    /// Drain the incoming queue of the given AS, validating against the graph's ROA store.
    /// Returns whether the routing table of the AS changed.
    pub fn process_incoming_queue(&mut self, asn: Asn, report: &mut ConvergenceReport) -> bool {
        let validator = &self.validator;
        match self.ases.get_mut(&asn) {
            Some(node) => node.process_incoming_queue(Some(validator), report),
            None => false,
        }
    }
}
