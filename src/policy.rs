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

//! Gao-Rexford routing policy: relationship-derived local preference and the valley-free
//! export filter.
//!
//! The two tables in this module jointly guarantee valley-free paths. Local preference makes
//! every AS prefer customer routes over peer routes over provider routes, and the export
//! filter only ever exports customer-learned (or self-originated) routes upwards or sideways.
//! A path can therefore climb through providers at most until one peak, cross at most one
//! peer edge, and then only descend through customers.

use crate::types::Relationship;

/// Local preference assigned to a route learned under the given relationship. Higher is
/// preferred. Own routes beat customer routes beat peer routes beat provider routes.
pub fn local_pref(learned_from: Relationship) -> u32 {
    match learned_from {
        Relationship::Origin => 400,
        Relationship::Customer => 300,
        Relationship::Peer => 200,
        Relationship::Provider => 100,
    }
}

/// The valley-free export filter: may a route learned under `learned_from` be exported to a
/// neighbor of kind `export_to`?
///
/// Self-originated routes are exported everywhere, and every route is exported to customers.
/// Customer-learned routes are additionally exported to peers and providers, which is what
/// makes the customer pay off. Peer-learned and provider-learned routes are never exported to
/// peers or providers, as that would grant free transit.
pub fn should_export(learned_from: Relationship, export_to: Relationship) -> bool {
    match (learned_from, export_to) {
        (Relationship::Origin, _) => true,
        (_, Relationship::Customer) => true,
        (Relationship::Customer, _) => true,
        (Relationship::Peer | Relationship::Provider, Relationship::Peer) => false,
        (Relationship::Peer | Relationship::Provider, Relationship::Provider) => false,
        // routes are exported to neighbors, never "to an origin"
        (_, Relationship::Origin) => false,
    }
}
