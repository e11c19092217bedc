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

#![deny(missing_docs, missing_debug_implementations)]

//! # RovSim
//!
//! A simulator for inter-domain routing on the global Internet at Autonomous System
//! granularity. Given a provider/customer/peer topology, a set of prefix announcements, and
//! a set of ASes that enforce Route Origin Validation, it computes the post-convergence
//! routing table of every AS: the single best path each AS selects under standard BGP
//! decision logic and Gao-Rexford valley-free policy. The resulting tables are the raw
//! material for analyzing prefix hijacks and ROV deployment effectiveness.
//!
//! ## Main concepts
//!
//! The [`graph::AsGraph`] owns all [`as_node::AsNode`]s and the shared
//! [`rov::RovValidator`]. ASes exchange [`announcement::Announcement`]s, and each AS selects
//! routes with the local decision process described in [`as_node::AsNode`]. The
//! [`propagation`] module drives the whole graph to a fixed point with a three-phase,
//! rank-ordered sweep; see its documentation for why the phases are the policy itself.
//!
//! Everything is deterministic: all traversals that influence the outcome visit ASes in
//! ascending ASN order and prefixes in ascending order, and the final tie-break of the
//! decision process keeps the incumbent route. Two runs on the same inputs produce
//! identical routing tables.
//!
//! ## Example
//!
//! ```
//! use rovsim::prelude::*;
//!
//! fn main() -> Result<(), TopologyError> {
//!     let mut graph = AsGraph::new();
//!
//!     // AS1 provides transit to AS2, AS2 provides transit to AS3.
//!     graph.add_customer_provider(Asn(1), Asn(2));
//!     graph.add_customer_provider(Asn(2), Asn(3));
//!     graph.compute_propagation_ranks()?;
//!
//!     let prefix: Ipv4Prefix = "10.0.0.0/8".parse().unwrap();
//!     graph.originate_prefix(Asn(3), prefix);
//!     converge(&mut graph)?;
//!
//!     let route = graph.get(Asn(1)).unwrap().get_route(&prefix).unwrap();
//!     assert_eq!(route.as_path, vec![Asn(1), Asn(2), Asn(3)]);
//!     Ok(())
//! }
//! ```

pub mod announcement;
pub mod as_node;
pub mod graph;
pub mod io;
pub mod policy;
pub mod prelude;
pub mod propagation;
pub mod rov;
pub mod types;

#[cfg(test)]
mod test;
