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

//! Convenience re-exports of the types needed for most simulations.

pub use crate::announcement::Announcement;
pub use crate::as_node::AsNode;
pub use crate::graph::AsGraph;
pub use crate::propagation::{converge, ConvergenceReport};
pub use crate::rov::{Roa, RovValidator};
pub use crate::types::{Asn, Ipv4Prefix, Relationship, RovState, TopologyError};
