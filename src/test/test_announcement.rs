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

//! Test the announcement value type.

use pretty_assertions::assert_eq;

use super::p;
use crate::announcement::Announcement;
use crate::types::{Asn, Relationship, RovState};

#[test]
fn originated_announcements_carry_the_origin_alone() {
    let ann = Announcement::originate(Asn(65000), p("10.0.0.0/8"));
    assert_eq!(ann.origin, Asn(65000));
    assert_eq!(ann.as_path, vec![Asn(65000)]);
    assert_eq!(ann.relationship, Relationship::Origin);
    assert_eq!(ann.local_pref, 400);
    assert_eq!(ann.rov_state, RovState::Unknown);
    assert!(ann.communities.is_empty());
}

#[test]
fn prepending_copies_and_keeps_the_original() {
    let ann = Announcement::originate(Asn(3), p("10.0.0.0/8"));
    let hopped = ann.prepend_hop(Asn(2));

    assert_eq!(hopped.as_path, vec![Asn(2), Asn(3)]);
    assert_eq!(hopped.origin, Asn(3));
    assert_eq!(ann.as_path, vec![Asn(3)]);

    let hopped = hopped.prepend_hop(Asn(1));
    assert_eq!(hopped.as_path, vec![Asn(1), Asn(2), Asn(3)]);
}

#[test]
fn path_membership() {
    let ann = Announcement::originate(Asn(3), p("10.0.0.0/8")).prepend_hop(Asn(2));
    assert!(ann.has_asn(Asn(2)));
    assert!(ann.has_asn(Asn(3)));
    assert!(!ann.has_asn(Asn(1)));
}

#[test]
fn neighbor_asn_reads_the_second_path_element() {
    let ann = Announcement::originate(Asn(3), p("10.0.0.0/8"));
    // a self-originated route was "learned" from the origin itself
    assert_eq!(ann.neighbor_asn(), Asn(3));

    let ann = ann.prepend_hop(Asn(2));
    assert_eq!(ann.neighbor_asn(), Asn(3));

    let ann = ann.prepend_hop(Asn(1));
    assert_eq!(ann.neighbor_asn(), Asn(2));
}

#[test]
fn relationship_rewrites_local_pref() {
    let mut ann = Announcement::originate(Asn(3), p("10.0.0.0/8"));
    ann.set_relationship(Relationship::Customer);
    assert_eq!(ann.local_pref, 300);
    ann.set_relationship(Relationship::Peer);
    assert_eq!(ann.local_pref, 200);
    ann.set_relationship(Relationship::Provider);
    assert_eq!(ann.local_pref, 100);
}
