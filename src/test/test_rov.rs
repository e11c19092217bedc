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

//! Test Route Origin Validation.

use pretty_assertions::assert_eq;

use super::p;
use crate::rov::{Roa, RovValidator};
use crate::types::{Asn, RovState};

#[test]
fn no_covering_roa_is_unknown() {
    let mut validator = RovValidator::new();
    assert_eq!(validator.validate(&p("10.0.0.0/8"), Asn(1)), RovState::Unknown);

    validator.add_roa(Roa::new(p("192.168.0.0/16"), Asn(1), 16));
    assert_eq!(validator.validate(&p("10.0.0.0/8"), Asn(1)), RovState::Unknown);
}

#[test]
fn exact_match_checks_origin_and_length() {
    let mut validator = RovValidator::new();
    validator.add_roa(Roa::new(p("203.0.113.0/24"), Asn(3), 24));

    assert_eq!(validator.validate(&p("203.0.113.0/24"), Asn(3)), RovState::Valid);
    assert_eq!(validator.validate(&p("203.0.113.0/24"), Asn(4)), RovState::Invalid);
}

#[test]
fn covering_roa_authorizes_up_to_max_length() {
    let mut validator = RovValidator::new();
    validator.add_roa(Roa::new(p("10.0.0.0/8"), Asn(1), 16));

    assert_eq!(validator.validate(&p("10.0.0.0/8"), Asn(1)), RovState::Valid);
    assert_eq!(validator.validate(&p("10.1.0.0/16"), Asn(1)), RovState::Valid);
    // more specific than max_length
    assert_eq!(validator.validate(&p("10.1.1.0/24"), Asn(1)), RovState::Invalid);
    // wrong origin under a covering ROA
    assert_eq!(validator.validate(&p("10.1.0.0/16"), Asn(2)), RovState::Invalid);
}

#[test]
fn exact_entry_takes_precedence_over_covering_entries() {
    let mut validator = RovValidator::new();
    validator.add_roa(Roa::new(p("10.0.0.0/8"), Asn(1), 24));
    validator.add_roa(Roa::new(p("10.0.0.0/16"), Asn(2), 16));

    // the /8 entry would authorize AS1 at /16, but the exact /16 entry decides
    assert_eq!(validator.validate(&p("10.0.0.0/16"), Asn(1)), RovState::Invalid);
    assert_eq!(validator.validate(&p("10.0.0.0/16"), Asn(2)), RovState::Valid);
    // prefixes without an exact entry still fall back to the /8
    assert_eq!(validator.validate(&p("10.1.0.0/16"), Asn(1)), RovState::Valid);
}

#[test]
fn multiple_roas_at_the_same_prefix() {
    let mut validator = RovValidator::new();
    validator.add_roa(Roa::new(p("10.0.0.0/8"), Asn(1), 8));
    validator.add_roa(Roa::new(p("10.0.0.0/8"), Asn(2), 8));

    assert_eq!(validator.validate(&p("10.0.0.0/8"), Asn(1)), RovState::Valid);
    assert_eq!(validator.validate(&p("10.0.0.0/8"), Asn(2)), RovState::Valid);
    assert_eq!(validator.validate(&p("10.0.0.0/8"), Asn(3)), RovState::Invalid);
    assert_eq!(validator.len(), 2);
}

#[test]
fn max_length_is_raised_to_the_prefix_length() {
    let roa = Roa::new(p("10.0.0.0/24"), Asn(1), 8);
    assert_eq!(roa.max_length, 24);
}
