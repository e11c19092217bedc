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

//! Test CIDR arithmetic on `Ipv4Prefix`.

use pretty_assertions::assert_eq;

use super::p;
use crate::types::Ipv4Prefix;

#[test]
fn parsing_canonicalizes() {
    assert_eq!(p("10.1.2.3/8"), p("10.0.0.0/8"));
    assert_eq!(p("10.1.2.3/8").to_string(), "10.0.0.0/8");
    assert_eq!(p("192.168.1.255/24").to_string(), "192.168.1.0/24");
    assert_eq!(p("1.2.3.4/32").to_string(), "1.2.3.4/32");
}

#[test]
fn malformed_input_is_an_error() {
    assert!("10.0.0.0".parse::<Ipv4Prefix>().is_err());
    assert!("10.0.0.0/33".parse::<Ipv4Prefix>().is_err());
    assert!("300.0.0.0/8".parse::<Ipv4Prefix>().is_err());
    assert!("not a prefix".parse::<Ipv4Prefix>().is_err());
    assert!("10.0.0/8".parse::<Ipv4Prefix>().is_err());
}

#[test]
fn numeric_conversions() {
    let prefix = p("192.168.1.0/24");
    assert_eq!(prefix.as_num(), 0xc0a8_0100);
    assert_eq!(Ipv4Prefix::from_num(0xc0a8_0100, 24).unwrap(), prefix);
    // host bits are masked away
    assert_eq!(Ipv4Prefix::from_num(0xc0a8_01ff, 24).unwrap(), prefix);
}

#[test]
fn covers_follows_specificity() {
    assert!(p("10.0.0.0/8").covers(&p("10.1.0.0/16")));
    assert!(p("10.0.0.0/8").covers(&p("10.0.0.0/8")));
    assert!(!p("10.1.0.0/16").covers(&p("10.0.0.0/8")));
    assert!(!p("10.0.0.0/8").covers(&p("11.0.0.0/16")));
    assert!(p("0.0.0.0/0").covers(&p("203.0.113.0/24")));
}

#[test]
fn supernets() {
    assert_eq!(p("10.2.3.0/24").supernet_at(8), Some(p("10.0.0.0/8")));
    assert_eq!(p("10.2.3.0/24").supernet_at(24), Some(p("10.2.3.0/24")));
    assert_eq!(p("10.2.3.0/24").supernet_at(0), Some(p("0.0.0.0/0")));
    assert_eq!(p("10.2.3.0/24").supernet_at(25), None);
}

#[test]
fn ordering_is_by_address_then_length() {
    let mut prefixes = vec![p("10.0.0.0/24"), p("8.8.8.0/25"), p("8.8.8.0/24"), p("9.0.0.0/8")];
    prefixes.sort();
    assert_eq!(
        prefixes,
        vec![p("8.8.8.0/24"), p("8.8.8.0/25"), p("9.0.0.0/8"), p("10.0.0.0/24")]
    );
}
