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

//! Test input parsing and routing-table emission.

use pretty_assertions::assert_eq;

use super::p;
use crate::graph::AsGraph;
use crate::io::caida::parse_relationships;
use crate::io::output::{fmt_as_path, routing_tables_csv, write_as_routing_table};
use crate::io::seed::{parse_announcements, parse_rov_asns, seed_graph, SeedAnnouncement};
use crate::propagation::converge;
use crate::types::{Asn, RovState};

#[test]
fn caida_files_tolerate_comments_and_garbage() {
    let input = "\
# serial-1 style file
1|2|-1
2|3|0
garbage
4|5|-1|bgp
6|7|9
";
    let mut graph = AsGraph::new();
    let summary = parse_relationships(input.as_bytes(), &mut graph).unwrap();

    assert_eq!(summary.lines, 6);
    assert_eq!(summary.relationships, 3);
    assert_eq!(summary.skipped, 2);

    assert_eq!(graph.get(Asn(2)).unwrap().providers(), &[Asn(1)]);
    assert_eq!(graph.get(Asn(2)).unwrap().peers(), &[Asn(3)]);
    // the source tag of newer serial-1 files is ignored
    assert_eq!(graph.get(Asn(5)).unwrap().providers(), &[Asn(4)]);
    // the AS with the unknown relationship type was never created
    assert!(graph.get(Asn(6)).is_none());
}

#[test]
fn announcement_rows_parse_with_header_and_bool_variants() {
    let input = "\
asn,prefix,rov_invalid
1,10.0.0.0/8,false
2,20.0.0.0/8,TRUE
3,203.0.113.0/24,1
4,8.8.8.0/24,yes
oops,not,a row
5,30.0.0.0/8,no
";
    let anns = parse_announcements(input.as_bytes()).unwrap();
    assert_eq!(anns.len(), 5);
    assert_eq!(
        anns[0],
        SeedAnnouncement {
            asn: Asn(1),
            prefix: p("10.0.0.0/8"),
            rov_invalid: false
        }
    );
    assert!(anns[1].rov_invalid);
    assert!(anns[2].rov_invalid);
    assert!(anns[3].rov_invalid);
    assert!(!anns[4].rov_invalid);
}

#[test]
fn headerless_announcement_files_are_accepted() {
    let input = "1,10.0.0.0/8,false\n2,20.0.0.0/8,true\n";
    let anns = parse_announcements(input.as_bytes()).unwrap();
    assert_eq!(anns.len(), 2);
    assert_eq!(anns[0].asn, Asn(1));
}

#[test]
fn rov_asn_lists_tolerate_a_header() {
    let input = "asn\n64512\nbogus\n64513\n";
    assert_eq!(parse_rov_asns(input.as_bytes()).unwrap(), vec![Asn(64512), Asn(64513)]);
}

#[test]
fn seeding_installs_roas_then_originates() {
    let mut graph = AsGraph::new();
    graph.add_customer_provider(Asn(1), Asn(2));

    let announcements = vec![
        SeedAnnouncement {
            asn: Asn(1),
            prefix: p("10.0.0.0/8"),
            rov_invalid: false,
        },
        SeedAnnouncement {
            asn: Asn(99),
            prefix: p("20.0.0.0/8"),
            rov_invalid: false,
        },
        SeedAnnouncement {
            asn: Asn(2),
            prefix: p("30.0.0.0/8"),
            rov_invalid: true,
        },
    ];
    let summary = seed_graph(&mut graph, &announcements);

    assert_eq!(summary.roas, 2);
    assert_eq!(summary.seeded, 2);
    assert_eq!(summary.skipped, 1);

    // the authorized origin sees its own route as valid
    let at_1 = graph.get(Asn(1)).unwrap().get_route(&p("10.0.0.0/8")).unwrap();
    assert_eq!(at_1.rov_state, RovState::Valid);
    // the unauthorized row gets no ROA, so its route stays unknown
    let at_2 = graph.get(Asn(2)).unwrap().get_route(&p("30.0.0.0/8")).unwrap();
    assert_eq!(at_2.rov_state, RovState::Unknown);
}

#[test]
fn as_paths_render_with_the_single_element_comma() {
    assert_eq!(fmt_as_path(&[Asn(3)]), "(3,)");
    assert_eq!(fmt_as_path(&[Asn(1), Asn(2), Asn(3)]), "(1, 2, 3)");
}

#[test]
fn routing_tables_render_sorted_by_asn_and_prefix() {
    let mut graph = AsGraph::new();
    graph.add_customer_provider(Asn(2), Asn(1));
    graph.add_customer_provider(Asn(3), Asn(2));
    graph.compute_propagation_ranks().unwrap();
    graph.originate_prefix(Asn(3), p("10.0.0.0/8"));
    converge(&mut graph).unwrap();

    assert_eq!(
        routing_tables_csv(&graph),
        "asn,prefix,as_path\n\
         1,10.0.0.0/8,\"(1, 2, 3)\"\n\
         2,10.0.0.0/8,\"(2, 3)\"\n\
         3,10.0.0.0/8,\"(3,)\"\n"
    );
}

#[test]
fn single_as_tables_use_the_same_format() {
    let mut graph = AsGraph::new();
    graph.get_or_create(Asn(7)).originate_prefix(p("10.0.0.0/8"), None);
    graph.get_or_create(Asn(7)).originate_prefix(p("9.0.0.0/8"), None);

    let mut buf = Vec::new();
    write_as_routing_table(graph.get(Asn(7)).unwrap(), &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "asn,prefix,as_path\n\
         7,9.0.0.0/8,\"(7,)\"\n\
         7,10.0.0.0/8,\"(7,)\"\n"
    );
}
