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

//! Routing-table emission as CSV.
//!
//! The output has one row per (AS, prefix) pair, ordered by ASN and then by prefix:
//!
//! ```text
//! asn,prefix,as_path
//! 1,10.0.0.0/8,"(1, 2, 3)"
//! 3,10.0.0.0/8,"(3,)"
//! ```

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::Itertools;

use crate::{as_node::AsNode, graph::AsGraph, types::Asn};

/// Render an AS path as a parenthesized list, most recent hop first. A single-element path
/// keeps a trailing comma so it stays recognizable as a list.
pub fn fmt_as_path(path: &[Asn]) -> String {
    match path {
        [single] => format!("({single},)"),
        _ => format!("({})", path.iter().join(", ")),
    }
}

/// Write the routing tables of every AS in the graph as CSV.
pub fn write_routing_tables<W: Write>(graph: &AsGraph, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "asn,prefix,as_path")?;
    for node in graph.ases() {
        write_rib_rows(node, writer)?;
    }
    Ok(())
}

/// Write the routing table of a single AS as CSV, with the same header and row format as
/// [`write_routing_tables`].
pub fn write_as_routing_table<W: Write>(node: &AsNode, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "asn,prefix,as_path")?;
    write_rib_rows(node, writer)
}

/// Write the routing tables of every AS in the graph to the given file path.
pub fn write_routing_tables_to_path(graph: &AsGraph, path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_routing_tables(graph, &mut writer)?;
    writer.flush()
}

/// Render the routing tables of every AS in the graph as a CSV string.
pub fn routing_tables_csv(graph: &AsGraph) -> String {
    let mut buf = Vec::new();
    // writing to a Vec<u8> cannot fail
    write_routing_tables(graph, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn write_rib_rows<W: Write>(node: &AsNode, writer: &mut W) -> std::io::Result<()> {
    for (prefix, ann) in node.rib() {
        writeln!(
            writer,
            "{},{},\"{}\"",
            node.asn(),
            prefix,
            fmt_as_path(&ann.as_path)
        )?;
    }
    Ok(())
}

/// The total number of installed routes across all ASes in the graph.
pub fn total_routes(graph: &AsGraph) -> usize {
    graph.ases().map(|node| node.rib().len()).sum()
}
