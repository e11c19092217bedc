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

//! Parser for CAIDA serial-1 AS relationship files.
//!
//! The format is one relationship per line, pipe separated:
//!
//! ```text
//! # comment
//! <asn1>|<asn2>|-1     asn1 is a provider of asn2
//! <asn1>|<asn2>|0      asn1 and asn2 are peers
//! ```
//!
//! Newer serial-1 files append a source column (`|bgp` or `|mlp`); any fields after the
//! third are ignored.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::warn;

use crate::{graph::AsGraph, types::Asn};

/// Summary of one parsed relationship file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaidaSummary {
    /// Total number of lines read, including comments and blanks.
    pub lines: usize,
    /// Number of relationships wired into the graph.
    pub relationships: usize,
    /// Number of non-comment lines that could not be parsed.
    pub skipped: usize,
}

/// Read a CAIDA serial-1 relationships file and wire the graph accordingly.
pub fn load_relationships(path: impl AsRef<Path>, graph: &mut AsGraph) -> std::io::Result<CaidaSummary> {
    parse_relationships(BufReader::new(File::open(path)?), graph)
}

/// Parse CAIDA serial-1 relationship lines from a reader and wire the graph accordingly.
/// Malformed lines are logged with their line number and skipped.
pub fn parse_relationships<R: BufRead>(
    reader: R,
    graph: &mut AsGraph,
) -> std::io::Result<CaidaSummary> {
    let mut summary = CaidaSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        summary.lines += 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Some((asn1, asn2, rel)) => match rel {
                -1 => {
                    graph.add_customer_provider(asn1, asn2);
                    summary.relationships += 1;
                }
                0 => {
                    graph.add_peering(asn1, asn2);
                    summary.relationships += 1;
                }
                other => {
                    warn!("line {}: unknown relationship type {other}", idx + 1);
                    summary.skipped += 1;
                }
            },
            None => {
                warn!("line {}: malformed relationship entry: {line}", idx + 1);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn parse_line(line: &str) -> Option<(Asn, Asn, i32)> {
    let mut fields = line.split('|');
    let asn1 = fields.next()?.trim().parse::<u32>().ok()?;
    let asn2 = fields.next()?.trim().parse::<u32>().ok()?;
    let rel = fields.next()?.trim().parse::<i32>().ok()?;
    Some((Asn(asn1), Asn(asn2), rel))
}
