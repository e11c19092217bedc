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

//! Seed inputs: the announcements to originate and the set of ROV-enforcing ASes.
//!
//! Announcements come as CSV lines `asn,prefix,rov_invalid`. A `rov_invalid` of `false`
//! means the origin is legitimate, and a matching ROA is installed; `true` marks a
//! hijack-style announcement that is originated without authorization. The ROV-ASN file
//! lists one ASN per line. Both files tolerate a header line.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::warn;

use crate::{
    graph::AsGraph,
    rov::Roa,
    types::{Asn, Ipv4Prefix},
};

/// One row of the announcements file: originate `prefix` at `asn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAnnouncement {
    /// The AS that originates the prefix.
    pub asn: Asn,
    /// The prefix to originate.
    pub prefix: Ipv4Prefix,
    /// Whether the origin lacks authorization (no ROA is installed for it).
    pub rov_invalid: bool,
}

/// Summary of seeding a graph with announcements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Number of ROAs installed.
    pub roas: usize,
    /// Number of prefixes originated.
    pub seeded: usize,
    /// Number of rows referring to an ASN that is not part of the graph.
    pub skipped: usize,
}

/// Read the announcements CSV from a file.
pub fn load_announcements(path: impl AsRef<Path>) -> std::io::Result<Vec<SeedAnnouncement>> {
    parse_announcements(BufReader::new(File::open(path)?))
}

/// Parse announcement rows `asn,prefix,rov_invalid` from a reader.
///
/// A first line containing `asn` or `prefix` (case-insensitive) is treated as a header and
/// skipped. Malformed rows are logged with their line number and skipped.
pub fn parse_announcements<R: BufRead>(reader: R) -> std::io::Result<Vec<SeedAnnouncement>> {
    let mut announcements = Vec::new();
    let mut first_line = true;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if first_line {
            first_line = false;
            let lower = line.to_ascii_lowercase();
            if lower.contains("asn") || lower.contains("prefix") {
                continue;
            }
        }

        let mut fields = line.split(',');
        let parsed = (|| {
            let asn = fields.next()?.trim().parse::<u32>().ok()?;
            let prefix = fields.next()?.trim().parse::<Ipv4Prefix>().ok()?;
            let rov_invalid = parse_bool(fields.next()?);
            Some(SeedAnnouncement {
                asn: Asn(asn),
                prefix,
                rov_invalid,
            })
        })();

        match parsed {
            Some(ann) => announcements.push(ann),
            None => warn!("line {}: malformed announcement row: {line}", idx + 1),
        }
    }

    Ok(announcements)
}

/// Read the list of ROV-enforcing ASNs from a file.
pub fn load_rov_asns(path: impl AsRef<Path>) -> std::io::Result<Vec<Asn>> {
    parse_rov_asns(BufReader::new(File::open(path)?))
}

/// Parse one ASN per line. A first line containing `asn` (case-insensitive) is treated as a
/// header and skipped. Malformed lines are logged and skipped.
pub fn parse_rov_asns<R: BufRead>(reader: R) -> std::io::Result<Vec<Asn>> {
    let mut asns = Vec::new();
    let mut first_line = true;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if first_line {
            first_line = false;
            if line.to_ascii_lowercase().contains("asn") {
                continue;
            }
        }

        match line.parse::<u32>() {
            Ok(asn) => asns.push(Asn(asn)),
            Err(_) => warn!("line {}: malformed ASN: {line}", idx + 1),
        }
    }

    Ok(asns)
}

/// Seed the graph: install a ROA for every authorized row, then originate every row whose
/// ASN exists in the graph.
///
/// ROAs are installed first, across all rows, so that the originators themselves see the
/// correct validation outcome for their own routes. The ROA of an authorized row covers
/// exactly the announced prefix (`max_length` equal to the prefix length). Every row is then
/// originated, including unauthorized ones; enforcing ASes filter those during propagation,
/// while the hijacker itself always keeps its own route.
pub fn seed_graph(graph: &mut AsGraph, announcements: &[SeedAnnouncement]) -> SeedSummary {
    let mut summary = SeedSummary::default();

    for ann in announcements {
        if !ann.rov_invalid {
            let max_length = ann.prefix.prefix_len();
            graph
                .validator_mut()
                .add_roa(Roa::new(ann.prefix, ann.asn, max_length));
            summary.roas += 1;
        }
    }

    for ann in announcements {
        if graph.originate_prefix(ann.asn, ann.prefix) {
            summary.seeded += 1;
        } else {
            summary.skipped += 1;
        }
    }

    summary
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}
