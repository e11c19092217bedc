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

//! Command-line frontend: load a topology and seed announcements, run the simulation to
//! convergence, and write the per-AS routing tables as CSV.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::{error, info};

use rovsim::{
    io::{caida, output, seed},
    prelude::*,
};

/// Simulate AS-level inter-domain routing under Gao-Rexford policy and Route Origin
/// Validation, and write the resulting per-AS routing tables.
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    /// CAIDA serial-1 AS relationships file.
    #[clap(long)]
    relationships: PathBuf,
    /// Announcements CSV file with rows `asn,prefix,rov_invalid`.
    #[clap(long)]
    announcements: PathBuf,
    /// File listing one ROV-enforcing ASN per line.
    #[clap(long)]
    rov_asns: Option<PathBuf>,
    /// Destination for the routing-table CSV.
    #[clap(long, default_value = "ribs.csv")]
    output: PathBuf,
}

fn main() -> ExitCode {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();

    run(Cli::parse())
}

fn run(args: Cli) -> ExitCode {
    // build the topology
    let mut graph = AsGraph::new();
    let topo = match caida::load_relationships(&args.relationships, &mut graph) {
        Ok(summary) => summary,
        Err(e) => {
            error!("cannot read {}: {e}", args.relationships.display());
            return ExitCode::from(1);
        }
    };
    info!(
        "loaded {} ASes from {} relationships ({} skipped)",
        graph.len(),
        topo.relationships,
        topo.skipped
    );

    match graph.compute_propagation_ranks() {
        Ok(()) => info!("computed {} propagation ranks", graph.ranks().len()),
        Err(e @ TopologyError::CycleDetected(_)) => {
            error!("{e}");
            return ExitCode::from(2);
        }
        Err(e) => {
            error!("{e}");
            return ExitCode::from(1);
        }
    }

    // flag the ROV-enforcing ASes
    if let Some(path) = &args.rov_asns {
        let asns = match seed::load_rov_asns(path) {
            Ok(asns) => asns,
            Err(e) => {
                error!("cannot read {}: {e}", path.display());
                return ExitCode::from(1);
            }
        };
        let enabled = asns
            .iter()
            .filter(|&&asn| graph.set_drop_invalid(asn, true))
            .count();
        info!("enabled ROV enforcement on {enabled} of {} listed ASes", asns.len());
    }

    // seed the announcements
    let announcements = match seed::load_announcements(&args.announcements) {
        Ok(anns) => anns,
        Err(e) => {
            error!("cannot read {}: {e}", args.announcements.display());
            return ExitCode::from(1);
        }
    };
    if announcements.is_empty() {
        error!("no announcements loaded from {}", args.announcements.display());
        return ExitCode::from(1);
    }
    let seeded = seed::seed_graph(&mut graph, &announcements);
    info!(
        "installed {} ROAs, originated {} prefixes ({} rows skipped, ASN not in graph)",
        seeded.roas, seeded.seeded, seeded.skipped
    );

    // run to the fixed point
    let report = match propagate(&mut graph) {
        Ok(report) => report,
        Err(code) => return code,
    };
    info!("{report}");

    // emit the routing tables
    if let Err(e) = output::write_routing_tables_to_path(&graph, &args.output) {
        error!("cannot write {}: {e}", args.output.display());
        return ExitCode::from(1);
    }
    info!(
        "wrote {} routes to {}",
        output::total_routes(&graph),
        args.output.display()
    );

    ExitCode::SUCCESS
}

fn propagate(graph: &mut AsGraph) -> Result<ConvergenceReport, ExitCode> {
    converge(graph).map_err(|e| {
        error!("{e}");
        match e {
            TopologyError::CycleDetected(_) => ExitCode::from(2),
            _ => ExitCode::from(1),
        }
    })
}
