/*
cli_options.rs

Copyright 2025 The Tessera Authors

This file is part of Tessera.

Tessera is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Tessera is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Tessera. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers who tune the map generator.
//! In command-line mode, Tessera generates maps, verifies them, and prints statistics.
//!
//! # Examples
//!
//! List the available maps:
//!
//! ```text
//! $ tessera --ls
//! @/random
//! ```
//!
//! Generate 100 square maps for 6 players and print some statistics:
//!
//! ```text
//! $ tessera -m square -p 6 -c 100 -s
//! ```
//!
//! Dump a map in JSON format, and compute the distance between faces 3 and 42:
//!
//! ```text
//! $ tessera -m triangle -p 2 --seed 7 --json --distance 3 42
//! ```

use clap::Parser;
use log::debug;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use tessera::config::{COPYRIGHT_NOTICE, NATIVE_NAMESPACE};
use tessera::generator::distance;
use tessera::generator::{GeneratorRegistry, NATIVE_RANDOM};
use tessera::saver::settings::SaverSettings;
use tessera::{GM, GMConfig, GMError, GMMode, GenerationParams};

/// Generate game maps for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the maps
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Namespace of the map
    #[arg(short, long, default_value_t = NATIVE_NAMESPACE.to_string())]
    namespace: String,

    /// Title of the map in the namespace
    #[arg(short, long, default_value_t = NATIVE_RANDOM.to_string())]
    title: String,

    /// Shape of the faces
    #[arg(value_enum, short, long, default_value_t = GMMode::Hexagon)]
    mode: GMMode,

    /// Number of players
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Random seed (the seed is incremented for each map when generating several maps)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of faces before adding the faces for the players
    #[arg(long)]
    base_faces: Option<usize>,

    /// Number of faces for each player
    #[arg(long)]
    faces_per_player: Option<usize>,

    /// Initial minimum spacing between cities
    #[arg(long)]
    min_city_spacing: Option<usize>,

    /// Number of candidates tried for a city before relaxing the spacing
    #[arg(long)]
    placement_attempts: Option<usize>,

    /// Largest distance between the start of a region and the closest city
    #[arg(long)]
    city_reach: Option<usize>,

    /// Number of maps to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Print the map in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Print the distance between two faces of the map
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    distance: Option<Vec<usize>>,

    /// Print some statistics after generating the maps
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Print the view settings stored in the given data directory
    #[arg(long, value_name = "DIR")]
    settings: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Build the generation constants from the defaults and the options.
    fn params(&self) -> GenerationParams {
        let defaults: GenerationParams = GenerationParams::default();
        GenerationParams {
            base_faces: self.base_faces.unwrap_or(defaults.base_faces),
            faces_per_player: self.faces_per_player.unwrap_or(defaults.faces_per_player),
            min_city_spacing: self.min_city_spacing.unwrap_or(defaults.min_city_spacing),
            placement_attempts: self
                .placement_attempts
                .unwrap_or(defaults.placement_attempts),
            city_reach: self.city_reach.unwrap_or(defaults.city_reach),
        }
    }
}

/// Verify the map invariants and return the list of the problems.
fn verify(gm: &GM) -> Vec<String> {
    let mut problems: Vec<String> = Vec::new();

    if gm.len() != gm.edges().len() {
        problems.push(format!(
            "{} faces but {} adjacency lists",
            gm.len(),
            gm.edges().len()
        ));
    }
    if !gm.edges().is_symmetric() {
        problems.push(String::from("edges are not symmetric"));
    }
    if !gm.edges().is_connected() {
        problems.push(String::from("map is not connected"));
    }
    for c in gm.cities() {
        if gm.neighbors(c).iter().any(|&f| gm.faces()[f].is_city()) {
            problems.push(format!("city {c} touches another city"));
        }
    }
    let sizes: Vec<usize> = gm.region_sizes();
    let max: usize = sizes.iter().copied().max().unwrap_or(0);
    let min: usize = sizes.iter().copied().min().unwrap_or(0);
    if max - min > 1 {
        problems.push(format!("unbalanced regions: {sizes:?}"));
    }
    for (r, &seed) in gm.seeds().iter().enumerate() {
        let reachable: usize = gm
            .edges()
            .count_reachable(seed, |f| gm.faces()[f].owner_region == Some(r));
        if reachable != sizes[r] {
            problems.push(format!("region {r} is not contiguous"));
        }
    }
    problems
}

/// Print a short description of the map.
fn print_map(gm: &GM) {
    println!(
        "{} map {}x{}: {} faces, {} cities {:?}",
        gm.mode(),
        gm.width(),
        gm.height(),
        gm.len(),
        gm.cities().len(),
        gm.cities()
    );
    println!(
        "Regions: {:?}  Seeds: {:?}",
        gm.region_sizes(),
        gm.seeds()
    );

    // Distance from the first seed to the other seeds
    if let Some(&first) = gm.seeds().first() {
        let dist: Vec<Option<usize>> = distance::distance_map(gm.faces(), gm.edges(), &[first]);
        let to_seeds: Vec<Option<usize>> = gm.seeds().iter().map(|&s| dist[s]).collect();
        println!("Distance from seed 0 to the seeds: {to_seeds:?}");
    }
}

/// Parse and process command-line options.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let registry: GeneratorRegistry = GeneratorRegistry::native();

    //
    // List the maps
    //
    if args.ls {
        for (namespace, title) in registry.list() {
            println!("{namespace}/{title}");
        }
        return 0;
    }

    //
    // Print the settings
    //
    if let Some(dir) = &args.settings {
        let saver: SaverSettings = SaverSettings::new(dir.clone());
        match serde_json::to_string_pretty(&saver.load()) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Cannot print the settings: {e}");
                return 1;
            }
        }
        return 0;
    }

    //
    // Generate the maps
    //
    let mut config: GMConfig = GMConfig {
        namespace: args.namespace.clone(),
        title: args.title.clone(),
        players: args.players,
        mode: args.mode,
        seed: args.seed,
        params: args.params(),
    };

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut errors: usize = 0;
    let mut invalid: usize = 0;
    let mut last_error: Option<GMError> = None;

    for i in 0..args.count {
        debug!("Iteration {i}");
        config.seed = args.seed.map(|s| s.wrapping_add(i as u64));

        let start: Instant = Instant::now();
        let ret: Result<GM, GMError> = registry.generate(&config);
        let duration: f32 = start.elapsed().as_secs_f32();

        match ret {
            Ok(gm) => {
                total += duration;
                if duration > max {
                    max = duration;
                }

                let problems: Vec<String> = verify(&gm);
                if !problems.is_empty() {
                    invalid += 1;
                    for p in &problems {
                        eprintln!("Invalid map: {p}");
                    }
                }

                if args.json {
                    match serde_json::to_string(&gm) {
                        Ok(s) => println!("{s}"),
                        Err(e) => eprintln!("Cannot serialize the map: {e}"),
                    }
                } else if !args.summary {
                    print_map(&gm);
                }

                if let Some(d) = &args.distance {
                    match gm.distance(d[0], d[1]) {
                        Some(n) => println!("Distance {} -> {}: {n}", d[0], d[1]),
                        None => println!("Distance {} -> {}: unreachable", d[0], d[1]),
                    }
                }
            }
            Err(e) => {
                errors += 1;
                debug!("ERROR generating map: {e}");
                last_error = Some(e);
            }
        }
    }

    // Print some stats
    if args.summary {
        let generated: usize = args.count - errors;
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
            errors = {}
      invalid maps = {}",
            total,
            if generated > 0 {
                total / generated as f32
            } else {
                0.0
            },
            max,
            errors,
            invalid
        );
    }

    match last_error {
        Some(e) => {
            eprintln!("Error: {e}");
            1
        }
        None if invalid > 0 => 2,
        None => 0,
    }
}
