/*
random_map.rs

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

//! Generate the native random map.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

use super::cities;
use super::error::GMError;
use super::gm::{Face, GM};
use super::gm_config::GMConfig;
use super::lattice::Lattice;
use super::regions;

/// Generate a random map.
///
/// The lattice is built first, then the cities are placed, and finally the plain faces are
/// split into one region per player.
///
/// # Errors
///
/// The function returns the first error reported by one of the generation steps. No map is
/// returned in that case.
pub fn generate_random_gm(config: &GMConfig) -> Result<GM, GMError> {
    let start: Instant = Instant::now();
    let players: usize = config.players;

    if players == 0 {
        return Err(GMError::NoPlayers);
    }

    let seed: u64 = match config.seed {
        Some(s) => s,
        None => rand::random(),
    };
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    debug!(
        "Random map: mode = {}  players = {players}  seed = {seed}",
        config.mode
    );

    let lattice: Lattice = Lattice::build(config.mode, config.params.face_count(players));

    // Fail early, and always with the same error, when the map cannot hold the players
    let num_cities: usize = cities::city_count(players);
    let available: usize = lattice.len().saturating_sub(num_cities);
    if players > available {
        return Err(GMError::InsufficientFaces {
            players,
            faces: available,
        });
    }

    let Lattice {
        mode,
        width,
        height,
        faces,
        edges,
    } = lattice;

    // A city layout is kept only if the plain faces can be split into balanced regions, each
    // one starting next to a city.
    let city_reach: usize = config.params.city_reach;
    let mut placement = cities::CityPlacement::new(&edges, &config.params);
    let (faces, regions): (Vec<Face>, regions::Regions) =
        placement.place_checked(faces, players, &mut rng, |faces: &[Face], rng: &mut StdRng| {
            regions::assign(faces, &edges, players, city_reach, rng)
        })?;

    let faces: Vec<Face> = faces
        .into_iter()
        .zip(regions.assignment)
        .map(|(f, owner_region)| Face {
            face_type: f.face_type,
            owner_region,
        })
        .collect();

    info!(
        "Generated {mode} map: {} faces, {num_cities} cities, {players} regions in {:.3}s ({} layouts)",
        faces.len(),
        start.elapsed().as_secs_f32(),
        placement.layouts
    );
    Ok(GM::new(mode, width, height, faces, edges, regions.seeds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::generator::distance;
    use crate::generator::gm_config::{GMMode, GenerationParams};

    fn generate(mode: GMMode, players: usize, params: GenerationParams, seed: u64) -> GM {
        let config = GMConfig::random(players, mode)
            .with_params(params)
            .with_seed(seed);
        match generate_random_gm(&config) {
            Ok(gm) => gm,
            Err(e) => panic!("{mode} map, {players} players, seed {seed}: {e}"),
        }
    }

    fn check_regions(gm: &GM, players: usize) {
        let sizes: Vec<usize> = gm.region_sizes();
        assert_eq!(sizes.len(), players);
        let max: usize = *sizes.iter().max().unwrap();
        let min: usize = *sizes.iter().min().unwrap();
        assert!(max - min <= 1, "{sizes:?}");
        for (r, &seed) in gm.seeds().iter().enumerate() {
            assert_eq!(
                gm.edges()
                    .count_reachable(seed, |f| gm.faces()[f].owner_region == Some(r)),
                sizes[r]
            );
        }
    }

    #[test]
    fn test_generate() {
        let config = GMConfig::random(2, GMMode::Hexagon).with_seed(42);
        let gm = generate_random_gm(&config).unwrap();

        assert_eq!(gm.mode(), GMMode::Hexagon);
        assert_eq!(gm.len(), gm.edges().len());
        assert_eq!(gm.len(), gm.width() * gm.height());
        assert_eq!(gm.players(), 2);
        assert_eq!(gm.cities().len(), 1);
        assert!(gm.edges().is_connected());
    }

    #[test]
    fn test_same_seed_same_map() {
        let config = GMConfig::random(5, GMMode::Triangle).with_seed(1234);
        assert_eq!(
            generate_random_gm(&config).unwrap(),
            generate_random_gm(&config).unwrap()
        );
    }

    #[test]
    fn test_no_players() {
        let config = GMConfig::random(0, GMMode::Square);
        assert_eq!(generate_random_gm(&config), Err(GMError::NoPlayers));
    }

    #[test]
    fn test_insufficient_faces() {
        let params = GenerationParams {
            base_faces: 4,
            faces_per_player: 0,
            ..GenerationParams::default()
        };
        let config = GMConfig::random(4, GMMode::Square)
            .with_params(params)
            .with_seed(0);
        assert_eq!(
            generate_random_gm(&config),
            Err(GMError::InsufficientFaces {
                players: 4,
                faces: 2
            })
        );
    }

    #[test]
    fn test_default_params_regressions() {
        for (mode, players, seed) in [(GMMode::Triangle, 12, 9), (GMMode::Hexagon, 24, 10)] {
            let gm = generate(mode, players, GenerationParams::default(), seed);
            check_regions(&gm, players);
        }
    }

    #[test]
    fn test_large_triangle_map() {
        let params = GenerationParams {
            base_faces: 0,
            faces_per_player: 16,
            ..GenerationParams::default()
        };
        let gm = generate(GMMode::Triangle, 4, params, 2);
        check_regions(&gm, 4);
    }

    #[test]
    fn test_small_lattice() {
        // 3x2 square lattice: a first city at 1 or 4 leaves no room for the second one
        for base_faces in [5, 6] {
            let params = GenerationParams {
                base_faces,
                faces_per_player: 0,
                ..GenerationParams::default()
            };
            for seed in 0..50 {
                let gm = generate(GMMode::Square, 4, params, seed);
                assert_eq!(gm.len(), 6);
                check_regions(&gm, 4);
            }
        }
    }

    #[test]
    fn test_regions_start_near_cities() {
        for mode in [GMMode::Hexagon, GMMode::Square, GMMode::Triangle] {
            for players in [2, 5, 8] {
                let gm = generate(mode, players, GenerationParams::default(), 77);
                let dist = distance::distance_map(gm.faces(), gm.edges(), &gm.cities());
                for (r, &seed) in gm.seeds().iter().enumerate() {
                    assert!(
                        dist[seed].is_some_and(|d| d <= config::DEFAULT_CITY_REACH),
                        "region {r} of the {mode} map is too far from the cities"
                    );
                }
            }
        }
    }
}
