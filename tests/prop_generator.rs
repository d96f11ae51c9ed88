/*
prop_generator.rs

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

//! Property-based tests for the map generator.
//!
//! Every generated map, whatever the shape, the number of players, and the seed, must be a
//! connected lattice where cities never touch each other, and where the plain faces are split
//! into contiguous regions of nearly equal size.

use proptest::prelude::*;

use tessera::config::DEFAULT_CITY_REACH;
use tessera::generator::cities::city_count;
use tessera::generator::distance::distance_map;
use tessera::generator::lattice::Lattice;
use tessera::{GM, GMConfig, GMError, GMMode, GenerationParams, generate_gm};

fn any_mode() -> impl Strategy<Value = GMMode> {
    prop_oneof![
        Just(GMMode::Hexagon),
        Just(GMMode::Square),
        Just(GMMode::Triangle),
    ]
}

fn any_params() -> impl Strategy<Value = GenerationParams> {
    (0usize..32, 12usize..32, 1usize..5, 1usize..128, 3usize..8).prop_map(
        |(base_faces, faces_per_player, min_city_spacing, placement_attempts, city_reach)| {
            GenerationParams {
                base_faces,
                faces_per_player,
                min_city_spacing,
                placement_attempts,
                city_reach,
            }
        },
    )
}

fn generate(mode: GMMode, players: usize, seed: u64) -> GM {
    generate_with(mode, players, seed, GenerationParams::default())
}

fn generate_with(mode: GMMode, players: usize, seed: u64, params: GenerationParams) -> GM {
    let config = GMConfig::random(players, mode)
        .with_seed(seed)
        .with_params(params);
    match generate_gm(&config) {
        Ok(gm) => gm,
        Err(e) => panic!("{mode} map for {players} players with seed {seed}: {e}"),
    }
}

/// Check the invariants that every map must satisfy.
fn check_map(gm: &GM, players: usize) -> Result<(), TestCaseError> {
    prop_assert_eq!(gm.len(), gm.edges().len());
    prop_assert_eq!(gm.len(), gm.width() * gm.height());
    prop_assert!(gm.edges().is_symmetric());
    prop_assert!(gm.edges().is_connected());

    // Cities
    let cities: Vec<usize> = gm.cities();
    prop_assert_eq!(cities.len(), city_count(players));
    for &c in &cities {
        prop_assert!(gm.face(c).is_some_and(|f| f.owner_region.is_none()));
        for &n in gm.neighbors(c) {
            prop_assert!(!gm.faces()[n].is_city(), "cities {} and {} touch", c, n);
        }
    }

    // Regions
    prop_assert_eq!(gm.players(), players);
    for face in gm.faces().iter().filter(|f| !f.is_city()) {
        prop_assert!(face.owner_region.is_some_and(|r| r < players));
    }
    let sizes: Vec<usize> = gm.region_sizes();
    let max: usize = sizes.iter().copied().max().unwrap_or(0);
    let min: usize = sizes.iter().copied().min().unwrap_or(0);
    prop_assert!(min >= 1, "empty region: {:?}", sizes);
    prop_assert!(max - min <= 1, "unbalanced regions: {:?}", sizes);
    prop_assert_eq!(
        sizes.iter().sum::<usize>(),
        gm.len() - cities.len(),
        "plain faces left outside the regions"
    );

    for (r, &seed) in gm.seeds().iter().enumerate() {
        prop_assert_eq!(gm.faces()[seed].owner_region, Some(r));
        let reachable: usize = gm
            .edges()
            .count_reachable(seed, |f| gm.faces()[f].owner_region == Some(r));
        prop_assert_eq!(reachable, sizes[r], "region {} is not contiguous", r);
    }
    Ok(())
}

/// Check that each region starts within `reach` moves of a city.
fn check_city_reach(gm: &GM, reach: usize) -> Result<(), TestCaseError> {
    let dist: Vec<Option<usize>> = distance_map(gm.faces(), gm.edges(), &gm.cities());
    for (r, &seed) in gm.seeds().iter().enumerate() {
        prop_assert!(
            dist[seed].is_some_and(|d| d <= reach),
            "region {} starts {:?} moves away from the cities",
            r,
            dist[seed]
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generated_maps_are_valid(
        mode in any_mode(),
        players in 1usize..=8,
        seed in any::<u64>(),
    ) {
        let gm = generate(mode, players, seed);
        check_map(&gm, players)?;
        check_city_reach(&gm, DEFAULT_CITY_REACH)?;
    }

    #[test]
    fn same_seed_same_map(
        mode in any_mode(),
        players in 1usize..=8,
        seed in any::<u64>(),
    ) {
        prop_assert_eq!(generate(mode, players, seed), generate(mode, players, seed));
    }

    #[test]
    fn distance_is_symmetric(
        mode in any_mode(),
        players in 1usize..=6,
        seed in any::<u64>(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let gm = generate(mode, players, seed);
        let from: usize = a.index(gm.len());
        let to: usize = b.index(gm.len());

        prop_assert_eq!(gm.distance(from, from), Some(0));
        prop_assert_eq!(gm.distance(from, to), gm.distance(to, from));
        if from != to && gm.edges().is_adjacent(from, to) {
            prop_assert_eq!(gm.distance(from, to), Some(1));
        }
        prop_assert_eq!(gm.distance(from, gm.len()), None);
    }

    #[test]
    fn plain_faces_reach_each_other(
        mode in any_mode(),
        players in 1usize..=6,
        seed in any::<u64>(),
    ) {
        let gm = generate(mode, players, seed);
        let first: usize = gm.seeds()[0];
        for (f, face) in gm.faces().iter().enumerate() {
            // A path between two plain faces never needs to go through a city
            let d: Option<usize> = gm.distance(first, f);
            prop_assert!(d.is_some(), "face {} ({:?}) cannot be reached", f, face);
        }
    }

    #[test]
    fn custom_params_produce_valid_maps(
        mode in any_mode(),
        players in 1usize..=8,
        seed in any::<u64>(),
        params in any_params(),
    ) {
        let config = GMConfig::random(players, mode)
            .with_seed(seed)
            .with_params(params);
        let gm = generate_gm(&config).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(gm.len() >= params.face_count(players));
        check_map(&gm, players)?;
        check_city_reach(&gm, params.city_reach)?;
    }

    #[test]
    fn custom_namespaces_are_not_implemented(
        namespace in "[a-z]{1,12}",
        players in 1usize..=8,
    ) {
        let mut config = GMConfig::random(players, GMMode::Square);
        config.namespace = namespace.clone();
        prop_assert_eq!(
            generate_gm(&config),
            Err(GMError::Unimplemented {
                namespace,
                title: String::from("random"),
            })
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn crowded_maps_are_valid(
        mode in any_mode(),
        players in 9usize..=24,
        seed in any::<u64>(),
    ) {
        let gm = generate(mode, players, seed);
        check_map(&gm, players)?;
        check_city_reach(&gm, DEFAULT_CITY_REACH)?;
    }
}

#[test]
fn every_player_count_up_to_24() {
    for mode in [GMMode::Hexagon, GMMode::Square, GMMode::Triangle] {
        for players in 1..=24 {
            let gm = generate(mode, players, players as u64);
            if let Err(e) = check_map(&gm, players) {
                panic!("{mode} map for {players} players: {e}");
            }
        }
    }
}

#[test]
fn balancing_regressions() {
    let gm = generate(GMMode::Triangle, 12, 9);
    check_map(&gm, 12).unwrap();

    let gm = generate(GMMode::Hexagon, 24, 10);
    check_map(&gm, 24).unwrap();

    let params = GenerationParams {
        base_faces: 0,
        faces_per_player: 16,
        ..GenerationParams::default()
    };
    let gm = generate_with(GMMode::Triangle, 4, 2, params);
    check_map(&gm, 4).unwrap();
}

#[test]
fn shrunk_square_maps_for_four_players() {
    for base_faces in 0..=30 {
        let params = GenerationParams {
            base_faces,
            faces_per_player: 0,
            ..GenerationParams::default()
        };
        let available: usize = Lattice::build(GMMode::Square, base_faces)
            .len()
            .saturating_sub(city_count(4));

        for seed in 0..10 {
            let config = GMConfig::random(4, GMMode::Square)
                .with_seed(seed)
                .with_params(params);
            match generate_gm(&config) {
                Ok(gm) => {
                    assert!(available >= 4, "{base_faces} faces: {available} available");
                    if let Err(e) = check_map(&gm, 4) {
                        panic!("{base_faces} faces, seed {seed}: {e}");
                    }
                }
                Err(e) => assert_eq!(
                    e,
                    GMError::InsufficientFaces {
                        players: 4,
                        faces: available
                    },
                    "{base_faces} faces, seed {seed}"
                ),
            }
        }
    }
}

#[test]
fn two_player_hexagon_map() {
    let gm = generate(GMMode::Hexagon, 2, 2024);

    assert_eq!(gm.players(), 2);
    assert_eq!(gm.cities().len(), 1);
    let seeds: &[usize] = gm.seeds();
    assert!(gm.distance(seeds[0], seeds[1]).is_some());
}

#[test]
fn four_player_square_map() {
    let gm = generate(GMMode::Square, 4, 7);

    assert_eq!(gm.region_sizes().len(), 4);
    assert_eq!(gm.cities().len(), 2);
    for c in gm.cities() {
        assert!(gm.neighbors(c).iter().all(|&f| !gm.faces()[f].is_city()));
    }
}

#[test]
fn shrunk_map_cannot_hold_the_players() {
    let params = GenerationParams {
        base_faces: 3,
        faces_per_player: 0,
        ..GenerationParams::default()
    };
    let config = GMConfig::random(4, GMMode::Square)
        .with_seed(1)
        .with_params(params);

    // 2x2 lattice, 2 cities: 2 faces left for 4 players
    assert_eq!(
        generate_gm(&config),
        Err(GMError::InsufficientFaces {
            players: 4,
            faces: 2,
        })
    );
}

#[test]
fn unknown_title_is_not_implemented() {
    let mut config = GMConfig::random(2, GMMode::Triangle);
    config.title = String::from("archipelago");

    assert!(matches!(
        generate_gm(&config),
        Err(GMError::Unimplemented { .. })
    ));
}
