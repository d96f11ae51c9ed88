/*
regions.rs

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

//! Split the plain faces into player regions.
//!
//! Each player gets a contiguous region, and the region sizes differ by one face at most.
//! Cities do not belong to any region.
//!
//! The assignment is done in three steps:
//!
//! * A seed face is selected for each region. The first seed is a random face, and each
//!   following seed is the face that is the farthest from the seeds already selected.
//!   Seeds are only selected among the faces close to a city (see `city_reach`), so that no
//!   region is starved of cities.
//! * The regions grow from their seed, one face per region and per turn, in a breadth-first
//!   order. A region stops growing when it reaches its share of the faces, unless the other
//!   regions are blocked.
//! * If the growth leaves regions with different sizes, then faces are moved from the largest
//!   regions to the smallest ones, through a chain of adjacent regions.
//!
//! When the sizes cannot be balanced, the three steps start again with a new first seed.

use log::{Level, debug, log_enabled};
use rand::Rng;
use std::cmp::Reverse;
use std::collections::VecDeque;

use super::distance;
use super::edges;
use super::error::GMError;
use super::gm::Face;

/// Maximum number of seed selections before giving up.
const MAX_ATTEMPTS: usize = 16;

/// Result of the region assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regions {
    /// Region of each face. Cities are not assigned to any region.
    pub assignment: Vec<Option<usize>>,

    /// Seed face of each region.
    pub seeds: Vec<usize>,
}

impl Regions {
    /// Number of faces in each region.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = vec![0; self.seeds.len()];
        for r in self.assignment.iter().flatten() {
            sizes[*r] += 1;
        }
        sizes
    }
}

/// Region assignment object.
pub struct RegionAssignment<'a> {
    /// Map faces, with the cities already placed.
    faces: &'a [Face],

    /// Map edges.
    edges: &'a edges::Edges,

    /// Number of regions.
    players: usize,

    /// Distance from each face to the closest city. Empty when the map has no city.
    city_dist: Vec<Option<usize>>,

    /// Largest distance between a seed and the closest city.
    reach: usize,

    /// Region of each face.
    owner: Vec<Option<usize>>,

    /// Seed face of each region.
    seeds: Vec<usize>,

    /// Number of faces in each region.
    sizes: Vec<usize>,

    /// Number of faces moved between regions to balance their sizes.
    pub moves: usize,

    /// Number of seed selections.
    pub attempts: usize,
}

impl<'a> RegionAssignment<'a> {
    /// Create the object.
    ///
    /// Region seeds are at most `city_reach` moves away from a city. The distance is extended
    /// when there are not enough faces that close to the cities.
    pub fn new(
        faces: &'a [Face],
        edges: &'a edges::Edges,
        players: usize,
        city_reach: usize,
    ) -> Self {
        Self {
            faces,
            edges,
            players,
            city_dist: Vec::new(),
            reach: city_reach.max(1),
            owner: vec![None; faces.len()],
            seeds: Vec::with_capacity(players),
            sizes: vec![0; players],
            moves: 0,
            attempts: 0,
        }
    }

    /// Assign all the plain faces to a region.
    ///
    /// # Errors
    ///
    /// The method returns an error if there are more players than plain faces, if some plain
    /// faces cannot be reached from the seeds, or if the region sizes cannot be balanced.
    pub fn assign<R>(mut self, rng: &mut R) -> Result<Regions, GMError>
    where
        R: Rng + ?Sized,
    {
        let plain: Vec<usize> = self
            .faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_city())
            .map(|(i, _)| i)
            .collect();

        if self.players == 0 {
            return Err(GMError::NoPlayers);
        }
        if self.players > plain.len() {
            return Err(GMError::InsufficientFaces {
                players: self.players,
                faces: plain.len(),
            });
        }

        let pool: Vec<usize> = self.seed_pool(&plain);
        let cap: usize = plain.len().div_ceil(self.players);

        while self.attempts < MAX_ATTEMPTS {
            self.attempts += 1;
            self.reset();
            self.select_seeds(&pool, rng)?;
            self.grow(cap);

            let unassigned: usize = plain.iter().filter(|&&f| self.owner[f].is_none()).count();
            if unassigned > 0 {
                return Err(GMError::UnreachableFaces { count: unassigned });
            }

            debug!("Region sizes after growth = {:?}", self.sizes);
            if let Err(e) = self.balance(plain.len()) {
                debug!("Attempt {}: {e} {:?}", self.attempts, self.sizes);
                continue;
            }
            debug!(
                "Region sizes = {:?}  Moves = {}  Seeds = {:?}  Attempts = {}",
                self.sizes, self.moves, self.seeds, self.attempts
            );

            if log_enabled!(Level::Debug) {
                for r in 0..self.players {
                    let faces: Vec<usize> = (0..self.owner.len())
                        .filter(|&f| self.owner[f] == Some(r))
                        .collect();
                    debug!("    Region {r}: {faces:?}");
                }
            }

            return Ok(Regions {
                assignment: self.owner,
                seeds: self.seeds,
            });
        }
        Err(GMError::UnbalancedRegions)
    }

    /// Forget the previous attempt.
    fn reset(&mut self) {
        self.owner = vec![None; self.faces.len()];
        self.seeds.clear();
        self.sizes = vec![0; self.players];
    }

    /// Return the plain faces that can be region seeds: the faces within reach of a city.
    ///
    /// The reach is extended until there is a candidate for each player.
    fn seed_pool(&mut self, plain: &[usize]) -> Vec<usize> {
        let cities: Vec<usize> = (0..self.faces.len())
            .filter(|&f| self.faces[f].is_city())
            .collect();
        if cities.is_empty() {
            self.reach = usize::MAX;
            return plain.to_vec();
        }
        self.city_dist = distance::distance_map(self.faces, self.edges, &cities);

        loop {
            let pool: Vec<usize> = plain
                .iter()
                .copied()
                .filter(|&f| self.within_reach(f))
                .collect();
            if pool.len() >= self.players {
                debug!("Seed pool: {} faces within {} moves of a city", pool.len(), self.reach);
                return pool;
            }
            if self.reach >= self.faces.len() {
                // Some plain faces are cut from the cities
                self.reach = usize::MAX;
                return plain.to_vec();
            }
            self.reach += 1;
        }
    }

    /// Distance between the face and the closest city.
    fn city_distance(&self, face: usize) -> usize {
        self.city_dist
            .get(face)
            .copied()
            .flatten()
            .unwrap_or(usize::MAX)
    }

    /// Whether the face can be a region seed.
    fn within_reach(&self, face: usize) -> bool {
        self.reach == usize::MAX || self.city_distance(face) <= self.reach
    }

    /// Select the region seeds by farthest-point sampling.
    fn select_seeds<R>(&mut self, pool: &[usize], rng: &mut R) -> Result<(), GMError>
    where
        R: Rng + ?Sized,
    {
        if pool.len() < self.players {
            return Err(GMError::InsufficientFaces {
                players: self.players,
                faces: pool.len(),
            });
        }

        let first: usize = pool[rng.random_range(0..pool.len())];
        self.claim(first, 0);
        self.seeds.push(first);

        while self.seeds.len() < self.players {
            let dist: Vec<Option<usize>> =
                distance::distance_map(self.faces, self.edges, &self.seeds);

            // Faces that cannot be reached are the farthest ones. Ties are broken by the lowest
            // face index.
            let mut best: Option<(usize, usize)> = None;
            for &f in pool.iter().filter(|&&f| self.owner[f].is_none()) {
                let d: usize = dist[f].unwrap_or(usize::MAX);
                if best.is_none_or(|(_, bd)| d > bd) {
                    best = Some((f, d));
                }
            }

            let Some((seed, d)) = best else {
                return Err(GMError::InsufficientFaces {
                    players: self.players,
                    faces: pool.len(),
                });
            };
            debug!("    Seed {} at face {seed} (distance {d})", self.seeds.len());
            self.claim(seed, self.seeds.len());
            self.seeds.push(seed);
        }
        Ok(())
    }

    /// Grow the regions from their seed.
    ///
    /// A region stops at `cap` faces, unless all the regions below the cap are blocked.
    fn grow(&mut self, cap: usize) {
        let mut frontiers: Vec<VecDeque<usize>> = self
            .seeds
            .iter()
            .map(|&s| self.edges.get_faces(s).iter().copied().collect())
            .collect();

        loop {
            let mut progressed: bool = false;
            for r in 0..self.players {
                if self.sizes[r] < cap && self.claim_next(r, &mut frontiers[r]) {
                    progressed = true;
                }
            }
            if progressed {
                continue;
            }

            // All the regions below the cap are blocked: let the smallest region that can still
            // grow take one more face.
            let mut order: Vec<usize> = (0..self.players).collect();
            order.sort_by_key(|&r| self.sizes[r]);
            if !order
                .into_iter()
                .any(|r| self.claim_next(r, &mut frontiers[r]))
            {
                break;
            }
        }
    }

    /// Claim the next face from the frontier of the given region.
    ///
    /// Return `false` when the frontier has no more free face.
    fn claim_next(&mut self, region: usize, frontier: &mut VecDeque<usize>) -> bool {
        while let Some(f) = frontier.pop_front() {
            if self.owner[f].is_some() || self.faces[f].is_city() {
                continue;
            }
            self.claim(f, region);
            for &f2 in self.edges.get_faces(f) {
                if self.owner[f2].is_none() && !self.faces[f2].is_city() {
                    frontier.push_back(f2);
                }
            }
            return true;
        }
        false
    }

    /// Assign a free face to a region.
    fn claim(&mut self, face: usize, region: usize) {
        self.owner[face] = Some(region);
        self.sizes[region] += 1;
    }

    /// Move faces between regions until their sizes differ by one face at most.
    fn balance(&mut self, num_plain: usize) -> Result<(), GMError> {
        // Each complete chain reduces the sum of the squared sizes. The bound only protects
        // against chains that cannot be completed.
        let max_chains: usize = 4 * num_plain * self.players + 16;

        for _ in 0..max_chains {
            let max: usize = self.sizes.iter().copied().max().unwrap_or(0);
            let min: usize = self.sizes.iter().copied().min().unwrap_or(0);
            if max - min <= 1 {
                return Ok(());
            }

            // Any region with two faces more than another one can start a chain, the largest
            // regions first.
            let mut donors: Vec<usize> = (0..self.players)
                .filter(|&r| self.sizes[r] >= min + 2)
                .collect();
            donors.sort_by_key(|&r| Reverse(self.sizes[r]));

            let Some(chain) = donors.into_iter().find_map(|r| self.find_chain(r)) else {
                debug!("No chain to balance the regions {:?}", self.sizes);
                return Err(GMError::UnbalancedRegions);
            };
            debug!("    Balancing chain {chain:?}");

            // Start from the end of the chain: each region gives a face before receiving one, so
            // that the face it gives was checked against its current shape.
            for i in (0..chain.len() - 1).rev() {
                let (donor, receiver) = (chain[i], chain[i + 1]);
                match self.movable_face(donor, receiver) {
                    Some(f) => self.transfer(f, donor, receiver),
                    None => break,
                }
            }
        }
        Err(GMError::UnbalancedRegions)
    }

    /// Find a chain of adjacent regions from the given region to a region that has at least two
    /// faces less, such that each region of the chain can give a face to the next one.
    fn find_chain(&self, from: usize) -> Option<Vec<usize>> {
        let mut parent: Vec<Option<usize>> = vec![None; self.players];
        let mut visited: Vec<bool> = vec![false; self.players];
        let mut queue: VecDeque<usize> = VecDeque::new();

        visited[from] = true;
        queue.push_back(from);
        while let Some(donor) = queue.pop_front() {
            for receiver in self.adjacent_regions(donor) {
                if visited[receiver] || self.movable_face(donor, receiver).is_none() {
                    continue;
                }
                visited[receiver] = true;
                parent[receiver] = Some(donor);

                if self.sizes[receiver] + 2 <= self.sizes[from] {
                    let mut chain: Vec<usize> = vec![receiver];
                    let mut r: usize = receiver;
                    while let Some(p) = parent[r] {
                        chain.push(p);
                        r = p;
                    }
                    chain.reverse();
                    return Some(chain);
                }
                queue.push_back(receiver);
            }
        }
        None
    }

    /// Regions that share an edge with the given region, by increasing index.
    fn adjacent_regions(&self, region: usize) -> Vec<usize> {
        let mut adjacent: Vec<bool> = vec![false; self.players];
        for f in (0..self.owner.len()).filter(|&f| self.owner[f] == Some(region)) {
            for &f2 in self.edges.get_faces(f) {
                match self.owner[f2] {
                    Some(r) if r != region => adjacent[r] = true,
                    _ => (),
                }
            }
        }
        (0..self.players).filter(|&r| adjacent[r]).collect()
    }

    /// Return a face of the donor region that can be given to the receiver region.
    ///
    /// The face must touch the receiver region, and the donor region must stay contiguous
    /// without it. The donor seed can move only if another face of the region can replace it.
    fn movable_face(&self, donor: usize, receiver: usize) -> Option<usize> {
        if donor == receiver || self.sizes[donor] <= 1 {
            return None;
        }

        (0..self.owner.len()).find(|&f| {
            self.owner[f] == Some(donor)
                && self
                    .edges
                    .get_faces(f)
                    .iter()
                    .any(|&f2| self.owner[f2] == Some(receiver))
                && self.root_without(donor, f).is_some_and(|root| {
                    self.edges
                        .count_reachable(root, |f2| f2 != f && self.owner[f2] == Some(donor))
                        == self.sizes[donor] - 1
                })
        })
    }

    /// Seed of the donor region once the given face is gone.
    fn root_without(&self, donor: usize, face: usize) -> Option<usize> {
        let seed: usize = self.seeds[donor];
        if seed != face {
            return Some(seed);
        }
        // The closest face to a city replaces the seed
        (0..self.owner.len())
            .filter(|&f| f != face && self.owner[f] == Some(donor) && self.within_reach(f))
            .min_by_key(|&f| (self.city_distance(f), f))
    }

    /// Move a face from the donor region to the receiver region.
    fn transfer(&mut self, face: usize, donor: usize, receiver: usize) {
        if let Some(root) = self.root_without(donor, face) {
            self.seeds[donor] = root;
        }
        self.owner[face] = Some(receiver);
        self.sizes[donor] -= 1;
        self.sizes[receiver] += 1;
        self.moves += 1;
    }
}

/// Split the plain faces into one region per player.
///
/// Region seeds are at most `city_reach` moves away from a city, unless the map does not have
/// enough faces that close to the cities.
///
/// # Errors
///
/// See [`RegionAssignment::assign`].
pub fn assign<R>(
    faces: &[Face],
    edges: &edges::Edges,
    players: usize,
    city_reach: usize,
    rng: &mut R,
) -> Result<Regions, GMError>
where
    R: Rng + ?Sized,
{
    RegionAssignment::new(faces, edges, players, city_reach).assign(rng)
}
