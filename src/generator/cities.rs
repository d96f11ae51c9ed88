/*
cities.rs

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

//! Place the cities.
//!
//! The map gets one contested city for every two players.
//! Cities are spread over the map: a candidate face becomes a city only if it is farther than a
//! minimum spacing from all the cities already placed.
//! When no candidate satisfies the spacing, the spacing is relaxed by one and the search starts
//! again, down to a spacing of 1, which only prevents two cities from touching.
//! At that spacing, a depth-first search undoes the previous choices when the remaining cities
//! do not fit, so that the placement only fails when the map is really too small.
//!
//! A candidate is also rejected when turning it into a city would cut the plain faces in
//! several parts: the player regions must be able to cover all the plain faces.
//!
//! Finally, [`CityPlacement::place_checked`] only keeps a layout that does not starve any
//! region-to-be. The caller provides the check, which is the region assignment. When the check
//! fails, a new layout is drawn.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::distance;
use super::edges;
use super::error::GMError;
use super::gm::{Face, FaceType};
use super::gm_config::GenerationParams;

/// Maximum number of candidates tested by the depth-first search.
const BACKTRACK_BUDGET: usize = 100_000;

/// Maximum number of layouts to draw before giving up on the layout check.
const MAX_LAYOUTS: usize = 32;

/// Number of cities for the given number of players.
pub fn city_count(players: usize) -> usize {
    players.div_ceil(2)
}

/// City placement object.
pub struct CityPlacement<'a> {
    /// Map edges.
    edges: &'a edges::Edges,

    /// Initial spacing between cities.
    min_spacing: usize,

    /// Number of candidates to try before relaxing the spacing.
    attempts: usize,

    /// Largest number of cities placed by the depth-first search.
    best_placed: usize,

    /// Spacing used for the last placed city.
    pub spacing: usize,

    /// Number of candidates tested by the last call to [`CityPlacement::place`].
    pub iteration: usize,

    /// Number of layouts drawn by the last call to [`CityPlacement::place_checked`].
    pub layouts: usize,
}

impl<'a> CityPlacement<'a> {
    /// Create the object.
    pub fn new(edges: &'a edges::Edges, params: &GenerationParams) -> Self {
        Self {
            edges,
            min_spacing: params.min_city_spacing.max(1),
            attempts: params.placement_attempts.max(1),
            best_placed: 0,
            spacing: 0,
            iteration: 0,
            layouts: 0,
        }
    }

    /// Mark the cities for the given number of players and return the updated faces.
    ///
    /// # Errors
    ///
    /// The method returns [`GMError::PlacementExhausted`] when the map is too small for the
    /// number of cities, even with the smallest spacing.
    pub fn place<R>(
        &mut self,
        faces: Vec<Face>,
        players: usize,
        rng: &mut R,
    ) -> Result<Vec<Face>, GMError>
    where
        R: Rng + ?Sized,
    {
        let required: usize = city_count(players);
        let mut faces: Vec<Face> = faces;
        let mut cities: Vec<usize> = Vec::with_capacity(required);

        self.spacing = self.min_spacing;
        self.iteration = 0;

        debug!(
            "Placing {required} cities  Spacing = {}  Attempts = {}",
            self.spacing, self.attempts
        );

        while cities.len() < required {
            let mut candidates: Vec<usize> = self.plain_faces(&faces);
            candidates.shuffle(rng);

            // With the smallest spacing, test all the faces before giving up
            let limit: usize = if self.spacing <= 1 {
                candidates.len()
            } else {
                self.attempts.min(candidates.len())
            };

            let mut selected: Option<usize> = None;
            for &c in &candidates[..limit] {
                self.iteration += 1;
                if self.is_valid(&faces, &cities, c) {
                    selected = Some(c);
                    break;
                }
            }

            match selected {
                Some(c) => {
                    debug!("    City {} at face {c} (spacing {})", cities.len(), self.spacing);
                    faces[c].face_type = FaceType::City;
                    cities.push(c);
                }
                None if self.spacing > 1 => {
                    self.spacing -= 1;
                    debug!("    Relaxing the spacing to {}", self.spacing);
                }
                None => {
                    debug!(
                        "    Greedy placement stuck after {} cities: backtracking",
                        cities.len()
                    );
                    return self.backtrack_all(faces, required, rng);
                }
            }
        }

        debug!("Cities = {cities:?}  Iterations = {}", self.iteration);
        Ok(faces)
    }

    /// Place the cities, and keep the layout only when `check` accepts it.
    ///
    /// `check` receives the faces with the cities and usually assigns the regions. A
    /// [`GMError::UnbalancedRegions`] error means that the layout starves a region: another
    /// layout is drawn. Any other error is returned as is.
    ///
    /// # Errors
    ///
    /// The method returns the placement errors, the errors from `check`, or
    /// [`GMError::UnbalancedRegions`] when no layout is accepted.
    pub fn place_checked<R, T, F>(
        &mut self,
        faces: Vec<Face>,
        players: usize,
        rng: &mut R,
        mut check: F,
    ) -> Result<(Vec<Face>, T), GMError>
    where
        R: Rng + ?Sized,
        F: FnMut(&[Face], &mut R) -> Result<T, GMError>,
    {
        self.layouts = 0;
        while self.layouts < MAX_LAYOUTS {
            self.layouts += 1;
            let placed: Vec<Face> = self.place(faces.clone(), players, rng)?;

            match check(&placed, rng) {
                Ok(t) => {
                    debug!("City layout accepted after {} layouts", self.layouts);
                    return Ok((placed, t));
                }
                Err(GMError::UnbalancedRegions) => {
                    debug!("    City layout {} starves a region", self.layouts);
                }
                Err(e) => return Err(e),
            }
        }
        Err(GMError::UnbalancedRegions)
    }

    /// Indexes of the faces that are not cities.
    fn plain_faces(&self, faces: &[Face]) -> Vec<usize> {
        faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_city())
            .map(|(i, _)| i)
            .collect()
    }

    /// Restart the placement from scratch, with the smallest spacing, and explore the layouts
    /// depth-first.
    fn backtrack_all<R>(
        &mut self,
        faces: Vec<Face>,
        required: usize,
        rng: &mut R,
    ) -> Result<Vec<Face>, GMError>
    where
        R: Rng + ?Sized,
    {
        let mut faces: Vec<Face> = faces;
        for f in faces.iter_mut() {
            f.face_type = FaceType::Plain;
        }
        let mut candidates: Vec<usize> = self.plain_faces(&faces);
        candidates.shuffle(rng);

        let mut cities: Vec<usize> = Vec::with_capacity(required);
        let mut budget: usize = BACKTRACK_BUDGET;

        self.spacing = 1;
        self.best_placed = 0;
        if self.backtrack(&mut faces, &mut cities, &candidates, 0, required, &mut budget) {
            debug!(
                "Cities = {cities:?}  Iterations = {}  (backtracking)",
                self.iteration
            );
            return Ok(faces);
        }

        debug!(
            "    No more candidates: {} cities placed at most",
            self.best_placed
        );
        Err(GMError::PlacementExhausted {
            placed: self.best_placed,
            required,
        })
    }

    /// Try the candidates from index `from`, and recurse for the remaining cities.
    ///
    /// On failure, the faces and the cities are restored.
    fn backtrack(
        &mut self,
        faces: &mut [Face],
        cities: &mut Vec<usize>,
        candidates: &[usize],
        from: usize,
        required: usize,
        budget: &mut usize,
    ) -> bool {
        self.best_placed = self.best_placed.max(cities.len());
        if cities.len() == required {
            return true;
        }

        for i in from..candidates.len() {
            // Not enough candidates left for the remaining cities
            if candidates.len() - i < required - cities.len() || *budget == 0 {
                return false;
            }
            *budget -= 1;
            self.iteration += 1;

            let c: usize = candidates[i];
            if !self.is_valid(faces, cities, c) {
                continue;
            }
            faces[c].face_type = FaceType::City;
            cities.push(c);
            if self.backtrack(faces, cities, candidates, i + 1, required, budget) {
                return true;
            }
            cities.pop();
            faces[c].face_type = FaceType::Plain;
        }
        false
    }

    /// Whether the given face can become a city.
    fn is_valid(&self, faces: &[Face], cities: &[usize], candidate: usize) -> bool {
        // Spacing with the other cities. Cities that cannot be reached without going through
        // another city are far enough.
        for &city in cities {
            if let Some(d) = distance::distance(faces, self.edges, candidate, city)
                && d <= self.spacing
            {
                return false;
            }
        }

        // The remaining plain faces must stay connected
        let num_plain: usize = faces.iter().filter(|f| !f.is_city()).count() - 1;
        if num_plain == 0 {
            return false;
        }
        let start: Option<usize> = self
            .edges
            .get_faces(candidate)
            .iter()
            .find(|&&f| !faces[f].is_city())
            .copied();
        match start {
            Some(s) => {
                self.edges
                    .count_reachable(s, |f| f != candidate && !faces[f].is_city())
                    == num_plain
            }
            None => false,
        }
    }
}
