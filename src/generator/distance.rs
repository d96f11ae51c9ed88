/*
distance.rs

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

//! Distance between faces.
//!
//! The distance is the number of moves (hops between adjacent faces) of the shortest path.
//! Cities block the way: a path can end on a city, but it cannot go through one.
//! The starting face is always left, even when it is a city.
//!
//! The search is a breadth-first search; all the moves have the same cost.

use std::collections::VecDeque;

use super::edges;
use super::gm::Face;

/// Return the distance between two faces, or [`None`] when all the paths go through a city.
///
/// Indexes outside the map are never reachable.
pub fn distance(faces: &[Face], edges: &edges::Edges, from: usize, to: usize) -> Option<usize> {
    if from >= faces.len() || to >= faces.len() {
        return None;
    }
    if from == to {
        return Some(0);
    }

    let mut visited: Vec<bool> = vec![false; faces.len()];
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

    visited[from] = true;
    queue.push_back((from, 0));

    while let Some((current, len)) = queue.pop_front() {
        for &next in edges.get_faces(current) {
            if next >= faces.len() || visited[next] {
                continue;
            }
            visited[next] = true;
            if next == to {
                return Some(len + 1);
            }
            // Cities are destinations only
            if faces[next].is_city() {
                continue;
            }
            queue.push_back((next, len + 1));
        }
    }
    None
}

/// Return, for each face, the distance to the closest of the given faces.
///
/// The same rule as [`distance`] applies: cities get a distance, but paths do not go through
/// them. Source faces are always left, even when they are cities.
pub fn distance_map(faces: &[Face], edges: &edges::Edges, sources: &[usize]) -> Vec<Option<usize>> {
    let mut dist: Vec<Option<usize>> = vec![None; faces.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for &s in sources.iter().filter(|&&s| s < faces.len()) {
        if dist[s].is_none() {
            dist[s] = Some(0);
            queue.push_back(s);
        }
    }

    while let Some(current) = queue.pop_front() {
        let len: usize = dist[current].unwrap_or(0);
        let is_source: bool = len == 0;

        if !is_source && faces[current].is_city() {
            continue;
        }
        for &next in edges.get_faces(current) {
            if next >= faces.len() || dist[next].is_some() {
                continue;
            }
            dist[next] = Some(len + 1);
            queue.push_back(next);
        }
    }
    dist
}
