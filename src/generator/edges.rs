/*
edges.rs

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

//! Edges between faces in the map graph.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Represent the edges in the map graph.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Edges {
    /// For each face, the list of the adjacent faces, in the order of the lattice directions.
    ///
    /// The vector index is the face index, therefore the vector always covers all the faces of
    /// the map.
    edges: Vec<Vec<usize>>,
}

impl Edges {
    /// Create the edge object for the given number of faces, without any edge.
    pub fn new(num_faces: usize) -> Self {
        Self {
            edges: vec![Vec::new(); num_faces],
        }
    }

    /// Set all the adjacent faces of the given face.
    pub fn push_from_array(&mut self, face: usize, adjacent_face_array: &[usize]) {
        if face >= self.edges.len() {
            self.edges.resize(face + 1, Vec::new());
        }
        // Because the method is used in a loop to initialize all the faces, it is not necessary
        // to create the edges in both directions.
        self.edges[face] = adjacent_face_array.to_vec();
    }

    /// Number of faces covered by the object.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the object does not cover any face.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// For the given face, return all the adjacent faces.
    pub fn get_faces(&self, face: usize) -> &[usize] {
        match self.edges.get(face) {
            Some(a) => a,
            None => &[],
        }
    }

    /// Number of adjacent faces of the given face.
    pub fn num_edges(&self, face: usize) -> usize {
        self.get_faces(face).len()
    }

    /// Whether two faces are adjacent.
    pub fn is_adjacent(&self, face1: usize, face2: usize) -> bool {
        self.get_faces(face1).contains(&face2)
    }

    /// Whether every edge exists in both directions, with no self loops, no duplicates, and no
    /// reference to a face outside the object.
    pub fn is_symmetric(&self) -> bool {
        for (f1, adjacent) in self.edges.iter().enumerate() {
            for (i, f2) in adjacent.iter().enumerate() {
                if *f2 == f1 || *f2 >= self.edges.len() || adjacent[..i].contains(f2) {
                    return false;
                }
                if !self.is_adjacent(*f2, f1) {
                    return false;
                }
            }
        }
        true
    }

    /// Count the faces that can be reached from `start` by moving only through the faces for
    /// which `allowed` returns `true`.
    ///
    /// The starting face is counted if it is allowed, otherwise the method returns 0.
    pub fn count_reachable<F>(&self, start: usize, allowed: F) -> usize
    where
        F: Fn(usize) -> bool,
    {
        if start >= self.edges.len() || !allowed(start) {
            return 0;
        }

        let mut visited: Vec<bool> = vec![false; self.edges.len()];
        let mut queue: VecDeque<usize> = VecDeque::new();
        let mut count: usize = 1;

        visited[start] = true;
        queue.push_back(start);
        while let Some(f1) = queue.pop_front() {
            for &f2 in self.get_faces(f1) {
                if f2 >= visited.len() || visited[f2] || !allowed(f2) {
                    continue;
                }
                visited[f2] = true;
                count += 1;
                queue.push_back(f2);
            }
        }
        count
    }

    /// Whether all the faces are connected.
    pub fn is_connected(&self) -> bool {
        self.edges.is_empty() || self.count_reachable(0, |_| true) == self.edges.len()
    }

    /// Print the edges.
    pub fn debug(&self) {
        let mut s: String = String::new();

        for (f1, e) in self.edges.iter().enumerate() {
            s.clear();
            s.push_str(&format!("{f1:>3} -->"));
            for f2 in e {
                s.push_str(&format!(" {f2}"));
            }
            debug!("{s}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0 - 1 - 2   3
    fn sample() -> Edges {
        let mut e = Edges::new(4);
        e.push_from_array(0, &[1]);
        e.push_from_array(1, &[0, 2]);
        e.push_from_array(2, &[1]);
        e
    }

    #[test]
    fn test_get_faces() {
        let e = sample();
        assert_eq!(e.len(), 4);
        assert_eq!(e.get_faces(1), &[0, 2]);
        assert!(e.get_faces(3).is_empty());
        assert!(e.get_faces(42).is_empty());
        assert_eq!(e.num_edges(1), 2);
        assert!(e.is_adjacent(2, 1));
        assert!(!e.is_adjacent(0, 2));
    }

    #[test]
    fn test_symmetry() {
        let mut e = sample();
        assert!(e.is_symmetric());

        e.push_from_array(3, &[2]);
        assert!(!e.is_symmetric());

        e.push_from_array(2, &[1, 3]);
        assert!(e.is_symmetric());

        e.push_from_array(3, &[2, 3]);
        assert!(!e.is_symmetric());
    }

    #[test]
    fn test_reachable() {
        let e = sample();
        assert_eq!(e.count_reachable(0, |_| true), 3);
        assert_eq!(e.count_reachable(0, |f| f != 1), 1);
        assert_eq!(e.count_reachable(1, |f| f != 1), 0);
        assert!(!e.is_connected());
        assert!(Edges::default().is_connected());
    }
}
