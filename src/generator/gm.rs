/*
gm.rs

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

//! Game map.
//!
//! A [`GM`] object groups the faces of the map and the edges between them.
//! Faces are identified by their index in the face array, and the edges use the same indexes.
//! The object cannot be modified after the generator returns it.

use serde::{Deserialize, Serialize};

use super::distance;
use super::edges;
use super::gm_config::GMMode;

/// Type of a face.
///
/// - A `Plain` face is a regular land tile, owned by one of the player regions.
/// - A `City` face is a stronghold. It does not belong to any region, and moving through a city
///   is not possible: it can only be the destination of a move.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum FaceType {
    #[default]
    Plain,
    City,
}

/// A single tile of the map.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Face {
    /// Type of the face.
    pub face_type: FaceType,

    /// Region the face was assigned to during generation. Always [`None`] for cities.
    pub owner_region: Option<usize>,
}

impl Face {
    /// Create a plain face that is not assigned to any region yet.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Whether the face is a city.
    pub fn is_city(&self) -> bool {
        self.face_type == FaceType::City
    }
}

/// Game map.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GM {
    /// Shape of the faces.
    mode: GMMode,

    /// Number of columns in the lattice.
    width: usize,

    /// Number of rows in the lattice.
    height: usize,

    /// Faces of the map.
    faces: Vec<Face>,

    /// Edges between faces.
    edges: edges::Edges,

    /// Seed face of each region. The vector index is the region index.
    seeds: Vec<usize>,
}

impl GM {
    /// Create a [`GM`] object.
    ///
    /// Only the generators create maps.
    pub(crate) fn new(
        mode: GMMode,
        width: usize,
        height: usize,
        faces: Vec<Face>,
        edges: edges::Edges,
        seeds: Vec<usize>,
    ) -> Self {
        Self {
            mode,
            width,
            height,
            faces,
            edges,
            seeds,
        }
    }

    /// Shape of the faces.
    pub fn mode(&self) -> GMMode {
        self.mode
    }

    /// Number of columns in the lattice.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows in the lattice.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether the map has no face.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Return a reference to the face array.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Return the face at the given index.
    pub fn face(&self, face: usize) -> Option<&Face> {
        self.faces.get(face)
    }

    /// Return a reference to the edges.
    pub fn edges(&self) -> &edges::Edges {
        &self.edges
    }

    /// Return the faces adjacent to the given face.
    pub fn neighbors(&self, face: usize) -> &[usize] {
        self.edges.get_faces(face)
    }

    /// Return the lattice coordinates (column, row) of the given face.
    ///
    /// Faces are numbered row by row. How the coordinates translate to screen positions depends
    /// on the mode: hexagon rows with an odd index are shifted by half a face to the right, and
    /// triangles point up when the sum of the column and the row is even.
    pub fn coordinates(&self, face: usize) -> Option<(usize, usize)> {
        if face >= self.faces.len() || self.width == 0 {
            None
        } else {
            Some((face % self.width, face / self.width))
        }
    }

    /// Number of player regions.
    pub fn players(&self) -> usize {
        self.seeds.len()
    }

    /// Seed face of each region.
    pub fn seeds(&self) -> &[usize] {
        &self.seeds
    }

    /// Indexes of the city faces.
    pub fn cities(&self) -> Vec<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_city())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indexes of the faces in the given region.
    pub fn region(&self, region: usize) -> Vec<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.owner_region == Some(region))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of faces in each region.
    pub fn region_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = vec![0; self.seeds.len()];
        for r in self.faces.iter().filter_map(|f| f.owner_region) {
            if let Some(s) = sizes.get_mut(r) {
                *s += 1;
            }
        }
        sizes
    }

    /// Number of moves between two faces, or [`None`] if the destination cannot be reached.
    ///
    /// See [`distance::distance`].
    pub fn distance(&self, from: usize, to: usize) -> Option<usize> {
        distance::distance(&self.faces, &self.edges, from, to)
    }
}
