/*
lattice.rs

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

//! Build the lattice of faces and its edges.
//!
//! The lattice is a rectangle of `width` columns and `height` rows.
//! Faces are numbered row by row, starting from the top left corner:
//!
//! ```text
//! Hexagon (odd rows shifted)   Square        Triangle (^ up, v down)
//!  0   1   2   3               0 1 2 3       ^0 v1 ^2 v3
//!    4   5   6   7             4 5 6 7       v4 ^5 v6 ^7
//!  8   9  10  11               8 9 10 11     ^8 v9 ^10 v11
//! ```
//!
//! - A hexagon has up to six neighbors: west, north-west, north-east, east, south-east, and
//!   south-west.
//! - A square has up to four neighbors: north, west, east, and south.
//! - A triangle has up to three neighbors: west, east, and the face that shares its horizontal
//!   side (below for a triangle pointing up, above for a triangle pointing down).

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};

use super::edges;
use super::gm::Face;
use super::gm_config::GMMode;

/// Lattice of faces, before cities and regions are assigned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    /// Shape of the faces.
    pub mode: GMMode,

    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// Faces, all plain.
    pub faces: Vec<Face>,

    /// Edges between faces.
    pub edges: edges::Edges,
}

impl Lattice {
    /// Build a lattice with at least `face_count` faces.
    ///
    /// The lattice is as square as possible, and its rows are complete, so that the number of
    /// faces can be slightly larger than requested.
    pub fn build(mode: GMMode, face_count: usize) -> Self {
        let (width, height) = Self::dimensions(face_count);
        let num_faces: usize = width * height;
        let mut edges: edges::Edges = edges::Edges::new(num_faces);

        for y in 0..height {
            for x in 0..width {
                let mut e: Vec<usize> = Vec::with_capacity(6);

                match mode {
                    GMMode::Hexagon => Self::hexagon_edges(&mut e, x, y, width, height),
                    GMMode::Square => Self::square_edges(&mut e, x, y, width, height),
                    GMMode::Triangle => Self::triangle_edges(&mut e, x, y, width, height),
                }
                edges.push_from_array(y * width + x, &e);
            }
        }

        if log_enabled!(Level::Debug) {
            debug!("Lattice mode: {mode}");
            debug!("  Number of faces: {num_faces} (requested {face_count})");
            debug!("            width: {width}");
            debug!("           height: {height}");
            edges.debug();
        }

        Self {
            mode,
            width,
            height,
            faces: vec![Face::plain(); num_faces],
            edges,
        }
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether the lattice has no face.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Return the number of columns and rows for the given number of faces.
    ///
    /// The width is never smaller than the height, and the grid has at least two columns as soon
    /// as it has more than one face. With a single column, triangles would not be connected.
    fn dimensions(face_count: usize) -> (usize, usize) {
        if face_count == 0 {
            return (0, 0);
        }
        let mut width: usize = face_count.isqrt();
        if width * width < face_count {
            width += 1;
        }
        let height: usize = face_count.div_ceil(width);
        (width, height)
    }

    /// Add a face to an array of edges.
    fn push_edge(e: &mut Vec<usize>, x: usize, y: usize, width: usize) {
        e.push(y * width + x);
    }

    /// Hexagons in "odd-r" layout: the odd rows are shifted to the right by half a face.
    fn hexagon_edges(e: &mut Vec<usize>, x: usize, y: usize, width: usize, height: usize) {
        // Column of the north-west and south-west neighbors. The north-east and south-east
        // neighbors are in the next column.
        let left: Option<usize> = if y % 2 == 0 { x.checked_sub(1) } else { Some(x) };

        // West
        if x > 0 {
            Self::push_edge(e, x - 1, y, width);
        }

        // Row above the current face
        if y > 0 {
            // North-west
            if let Some(l) = left {
                Self::push_edge(e, l, y - 1, width);
            }
            // North-east
            let r: usize = left.map_or(0, |l| l + 1);
            if r < width {
                Self::push_edge(e, r, y - 1, width);
            }
        }

        // East
        if x + 1 < width {
            Self::push_edge(e, x + 1, y, width);
        }

        // Row below the current face
        if y + 1 < height {
            // South-east
            let r: usize = left.map_or(0, |l| l + 1);
            if r < width {
                Self::push_edge(e, r, y + 1, width);
            }
            // South-west
            if let Some(l) = left {
                Self::push_edge(e, l, y + 1, width);
            }
        }
    }

    /// Squares.
    fn square_edges(e: &mut Vec<usize>, x: usize, y: usize, width: usize, height: usize) {
        // North
        if y > 0 {
            Self::push_edge(e, x, y - 1, width);
        }
        // West
        if x > 0 {
            Self::push_edge(e, x - 1, y, width);
        }
        // East
        if x + 1 < width {
            Self::push_edge(e, x + 1, y, width);
        }
        // South
        if y + 1 < height {
            Self::push_edge(e, x, y + 1, width);
        }
    }

    /// Triangles, alternating orientation.
    fn triangle_edges(e: &mut Vec<usize>, x: usize, y: usize, width: usize, height: usize) {
        let points_up: bool = (x + y) % 2 == 0;

        // Above, for a triangle pointing down
        if !points_up && y > 0 {
            Self::push_edge(e, x, y - 1, width);
        }
        // West
        if x > 0 {
            Self::push_edge(e, x - 1, y, width);
        }
        // East
        if x + 1 < width {
            Self::push_edge(e, x + 1, y, width);
        }
        // Below, for a triangle pointing up
        if points_up && y + 1 < height {
            Self::push_edge(e, x, y + 1, width);
        }
    }
}
