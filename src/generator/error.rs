/*
error.rs

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

//! Map generation errors.
//!
//! All the errors are fatal to the generation call: no partial map is ever returned.

use std::fmt;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GMError {
    /// The topology tag is not one of the known tessellations.
    UnsupportedTopology(u8),

    /// The map is too small to place the cities with the required spacing.
    PlacementExhausted {
        /// Number of cities placed before giving up.
        placed: usize,
        /// Number of cities the player count requires.
        required: usize,
    },

    /// More players than faces that can be assigned to regions.
    InsufficientFaces {
        /// Requested number of players.
        players: usize,
        /// Number of non-city faces.
        faces: usize,
    },

    /// No generator registered for the namespace and title.
    Unimplemented {
        /// Map namespace.
        namespace: String,
        /// Map title in the namespace.
        title: String,
    },

    /// The map configuration does not request any player.
    NoPlayers,

    /// Some non-city faces cannot be reached from the region seeds.
    UnreachableFaces {
        /// Number of faces left without a region.
        count: usize,
    },

    /// Region sizes cannot be evened out.
    UnbalancedRegions,
}

impl fmt::Display for GMError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GMError::UnsupportedTopology(mode) => write!(f, "unsupported topology: {mode}"),
            GMError::PlacementExhausted { placed, required } => write!(
                f,
                "cannot place the cities: {placed} placed out of {required} required"
            ),
            GMError::InsufficientFaces { players, faces } => write!(
                f,
                "not enough faces for {players} players: {faces} faces available"
            ),
            GMError::Unimplemented { namespace, title } => {
                write!(f, "unimplemented map: {namespace}/{title}")
            }
            GMError::NoPlayers => write!(f, "at least one player is required"),
            GMError::UnreachableFaces { count } => {
                write!(f, "{count} faces cannot be reached from the region seeds")
            }
            GMError::UnbalancedRegions => write!(f, "cannot balance the region sizes"),
        }
    }
}

impl std::error::Error for GMError {}
