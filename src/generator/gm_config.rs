/*
gm_config.rs

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

//! Map configuration given to the generators.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

use super::error::GMError;
use crate::config;

/// Shape of the faces.
///
/// In the serialized configuration, the mode is stored as its numeric tag.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum GMMode {
    #[default]
    Hexagon = 0,
    Square = 1,
    Triangle = 2,
}

impl TryFrom<u8> for GMMode {
    type Error = GMError;

    fn try_from(mode: u8) -> Result<Self, Self::Error> {
        GMMode::from_repr(mode).ok_or(GMError::UnsupportedTopology(mode))
    }
}

impl From<GMMode> for u8 {
    fn from(mode: GMMode) -> u8 {
        mode as u8
    }
}

impl fmt::Display for GMMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GMMode::Hexagon => write!(f, "hexagon"),
            GMMode::Square => write!(f, "square"),
            GMMode::Triangle => write!(f, "triangle"),
        }
    }
}

/// Generation constants.
///
/// Missing fields in a serialized configuration take their default value.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationParams {
    /// Number of faces before adding the faces for the players.
    pub base_faces: usize,

    /// Number of faces for each player.
    pub faces_per_player: usize,

    /// Initial minimum spacing between two cities, relaxed down to 1 when the map is crowded.
    pub min_city_spacing: usize,

    /// Number of random candidates tried for a city before relaxing the spacing.
    pub placement_attempts: usize,

    /// Largest distance between a region seed and the closest city.
    pub city_reach: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            base_faces: config::DEFAULT_BASE_FACES,
            faces_per_player: config::DEFAULT_FACES_PER_PLAYER,
            min_city_spacing: config::DEFAULT_MIN_CITY_SPACING,
            placement_attempts: config::DEFAULT_PLACEMENT_ATTEMPTS,
            city_reach: config::DEFAULT_CITY_REACH,
        }
    }
}

impl GenerationParams {
    /// Number of faces to request from the lattice builder for the given number of players.
    pub fn face_count(&self, players: usize) -> usize {
        self.base_faces
            .saturating_add(self.faces_per_player.saturating_mul(players))
    }
}

/// Map configuration used by the generators.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GMConfig {
    /// `@` for native maps, the others being usernames of custom map creators.
    pub namespace: String,

    /// Map variant in the namespace.
    pub title: String,

    /// Number of players. Drives the size of the map, the number of cities and regions.
    pub players: usize,

    /// Shape of the faces.
    pub mode: GMMode,

    /// Random seed. The same seed always produces the same map.
    /// When not set, a seed is drawn from the thread random generator.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Scaling and spacing constants.
    #[serde(default)]
    pub params: GenerationParams,
}

impl GMConfig {
    /// Create a configuration for the native random map.
    pub fn random(players: usize, mode: GMMode) -> Self {
        Self {
            namespace: config::NATIVE_NAMESPACE.to_string(),
            title: super::NATIVE_RANDOM.to_string(),
            players,
            mode,
            seed: None,
            params: GenerationParams::default(),
        }
    }

    /// Use the given seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use the given generation constants.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}
