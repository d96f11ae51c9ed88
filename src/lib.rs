/*
lib.rs

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

//! Map generator for multiplayer territory-conquest games.
//!
//! The [`generator`] module builds the game map (a [`generator::gm::GM`] object): a lattice of
//! faces (hexagons, squares, or triangles), some of which are cities, split into one contiguous
//! region per player.
//! The same module provides the hop distance between two faces, where cities block the way.
//!
//! The [`settings`] module manages the view settings of the player, and the [`saver`] module
//! stores them on disk.

pub mod config;
pub mod generator;
pub mod saver;
pub mod settings;

pub use generator::error::GMError;
pub use generator::gm::{Face, FaceType, GM};
pub use generator::gm_config::{GMConfig, GMMode, GenerationParams};
pub use generator::{GeneratorRegistry, generate_gm};
