/*
config.rs

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

//! Build-wide constants.

/// Notice printed by `tessera --version`.
pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 The Tessera Authors
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Namespace of the maps that come with Tessera.
pub const NATIVE_NAMESPACE: &str = "@";

/// Name of the file, in the data directory, that stores the settings.
pub const SETTINGS_FILE: &str = "settings.dat";

/// Number of faces in a map, before adding the faces for the players.
pub const DEFAULT_BASE_FACES: usize = 16;

/// Number of faces added to the map for each player.
pub const DEFAULT_FACES_PER_PLAYER: usize = 24;

/// Initial minimum distance between two cities.
/// Cities are placed farther than this distance from each other when possible. The distance is
/// then relaxed down to 1 (cities never touch).
pub const DEFAULT_MIN_CITY_SPACING: usize = 3;

/// Number of random candidates tried for a city before relaxing the spacing.
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 64;

/// Largest distance between a region seed and the closest city.
/// Every region therefore has a city within reach. The distance grows when there are not enough
/// faces that close to the cities for all the seeds.
pub const DEFAULT_CITY_REACH: usize = 4;
