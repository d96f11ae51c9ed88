/*
generator.rs

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

//! Generate game maps.
//!
//! A map is requested with a [`gm_config::GMConfig`] object, which gives the namespace and the
//! title of the map, the number of players, and the shape of the faces.
//! The [`GeneratorRegistry`] object maps the namespace and the title to a generator function.
//! Only the native random map, [`random_map::generate_random_gm`], is available for now.
//! Other namespaces are reserved for custom maps.
//!
//! The random map is built in three steps, each step consuming the result of the previous one:
//!
//! * [`lattice::Lattice::build`] creates the faces and the edges for the requested shape.
//! * [`cities::CityPlacement::place`] turns some faces into cities.
//! * [`regions::assign`] splits the remaining faces into one region per player.
//!
//! The resulting [`gm::GM`] object cannot be modified.
//! Game logic uses [`gm::GM::distance`] (see the [`distance`] module) to compute the number of
//! moves between two faces.

pub mod cities;
pub mod distance;
pub mod edges;
pub mod error;
pub mod gm;
pub mod gm_config;
pub mod lattice;
pub mod random_map;
pub mod regions;

use log::debug;
use std::collections::HashMap;

use crate::config::NATIVE_NAMESPACE;
use error::GMError;
use gm::GM;
use gm_config::GMConfig;

/// Currently-supported native maps.
pub const NATIVE_RANDOM: &str = "random";

/// Map generator function.
pub type GeneratorFn = fn(&GMConfig) -> Result<GM, GMError>;

/// List of the map generators, indexed by namespace and title.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<(String, String), GeneratorFn>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Create the registry with the native maps.
    pub fn native() -> Self {
        let mut registry: GeneratorRegistry = Self::new();
        registry.register(
            NATIVE_NAMESPACE,
            NATIVE_RANDOM,
            random_map::generate_random_gm,
        );
        registry
    }

    /// Add or replace a generator.
    pub fn register(&mut self, namespace: &str, title: &str, generator: GeneratorFn) {
        self.generators
            .insert((namespace.to_string(), title.to_string()), generator);
    }

    /// Return the generator for the given namespace and title.
    pub fn get(&self, namespace: &str, title: &str) -> Option<GeneratorFn> {
        self.generators
            .get(&(namespace.to_string(), title.to_string()))
            .copied()
    }

    /// List the namespace and title of the registered generators.
    pub fn list(&self) -> Vec<(String, String)> {
        let mut l: Vec<(String, String)> = self.generators.keys().cloned().collect();
        l.sort();
        l
    }

    /// Generate the map described by the configuration.
    ///
    /// # Errors
    ///
    /// The method returns [`GMError::Unimplemented`] when no generator is registered for the
    /// namespace and the title, or the error from the generator.
    pub fn generate(&self, config: &GMConfig) -> Result<GM, GMError> {
        match self.get(&config.namespace, &config.title) {
            Some(generator) => generator(config),
            None => {
                debug!("No generator for {}/{}", config.namespace, config.title);
                Err(GMError::Unimplemented {
                    namespace: config.namespace.clone(),
                    title: config.title.clone(),
                })
            }
        }
    }
}

/// Generate the map described by the configuration, by using the native generators.
///
/// # Errors
///
/// See [`GeneratorRegistry::generate`].
pub fn generate_gm(config: &GMConfig) -> Result<GM, GMError> {
    GeneratorRegistry::native().generate(config)
}
