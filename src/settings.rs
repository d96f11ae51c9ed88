/*
settings.rs

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

//! View settings of the player.
//!
//! The [`Settings`] object stores the camera, the controls, and the map display settings.
//! Saved settings can be partial: [`merge`] completes a partial JSON object with the values of a
//! complete object, so that settings saved by an older version, or edited by hand, are still
//! usable.
//!
//! Settings are stored as text: [`encode`] serializes the object in JSON, compresses it, and
//! converts the result to base64. [`decode`] does the reverse.
//! See the [`crate::saver::settings`] module that saves and restores the settings.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::io::{Read, Write};

/// Camera settings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov: f64,

    /// Near clipping plane.
    pub near: f64,

    /// Far clipping plane.
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 1.0,
            far: 1200.0,
        }
    }
}

/// Camera controls.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub damping_factor: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub zoom_speed: f64,
    pub rotate_speed: f64,
    pub pan_speed: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            damping_factor: 0.2,
            min_distance: 200.0,
            max_distance: 1000.0,
            zoom_speed: 2.1,
            rotate_speed: 0.8,
            pan_speed: 1.1,
        }
    }
}

/// Map display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Radius of a face.
    pub radius: f64,

    /// Largest size of the text drawn on a face.
    pub max_text_size: f64,

    /// Smallest size of the text drawn on a face.
    pub min_text_size: f64,

    /// Size of the images drawn on a face.
    pub image_size: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            radius: 20.0,
            max_text_size: 7.0,
            min_text_size: 1.0,
            image_size: 20.0,
        }
    }
}

/// Game view settings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub camera: Camera,
    pub controls: Controls,
    pub antialias: bool,
    pub map: MapView,
}

impl Default for View {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            controls: Controls::default(),
            antialias: true,
            map: MapView::default(),
        }
    }
}

/// Game settings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Game {
    pub view: View,
}

/// All the settings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Settings {
    pub game: Game,
}

/// Recursively copy the fields of `partial` over `base`.
///
/// Objects are merged field by field. Any other value in `partial` replaces the value in
/// `base`. Fields that `base` does not have are ignored.
fn merge_value(base: &mut Value, partial: &Value) {
    match (base, partial) {
        (Value::Object(b), Value::Object(p)) => {
            for (key, value) in b.iter_mut() {
                if let Some(pv) = p.get(key) {
                    merge_value(value, pv);
                }
            }
        }
        (b, p) => *b = p.clone(),
    }
}

/// Complete a partial object with the values of a complete object.
///
/// Every field present in `partial` overrides the value from `defaults`, and every missing
/// field keeps its value from `defaults`, recursively.
///
/// # Errors
///
/// The function returns an error if a field in `partial` does not have the expected type.
pub fn merge<T>(defaults: &T, partial: &Value) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut value: Value = serde_json::to_value(defaults)?;
    merge_value(&mut value, partial);
    serde_json::from_value(value)
}

/// Serialize and compress the given object into a text string.
pub fn encode<T>(settings: &T) -> Result<String, Box<dyn Error>>
where
    T: Serialize + ?Sized,
{
    let json: Vec<u8> = serde_json::to_vec(settings)?;
    let mut encoder: DeflateEncoder<Vec<u8>> = DeflateEncoder::new(Vec::new(), Compression::best());

    encoder.write_all(&json)?;
    Ok(STANDARD.encode(encoder.finish()?))
}

/// Decode a text string created by [`encode`] into a JSON value.
///
/// The value can describe partial settings. Use [`merge`] to complete it.
pub fn decode(text: &str) -> Result<Value, Box<dyn Error>> {
    let compressed: Vec<u8> = STANDARD.decode(text.trim())?;
    let mut decoder: DeflateDecoder<&[u8]> = DeflateDecoder::new(&compressed[..]);
    let mut json: Vec<u8> = Vec::new();

    decoder.read_to_end(&mut json)?;
    let value: Value = serde_json::from_slice(&json)?;
    if !value.is_object() {
        return Err("the settings are not a JSON object".into());
    }
    Ok(value)
}

impl Settings {
    /// Complete partial settings with the default values.
    ///
    /// # Errors
    ///
    /// See [`merge`].
    pub fn from_partial(partial: &Value) -> Result<Self, serde_json::Error> {
        merge(&Settings::default(), partial)
    }

    /// Return an empty partial object, which produces the default settings once merged.
    pub fn empty_partial() -> Value {
        Value::Object(Map::new())
    }
}
