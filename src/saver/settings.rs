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

//! Save and restore the view settings.
//!
//! The settings are stored in the `settings.dat` file, in the format produced by
//! [`settings::encode`].
//! The file can contain partial settings; missing values are taken from the defaults.
//!
//! Loading never fails: when the file is missing or cannot be decoded, the default settings are
//! saved and returned.

use log::{debug, warn};
use serde::Serialize;
use std::error::Error;
use std::fs::{self, File, remove_file};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::SETTINGS_FILE;
use crate::settings::{self, Settings};

/// Object to save and restore the settings.
pub struct SaverSettings {
    /// Absolute path to the settings file.
    save_file: PathBuf,
}

impl SaverSettings {
    /// Create a [`SaverSettings`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the settings must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(SETTINGS_FILE);
        debug!("Settings file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Path to the settings file.
    pub fn path(&self) -> &PathBuf {
        &self.save_file
    }

    /// Retrieve the settings.
    ///
    /// When the settings file cannot be used, the default settings replace its content.
    pub fn load(&self) -> Settings {
        match self.read() {
            Ok(s) => s,
            Err(e) => {
                debug!("Cannot use the settings file {:?}: {e}", self.save_file);
                let defaults: Settings = Settings::default();
                if let Err(e) = self.save(&defaults) {
                    warn!("Cannot save the settings file {:?}: {e}", self.save_file);
                }
                defaults
            }
        }
    }

    /// Read, decode, and complete the saved settings.
    fn read(&self) -> Result<Settings, Box<dyn Error>> {
        let text: String = fs::read_to_string(&self.save_file)?;
        let partial = settings::decode(&text)?;
        let s: Settings = Settings::from_partial(&partial)?;
        Ok(s)
    }

    /// Save the provided settings, which can be partial.
    pub fn save<T>(&self, settings: &T) -> Result<(), Box<dyn Error>>
    where
        T: Serialize + ?Sized,
    {
        let text: String = settings::encode(settings)?;
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the settings file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
