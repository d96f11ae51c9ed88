/*
prop_settings.rs

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

//! Property-based tests for the settings storage.

use proptest::prelude::*;
use serde_json::{Value, json};
use std::fs;

use tessera::saver::settings::SaverSettings;
use tessera::settings::{self, Camera, MapView, Settings};

fn any_settings() -> impl Strategy<Value = Settings> {
    (
        (1.0f64..179.0, 0.01f64..10.0, 100.0f64..5000.0),
        (5.0f64..100.0, 0.5f64..10.0),
        any::<bool>(),
    )
        .prop_map(|((fov, near, far), (radius, max_text_size), antialias)| {
            let mut s: Settings = Settings::default();
            s.game.view.camera = Camera { fov, near, far };
            s.game.view.map = MapView {
                radius,
                max_text_size,
                ..MapView::default()
            };
            s.game.view.antialias = antialias;
            s
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stored_settings_are_restored(s in any_settings()) {
        let text = settings::encode(&s).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let partial = settings::decode(&text).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(Settings::from_partial(&partial).ok(), Some(s));
    }

    #[test]
    fn partial_camera_keeps_other_defaults(fov in 1.0f64..179.0) {
        let partial: Value = json!({"game": {"view": {"camera": {"fov": fov}}}});
        let s = Settings::from_partial(&partial).map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(s.game.view.camera.fov, fov);
        prop_assert_eq!(s.game.view.camera.far, Camera::default().far);
        prop_assert_eq!(s.game.view.map, MapView::default());
        prop_assert!(s.game.view.antialias);
    }

    #[test]
    fn garbage_files_are_replaced_by_defaults(garbage in "[ -~]{0,64}") {
        let dir = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let saver = SaverSettings::new(dir.path().to_path_buf());
        fs::write(saver.path(), &garbage).map_err(|e| TestCaseError::fail(e.to_string()))?;

        // Some strings happen to be valid base64 of a valid deflate stream, but never of a
        // JSON object.
        prop_assert_eq!(saver.load(), Settings::default());
        let reloaded = SaverSettings::new(dir.path().to_path_buf()).load();
        prop_assert_eq!(reloaded, Settings::default());
    }
}

#[test]
fn empty_partial_gives_the_defaults() {
    assert_eq!(
        Settings::from_partial(&Settings::empty_partial()).unwrap(),
        Settings::default()
    );
}

#[test]
fn wrong_type_is_rejected() {
    let partial: Value = json!({"game": {"view": {"antialias": "yes"}}});
    assert!(Settings::from_partial(&partial).is_err());
}
