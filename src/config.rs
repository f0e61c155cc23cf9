/*
 * Copyright (C) 2025 Jakub Žitník
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 */

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings file read from the working directory at startup.
pub const SETTINGS_FILE: &str = "appsettings.json";

/// Address the HTTP listener binds to.
pub const BIND_ADDR: &str = "0.0.0.0:8080";

/// URL opened in the browser once the server is up.
pub const PUBLIC_URL: &str = "http://localhost:8080";

/// Upper bound for a single URL check.
pub const CHECK_TIMEOUT: Duration = Duration::from_millis(800);

/// Delay before the browser is launched.
pub const BROWSER_DELAY: Duration = Duration::from_secs(1);

/// Paths and domains to check.
///
/// Loaded once and never modified afterwards. Missing fields decode to empty
/// lists and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path suffixes appended to every domain, e.g. `/health`.
    #[serde(default)]
    pub paths: Vec<String>,
    /// Bare hostnames offered in the UI.
    #[serde(default)]
    pub domains: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Error opening {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error decoding {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Settings {
    /// Reads and decodes the settings document at `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let file = File::open(path).map_err(|source| SettingsError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
