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

use std::io;
use std::time::Duration;
use tokio::process::Command;

/// Command used to hand a URL to the desktop's default browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOpener {
    program: &'static str,
    args: &'static [&'static str],
}

impl BrowserOpener {
    /// Picks the opener for an OS name as reported by `std::env::consts::OS`.
    pub fn for_os(os: &str) -> Self {
        match os {
            "windows" => Self {
                program: "rundll32",
                args: &["url.dll,FileProtocolHandler"],
            },
            "macos" => Self {
                program: "open",
                args: &[],
            },
            _ => Self {
                program: "xdg-open",
                args: &[],
            },
        }
    }

    pub fn for_current_platform() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Starts the opener without waiting for it to exit.
    pub fn open(&self, url: &str) -> io::Result<()> {
        Command::new(self.program).args(self.args).arg(url).spawn()?;
        Ok(())
    }

    /// Opens `url` after `delay` on a background task. Failures are only logged.
    pub fn spawn_delayed(self, url: String, delay: Duration) {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match self.open(&url) {
                Ok(()) => tracing::info!(program = self.program, %url, "Opened browser"),
                Err(e) => tracing::warn!(program = self.program, error = %e, "Failed to open browser"),
            }
        });
    }
}
