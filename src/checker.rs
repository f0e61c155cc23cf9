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

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, Serializer};

use crate::utils;

/// Outcome of a single URL check.
///
/// Serialized as its display form: `OK`, `HTTP <code>` or `ERROR: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Http(u16),
    Error(String),
}

impl CheckStatus {
    /// Any status in `[200, 400)` counts as reachable.
    pub fn from_status_code(code: u16) -> Self {
        if (200..400).contains(&code) {
            CheckStatus::Ok
        } else {
            CheckStatus::Http(code)
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Ok => f.write_str("OK"),
            CheckStatus::Http(code) => write!(f, "HTTP {}", code),
            CheckStatus::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

impl Serialize for CheckStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Issues one bounded GET per URL and classifies the result.
#[derive(Clone)]
pub struct UrlChecker {
    client: Client,
}

impl UrlChecker {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Checks `url` once. Never retries and never fails; transport problems
    /// become [`CheckStatus::Error`].
    pub async fn check(&self, url: &str) -> CheckStatus {
        tracing::info!(url, "Checking");

        let status = match self.client.get(url).send().await {
            Ok(mut resp) => {
                let status = CheckStatus::from_status_code(resp.status().as_u16());
                // Drain chunk by chunk so the connection can go back to the pool.
                loop {
                    match resp.chunk().await {
                        Ok(Some(_)) => {}
                        Ok(None) => break,
                        Err(e) => {
                            tracing::debug!(url, error = %e, "Failed to drain response body");
                            break;
                        }
                    }
                }
                status
            }
            Err(e) => {
                tracing::warn!(url, timeout = e.is_timeout(), error = %e, "Request failed");
                CheckStatus::Error(utils::describe_error(&e))
            }
        };

        tracing::info!(url, status = %status, "Check finished");
        status
    }
}
