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

use serde::Serialize;

use crate::checker::{CheckStatus, UrlChecker};
use crate::utils;

/// Result for one (domain, path) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlStatus {
    pub url: String,
    pub status: CheckStatus,
}

/// Expands a domain against the configured paths and checks each URL.
#[derive(Clone)]
pub struct StatusAggregator {
    checker: UrlChecker,
    scheme: &'static str,
}

impl StatusAggregator {
    pub fn new(checker: UrlChecker) -> Self {
        Self {
            checker,
            scheme: "https",
        }
    }

    /// Points the aggregator at plain HTTP targets such as local mock servers.
    #[cfg(test)]
    pub fn with_scheme(mut self, scheme: &'static str) -> Self {
        self.scheme = scheme;
        self
    }

    /// Checks `domain` against every path, one at a time, keeping path order.
    pub async fn aggregate(&self, domain: &str, paths: &[String]) -> Vec<UrlStatus> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            let url = utils::target_url(self.scheme, domain, path);
            let status = self.checker.check(&url).await;
            results.push(UrlStatus { url, status });
        }

        results
    }
}
