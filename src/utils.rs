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

use std::error::Error;

/// Builds the URL checked for a domain and path suffix.
///
/// Neither part is validated; a malformed domain surfaces later as a
/// transport error.
pub fn target_url(scheme: &str, domain: &str, path: &str) -> String {
    format!("{}://{}{}", scheme, domain, path)
}

/// Renders an error together with its whole `source()` chain.
///
/// reqwest keeps the interesting part (timeout, refused connection, DNS) in
/// the sources, so the top-level message alone is not enough. A cause is
/// skipped only when the link above it already ends with the same text.
pub fn describe_error(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut previous = message.clone();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !previous.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        previous = text;
        source = cause.source();
    }

    message
}
