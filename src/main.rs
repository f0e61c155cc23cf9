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

mod aggregator;
mod browser;
mod checker;
mod config;
mod handlers;
mod state;
mod utils;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::aggregator::StatusAggregator;
use crate::browser::BrowserOpener;
use crate::checker::UrlChecker;
use crate::config::{BIND_ADDR, BROWSER_DELAY, CHECK_TIMEOUT, PUBLIC_URL, SETTINGS_FILE, Settings};
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match Settings::load(Path::new(SETTINGS_FILE)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        paths = settings.paths.len(),
        domains = settings.domains.len(),
        "Loaded {}",
        SETTINGS_FILE
    );

    let checker = match UrlChecker::new(CHECK_TIMEOUT) {
        Ok(checker) => checker,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = AppState {
        settings: Arc::new(settings),
        aggregator: StatusAggregator::new(checker),
    };
    let app = handlers::router(state);

    tracing::info!("Server running on {}", PUBLIC_URL);

    BrowserOpener::for_current_platform().spawn_delayed(PUBLIC_URL.to_string(), BROWSER_DELAY);

    let listener = match tokio::net::TcpListener::bind(BIND_ADDR).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to start server on {}: {}", BIND_ADDR, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
