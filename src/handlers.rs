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

use crate::{config::Settings, state::AppState};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

const INDEX_HTML: &str = include_str!("assets/index.html");

/// Builds the application router.
///
/// Unknown paths get the frontend page, same as `/`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(frontend_handler))
        .route("/config", get(config_handler))
        .route("/status", get(status_handler))
        .fallback(frontend_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// First value of a query parameter. Repeated parameters are not an error.
fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Checks every configured path for the requested domain.
///
/// Always answers 200 once a domain is given, even if every check failed;
/// failures are reported per URL.
pub async fn status_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let domain = match first_param(&params, "domain") {
        Some(d) if !d.is_empty() => d,
        _ => {
            tracing::warn!("Status requested without a domain");
            return (StatusCode::BAD_REQUEST, "Missing domain parameter\n").into_response();
        }
    };

    let statuses = state
        .aggregator
        .aggregate(domain, &state.settings.paths)
        .await;

    Json(statuses).into_response()
}

/// Returns the loaded settings as-is.
pub async fn config_handler(State(state): State<AppState>) -> Json<Settings> {
    Json(Settings::clone(&state.settings))
}

/// Serves the static single-page UI.
pub async fn frontend_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::StatusAggregator;
    use crate::checker::UrlChecker;
    use crate::config::CHECK_TIMEOUT;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(paths: &[&str], domains: &[&str]) -> Router {
        let settings = Settings {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            domains: domains.iter().map(|d| d.to_string()).collect(),
        };
        let aggregator =
            StatusAggregator::new(UrlChecker::new(CHECK_TIMEOUT).unwrap()).with_scheme("http");

        router(AppState {
            settings: Arc::new(settings),
            aggregator,
        })
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn status_without_domain_is_bad_request() {
        for uri in ["/status", "/status?domain=", "/status?other=x"] {
            let (status, _, body) = send_get(app(&["/health"], &[]), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body.trim_end(), "Missing domain parameter");
        }
    }

    #[tokio::test]
    async fn status_uses_first_of_repeated_domains() {
        let (status, _, body) = send_get(
            app(&[], &[]),
            "/status?domain=example.com&domain=example.org",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn status_with_empty_first_domain_is_bad_request() {
        let (status, _, body) =
            send_get(app(&[], &[]), "/status?domain=&domain=example.org").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.trim_end(), "Missing domain parameter");
    }

    #[test]
    fn first_param_picks_the_earliest_match() {
        let params = vec![
            ("other".to_string(), "x".to_string()),
            ("domain".to_string(), "a.example".to_string()),
            ("domain".to_string(), "b.example".to_string()),
        ];

        assert_eq!(first_param(&params, "domain"), Some("a.example"));
        assert_eq!(first_param(&params, "missing"), None);
    }

    #[tokio::test]
    async fn status_with_no_paths_is_empty_array() {
        let (status, content_type, body) =
            send_get(app(&[], &[]), "/status?domain=example.com").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn status_reports_each_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let domain = server.address().to_string();

        let (status, _, body) = send_get(
            app(&["/health", "/down"], &[]),
            &format!("/status?domain={}", domain),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            body,
            json!([
                {"url": format!("http://{}/health", domain), "status": "OK"},
                {"url": format!("http://{}/down", domain), "status": "HTTP 503"},
            ])
        );
    }

    #[tokio::test]
    async fn status_stays_ok_when_checks_time_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;
        let domain = server.address().to_string();

        let (status, _, body) = send_get(
            app(&["/health"], &[]),
            &format!("/status?domain={}", domain),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body[0]["url"], format!("http://{}/health", domain));
        assert!(body[0]["status"].as_str().unwrap().starts_with("ERROR: "));
    }

    #[tokio::test]
    async fn config_round_trips_settings() {
        let (status, content_type, body) = send_get(
            app(&["/health", "/ready"], &["b.example", "a.example"]),
            "/config",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let settings: Settings = serde_json::from_str(&body).unwrap();
        assert_eq!(settings.paths, vec!["/health", "/ready"]);
        assert_eq!(settings.domains, vec!["b.example", "a.example"]);
    }

    #[tokio::test]
    async fn root_serves_frontend() {
        let (status, content_type, body) = send_get(app(&[], &[]), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.contains("URL Health Checker"));
        assert!(body.contains("/config"));
        assert!(body.contains("/status?domain="));
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_frontend() {
        let (status, _, body) = send_get(app(&[], &[]), "/anything/else").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("URL Health Checker"));
    }
}
