/*
 * This file is part of w1-therm-exporter.
 *
 * Copyright (C) 2025 w1-therm-exporter contributors
 *
 * w1-therm-exporter is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * w1-therm-exporter is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with w1-therm-exporter. If not, see <https://www.gnu.org/licenses/>.
 */

//! HTTP exposition endpoint
//!
//! Serves `GET /metrics` for Prometheus scrapers. Each request renders the
//! gauge store as it is at that moment, independent of the sampling cadence.

use std::future::Future;
use std::net::SocketAddr;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, error, info};
use w1_error::{Result, W1Error};

use crate::metrics::TemperatureGauges;

pub const METRICS_PATH: &str = "/metrics";

pub fn router(gauges: TemperatureGauges) -> Router {
    Router::new()
        .route(METRICS_PATH, get(metrics_handler))
        .with_state(gauges)
}

async fn metrics_handler(State(gauges): State<TemperatureGauges>) -> Response {
    debug!("Scrape request");
    match gauges.render() {
        Ok(body) => ([(header::CONTENT_TYPE, gauges.content_type())], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Bind the listener. A failure here is fatal for the process.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| W1Error::Bind { addr, source })
}

/// Serve the router on an already bound listener until `shutdown` resolves
pub async fn run_server<F>(listener: TcpListener, gauges: TemperatureGauges, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Serving metrics on http://{}{}", addr, METRICS_PATH);
    }

    axum::serve(listener, router(gauges))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use w1_core::MetricSink;

    #[tokio::test]
    async fn test_handler_renders_gauges() {
        let gauges = TemperatureGauges::new().unwrap();
        gauges.set("28-000001", 21.3);

        let response = metrics_handler(State(gauges)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("w1_therm_temperature_celsius{sensor_id=\"28-000001\"} 21.3"));
    }

    #[tokio::test]
    async fn test_bind_conflict_reports_address() {
        let first = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let taken = first.local_addr().unwrap();

        let err = bind(taken).await.unwrap_err();
        assert!(matches!(err, W1Error::Bind { .. }));
    }
}
