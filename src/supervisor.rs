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

//! Task supervision
//!
//! Waits on the sampling loop, the HTTP server and the stop signal. Whichever
//! finishes first decides the outcome; the other tasks are then told to stop
//! and awaited.

use std::future::Future;

use anyhow::{anyhow, Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub async fn supervise<F>(
    mut sampling: JoinHandle<Result<()>>,
    mut server: JoinHandle<w1_error::Result<()>>,
    shutdown: watch::Sender<bool>,
    stop_signal: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let mut sampling_done = false;
    let mut server_done = false;

    let outcome = tokio::select! {
        _ = stop_signal => {
            info!("SIGNAL: Received SIGINT/SIGTERM - initiating shutdown");
            Ok(())
        }
        res = &mut sampling => {
            sampling_done = true;
            // The loop only returns on its own when the sensor directory is unreadable
            res.context("sampling task failed")
                .and_then(|r| r.context("sensor bus unavailable"))
        }
        res = &mut server => {
            server_done = true;
            match res {
                Ok(Ok(())) => Err(anyhow!("HTTP server stopped unexpectedly")),
                Ok(Err(e)) => Err(anyhow::Error::new(e).context("HTTP server failed")),
                Err(e) => Err(anyhow::Error::new(e).context("HTTP server task failed")),
            }
        }
    };

    let _ = shutdown.send(true);

    if !sampling_done {
        match sampling.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Sampling loop failed during shutdown: {:#}", e),
            Err(e) => warn!("Sampling task ended abnormally: {}", e),
        }
    }
    if !server_done {
        match server.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("HTTP server failed during shutdown: {}", e),
            Err(e) => warn!("HTTP server task ended abnormally: {}", e),
        }
    }

    outcome
}
