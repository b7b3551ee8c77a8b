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

//! Sampling loop
//!
//! Drives [`Sampler`] forever: one cycle on the blocking pool, then a pause.
//! The pause wakes early when shutdown is signalled.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::watch;
use tracing::{debug, info};
use w1_core::{MetricSink, Sampler};

pub async fn run_sampling_loop<S>(
    mut sampler: Sampler<S>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()>
where
    S: MetricSink + Send + 'static,
{
    info!(
        dir = %sampler.bus().devices_dir().display(),
        interval_secs = interval.as_secs(),
        "Sampling loop starting"
    );

    loop {
        if *shutdown.borrow() {
            break;
        }

        // sysfs reads block, keep them off the async workers
        let (returned, result) = tokio::task::spawn_blocking(move || {
            let result = sampler.run_cycle();
            (sampler, result)
        })
        .await
        .map_err(|e| anyhow!("sampling task panicked: {}", e))?;
        sampler = returned;

        // Only an unreadable device directory gets here
        result?;

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = shutdown.changed() => {
                debug!("Sampling loop woken up by shutdown");
                // sender dropped: nobody can stop us cleanly any more
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    info!("Sampling loop stopped");
    Ok(())
}
