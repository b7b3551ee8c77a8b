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

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use w1_core::constants::timing::SAMPLE_INTERVAL;
use w1_core::{Sampler, W1Bus};
use w1_therm_exporter::cli::Cli;
use w1_therm_exporter::{logging, sampling, server, supervisor, TemperatureGauges};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = logging::log_level();
    let target = logging::init_logging(&log_level);

    info!("STARTUP: w1-therm-exporter {} starting", VERSION);
    info!("STARTUP: Logging to {} (level {})", target, log_level);

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let gauges = TemperatureGauges::new().context("creating gauge registry")?;
    let bus = W1Bus::default();
    info!("STARTUP: Sensor directory: {}", bus.devices_dir().display());

    // Bind before sampling so a busy port fails fast
    let listener = server::bind(cli.http_addr).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sampler = Sampler::new(bus, gauges.clone());
    let sampling_handle = tokio::spawn(sampling::run_sampling_loop(
        sampler,
        SAMPLE_INTERVAL,
        shutdown_rx.clone(),
    ));

    let mut server_shutdown = shutdown_rx;
    let server_handle = tokio::spawn(server::run_server(listener, gauges, async move {
        let _ = server_shutdown.wait_for(|stop| *stop).await;
    }));

    let outcome =
        supervisor::supervise(sampling_handle, server_handle, shutdown_tx, shutdown_signal()).await;

    info!("SHUTDOWN: Exporter terminated");
    outcome
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
