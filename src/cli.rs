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

//! Command Line Interface

use std::net::SocketAddr;

use clap::Parser;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "W1_THERM_LOG";

#[derive(Parser, Debug)]
#[command(name = "w1-therm-exporter")]
#[command(version)]
#[command(about = "Prometheus exporter for one-wire thermometers (w1_therm)")]
#[command(long_about = "Prometheus exporter for one-wire thermometers (w1_therm)

Polls /sys/bus/w1/devices every 10 seconds and exposes the latest reading of
each sensor as w1_therm_temperature_celsius{sensor_id=\"...\"} on /metrics.
Sensors that stop reporting valid readings for 5 minutes are dropped.

ENVIRONMENT VARIABLES:
    W1_THERM_LOG=debug     Log level (trace, debug, info, warn, error)")]
pub struct Cli {
    /// Address the HTTP metrics endpoint listens on
    #[arg(long = "http-addr", alias = "httpAddr", value_name = "ADDR", default_value = DEFAULT_HTTP_ADDR)]
    pub http_addr: SocketAddr,
}
