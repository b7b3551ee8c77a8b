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

//! w1-therm-exporter - Prometheus exporter for w1_therm thermometers
//!
//! Wires the sampling core from `w1-core` to a Prometheus gauge store and an
//! HTTP endpoint that serves it.

pub mod cli;
pub mod logging;
pub mod metrics;
pub mod sampling;
pub mod server;
pub mod supervisor;

pub use metrics::TemperatureGauges;
