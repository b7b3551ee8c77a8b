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

use std::path::Path;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::LOG_ENV;

const JOURNALD_SOCKET: &str = "/run/systemd/journal/socket";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Journald,
    Stdout,
}

impl std::fmt::Display for LogTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogTarget::Journald => write!(f, "systemd journal"),
            LogTarget::Stdout => write!(f, "stdout"),
        }
    }
}

/// Filter directive from `W1_THERM_LOG`, `info` when unset
pub fn log_level() -> String {
    std::env::var(LOG_ENV).unwrap_or_else(|_| "info".to_string())
}

/// Install the global subscriber.
///
/// Prefers journald when the journal socket exists, otherwise (or when the
/// journald layer cannot be created) logs to stdout.
pub fn init_logging(level: &str) -> LogTarget {
    if Path::new(JOURNALD_SOCKET).exists() {
        match tracing_journald::layer() {
            Ok(journald_layer) => {
                tracing_subscriber::registry()
                    .with(journald_layer)
                    .with(EnvFilter::new(level))
                    .init();
                return LogTarget::Journald;
            }
            Err(e) => {
                eprintln!("Failed to create journald layer: {}, falling back to stdout", e);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(EnvFilter::new(level))
        .init();
    LogTarget::Stdout
}
