//! Access to the w1 bus through sysfs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use w1_error::{Result, W1Error};

use crate::constants::paths::{SLAVE_FILE, W1_DEVICES_DIR};

/// The sysfs directory holding one entry per attached one-wire device.
#[derive(Debug, Clone)]
pub struct W1Bus {
    devices_dir: PathBuf,
}

impl W1Bus {
    pub fn new(devices_dir: impl Into<PathBuf>) -> Self {
        Self { devices_dir: devices_dir.into() }
    }

    pub fn devices_dir(&self) -> &Path {
        &self.devices_dir
    }

    /// Path of the status file for one sensor
    pub fn slave_path(&self, sensor_id: &str) -> PathBuf {
        self.devices_dir.join(sensor_id).join(SLAVE_FILE)
    }

    /// List sensor ids in name order.
    ///
    /// Any listing error is returned as `SensorDirectory`, which callers treat
    /// as fatal. Bus masters and other non-sensor entries are listed too; their
    /// missing `w1_slave` file just fails the per-sensor read.
    pub fn list_sensors(&self) -> Result<Vec<String>> {
        let dir_err = |source| W1Error::SensorDirectory {
            path: self.devices_dir.clone(),
            source,
        };

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.devices_dir).map_err(dir_err)? {
            let entry = entry.map_err(dir_err)?;
            match entry.file_name().into_string() {
                Ok(name) => ids.push(name),
                Err(raw) => debug!(name = ?raw, "Skipping non UTF-8 device entry"),
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Read the raw `w1_slave` payload of a sensor
    pub fn read_payload(&self, sensor_id: &str) -> Result<String> {
        let path = self.slave_path(sensor_id);
        fs::read_to_string(&path).map_err(|source| W1Error::SensorRead { path, source })
    }
}

impl Default for W1Bus {
    fn default() -> Self {
        Self::new(W1_DEVICES_DIR)
    }
}
