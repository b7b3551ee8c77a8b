//! Sensor Sampler
//!
//! One call to [`Sampler::run_cycle_at`] is one pass of the sampling loop:
//! discover sensors, read and validate each payload, publish values, then
//! sweep out sensors that stopped reporting. Pacing between cycles belongs to
//! whoever drives the sampler.
//!
//! # Failure handling
//! - **Directory listing fails**: returned as an error, the cycle aborts
//! - **Read failure / no value marker / bad integer**: sensor skipped, nothing mutated
//! - **CRC token missing**: sensor evicted immediately
//! - **No valid reading for longer than the threshold**: evicted by the sweep

use chrono::Utc;
use tracing::{debug, info, warn};
use w1_error::{Result, W1Error};

use crate::bus::W1Bus;
use crate::constants::timing::STALE_AFTER_SECS;
use crate::payload::parse_payload;
use crate::registry::LiveSensors;

/// Write side of the gauge store.
///
/// Implementations must make each call atomic with respect to concurrent
/// renders of the store.
pub trait MetricSink {
    /// Upsert the gauge for `sensor_id`
    fn set(&self, sensor_id: &str, celsius: f64);

    /// Drop the gauge for `sensor_id`; absent ids are ignored
    fn delete(&self, sensor_id: &str);
}

/// Outcome counters of one cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub discovered: usize,
    pub published: usize,
    pub skipped: usize,
    pub checksum_evicted: usize,
    pub expired: usize,
}

/// Owns the live-sensor registry and keeps the sink consistent with it.
pub struct Sampler<S> {
    bus: W1Bus,
    sink: S,
    live: LiveSensors,
}

impl<S: MetricSink> Sampler<S> {
    pub fn new(bus: W1Bus, sink: S) -> Self {
        Self {
            bus,
            sink,
            live: LiveSensors::new(),
        }
    }

    pub fn bus(&self) -> &W1Bus {
        &self.bus
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn live(&self) -> &LiveSensors {
        &self.live
    }

    /// Run one cycle stamped with the current UTC time
    pub fn run_cycle(&mut self) -> Result<CycleReport> {
        self.run_cycle_at(Utc::now().timestamp())
    }

    /// Run one cycle as if the clock read `now` (UTC unix seconds).
    ///
    /// Only a failure to list the device directory is returned; everything
    /// per-sensor is absorbed into the report.
    pub fn run_cycle_at(&mut self, now: i64) -> Result<CycleReport> {
        let sensors = self.bus.list_sensors()?;
        let mut report = CycleReport {
            discovered: sensors.len(),
            ..CycleReport::default()
        };

        for sensor_id in &sensors {
            self.sample_sensor(sensor_id, now, &mut report);
        }

        // Sweep strictly after all reads so a sensor refreshed above survives
        for sensor_id in self.live.stale(now, STALE_AFTER_SECS) {
            info!(sensor_id = %sensor_id, "Sensor stale, removing");
            self.evict(&sensor_id);
            report.expired += 1;
        }

        debug!(
            discovered = report.discovered,
            published = report.published,
            skipped = report.skipped,
            checksum_evicted = report.checksum_evicted,
            expired = report.expired,
            live = self.live.len(),
            "Sampling cycle complete"
        );
        Ok(report)
    }

    fn sample_sensor(&mut self, sensor_id: &str, now: i64, report: &mut CycleReport) {
        let payload = match self.bus.read_payload(sensor_id) {
            Ok(p) => p,
            Err(e) => {
                debug!(sensor_id, error = %e, "Skipping unreadable sensor");
                report.skipped += 1;
                return;
            }
        };

        match parse_payload(&payload) {
            Ok(celsius) => {
                info!(sensor_id, celsius, "Reading");
                self.sink.set(sensor_id, celsius);
                self.live.refresh(sensor_id, now);
                report.published += 1;
            }
            Err(W1Error::ChecksumFailed) => {
                warn!(sensor_id, "CRC check failed, removing sensor");
                self.evict(sensor_id);
                report.checksum_evicted += 1;
            }
            Err(e) => {
                debug!(sensor_id, error = %e, "Skipping sensor this cycle");
                report.skipped += 1;
            }
        }
    }

    /// Remove a sensor from the sink and the registry together
    fn evict(&mut self, sensor_id: &str) {
        self.sink.delete(sensor_id);
        self.live.remove(sensor_id);
    }
}
