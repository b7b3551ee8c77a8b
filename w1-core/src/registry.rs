//! Live sensor registry
//!
//! Tracks when each published sensor last produced a valid reading. The
//! sampler keeps this in lockstep with the gauge store: an id is present here
//! exactly when its gauge is published.

use std::collections::HashMap;

/// Map of `sensor_id` to the UTC unix timestamp of its last valid reading.
#[derive(Debug, Default, Clone)]
pub struct LiveSensors {
    last_seen: HashMap<String, i64>,
}

impl LiveSensors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh a sensor
    pub fn refresh(&mut self, sensor_id: &str, now: i64) {
        match self.last_seen.get_mut(sensor_id) {
            Some(ts) => *ts = now,
            None => {
                self.last_seen.insert(sensor_id.to_string(), now);
            }
        }
    }

    /// Remove a sensor, returning whether it was tracked
    pub fn remove(&mut self, sensor_id: &str) -> bool {
        self.last_seen.remove(sensor_id).is_some()
    }

    pub fn last_seen(&self, sensor_id: &str) -> Option<i64> {
        self.last_seen.get(sensor_id).copied()
    }

    pub fn contains(&self, sensor_id: &str) -> bool {
        self.last_seen.contains_key(sensor_id)
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }

    /// Ids whose last reading is more than `max_age_secs` older than `now`.
    ///
    /// Returns an owned, sorted list so callers can delete while walking it.
    pub fn stale(&self, now: i64, max_age_secs: i64) -> Vec<String> {
        let mut ids: Vec<String> = self
            .last_seen
            .iter()
            .filter(|(_, ts)| ts.saturating_add(max_age_secs) < now)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Tracked ids in name order
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.last_seen.keys().cloned().collect();
        ids.sort();
        ids
    }
}
