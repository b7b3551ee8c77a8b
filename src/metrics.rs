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

//! Prometheus gauge store for sensor temperatures

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tracing::trace;
use w1_core::constants::metric;
use w1_core::MetricSink;
use w1_error::{Result, W1Error};

/// `w1_therm_temperature_celsius{sensor_id="..."}` in a private registry.
///
/// Cloning is cheap and every clone shares the same underlying gauges, so the
/// sampler and the HTTP handler can each hold one.
#[derive(Clone)]
pub struct TemperatureGauges {
    registry: Registry,
    temps: GaugeVec,
}

impl TemperatureGauges {
    pub fn new() -> Result<Self> {
        let opts = Opts::new(metric::NAME, metric::HELP)
            .namespace(metric::NAMESPACE)
            .subsystem(metric::SUBSYSTEM);
        let temps = GaugeVec::new(opts, &[metric::SENSOR_LABEL]).map_err(W1Error::metrics)?;

        let registry = Registry::new();
        registry
            .register(Box::new(temps.clone()))
            .map_err(W1Error::metrics)?;

        Ok(Self { registry, temps })
    }

    /// Current value for a sensor, if published
    pub fn value(&self, sensor_id: &str) -> Option<f64> {
        self.registry.gather().iter().find_map(|family| {
            family
                .get_metric()
                .iter()
                .find(|m| has_sensor_label(m, sensor_id))
                .map(|m| m.get_gauge().get_value())
        })
    }

    /// Whether a gauge for `sensor_id` is part of the exposition
    pub fn is_published(&self, sensor_id: &str) -> bool {
        self.value(sensor_id).is_some()
    }

    /// Render every published gauge in the text exposition format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(W1Error::metrics)?;
        String::from_utf8(buffer).map_err(W1Error::metrics)
    }

    /// Content type to send alongside [`render`](Self::render)
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}

fn has_sensor_label(m: &prometheus::proto::Metric, sensor_id: &str) -> bool {
    m.get_label()
        .iter()
        .any(|l| l.get_name() == metric::SENSOR_LABEL && l.get_value() == sensor_id)
}

impl MetricSink for TemperatureGauges {
    fn set(&self, sensor_id: &str, celsius: f64) {
        self.temps.with_label_values(&[sensor_id]).set(celsius);
    }

    fn delete(&self, sensor_id: &str) {
        if self.temps.remove_label_values(&[sensor_id]).is_ok() {
            trace!(sensor_id, "Gauge removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_render() {
        let gauges = TemperatureGauges::new().unwrap();
        gauges.set("28-000001", 21.3);

        let text = gauges.render().unwrap();
        assert!(text.contains("# HELP w1_therm_temperature_celsius Temperatures in Celsius"));
        assert!(text.contains("# TYPE w1_therm_temperature_celsius gauge"));
        assert!(text.contains("w1_therm_temperature_celsius{sensor_id=\"28-000001\"} 21.3"));
    }

    #[test]
    fn test_set_overwrites() {
        let gauges = TemperatureGauges::new().unwrap();
        gauges.set("28-000001", 21.3);
        gauges.set("28-000001", -0.5);
        assert_eq!(gauges.value("28-000001"), Some(-0.5));
    }

    #[test]
    fn test_delete_removes_label() {
        let gauges = TemperatureGauges::new().unwrap();
        gauges.set("28-000001", 21.3);
        gauges.set("28-000002", 18.8);
        gauges.delete("28-000001");

        let text = gauges.render().unwrap();
        assert!(!text.contains("28-000001"));
        assert!(text.contains("28-000002"));
        assert!(!gauges.is_published("28-000001"));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let gauges = TemperatureGauges::new().unwrap();
        gauges.delete("28-ffffff");
        assert_eq!(gauges.render().unwrap(), "");
    }

    #[test]
    fn test_clones_share_state() {
        let gauges = TemperatureGauges::new().unwrap();
        let handle = gauges.clone();
        handle.set("28-000001", 23.5);
        assert_eq!(gauges.value("28-000001"), Some(23.5));
        assert!(gauges.value("28-000002").is_none());
    }

    #[test]
    fn test_content_type() {
        let gauges = TemperatureGauges::new().unwrap();
        assert!(gauges.content_type().starts_with("text/plain"));
    }
}
