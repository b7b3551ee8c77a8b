//! Constants for w1-therm-exporter
//!
//! Paths, timing and payload tokens used by the sampler. None of these are
//! configurable at runtime.

use std::time::Duration;

/// sysfs locations exposed by the w1 bus driver
pub mod paths {
    /// Directory whose entries are the attached one-wire devices
    pub const W1_DEVICES_DIR: &str = "/sys/bus/w1/devices";

    /// Per-device status file written by the w1_therm driver
    pub const SLAVE_FILE: &str = "w1_slave";
}

/// Sampling cadence and liveness policy
pub mod timing {
    use super::Duration;

    /// Pause between two sampling cycles. Keeps polling traffic on the bus low.
    pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(10);

    /// A sensor whose last valid reading is older than this is evicted
    pub const STALE_AFTER_SECS: i64 = 300;
}

/// Tokens inside a `w1_slave` payload
pub mod payload {
    /// Present when the driver's CRC check passed
    pub const CRC_OK: &str = "YES";

    /// Precedes the raw temperature integer
    pub const VALUE_MARKER: &str = "t=";

    /// Characters stripped from the raw value before parsing
    pub const STRIP_CHARS: [char; 3] = ['\n', '\r', '\t'];

    /// Integer divisor applied first (truncating toward zero)
    pub const RAW_DIVISOR: i64 = 100;

    /// Float divisor applied second, leaving one decimal digit
    pub const DECI_DIVISOR: f64 = 10.0;
}

/// Prometheus naming for the exported gauge
pub mod metric {
    pub const NAMESPACE: &str = "w1";
    pub const SUBSYSTEM: &str = "therm";
    pub const NAME: &str = "temperature_celsius";
    pub const HELP: &str = "Temperatures in Celsius read via w1_therm linux kernel module";
    pub const SENSOR_LABEL: &str = "sensor_id";
}
