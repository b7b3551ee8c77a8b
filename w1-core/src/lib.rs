//! w1-therm-exporter core library
//!
//! Reads DS18B20-style one-wire thermometers through the Linux `w1_therm`
//! sysfs interface and keeps a gauge store in sync with the sensors that are
//! currently alive.
//!
//! # Architecture
//!
//! - [`bus`]: directory listing and `w1_slave` reads
//! - [`payload`]: CRC check, value extraction and scaling
//! - [`registry`]: last-seen bookkeeping for published sensors
//! - [`sampler`]: one sampling cycle tying the above together

pub mod bus;
pub mod constants;
pub mod payload;
pub mod registry;
pub mod sampler;

pub use bus::W1Bus;
pub use payload::{parse_payload, scale_raw};
pub use registry::LiveSensors;
pub use sampler::{CycleReport, MetricSink, Sampler};

pub use w1_error::{Result, W1Error};
