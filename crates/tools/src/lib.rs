//! Linksim tools library

pub mod ber;
pub mod config;
pub mod export;
pub mod link;
pub mod sweep;

pub use ber::{bit_error_rate, BerStats};
pub use config::{load_config, save_config, SimArgs, SimConfig};
pub use export::{write_report_json, write_wav};
pub use link::{LinkSimulator, SimulationReport, SimulationRequest};
pub use sweep::{sweep, SnrRange, SweepPoint};
