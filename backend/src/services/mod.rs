//! Services for the AeroSense simulation daemon

pub mod monitoring;

pub use monitoring::{DashboardSnapshot, MonitoringService};
