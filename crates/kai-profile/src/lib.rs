pub mod advisor;
pub mod assessment;
pub mod config;
pub mod directory;
pub mod error;
pub mod leads;
pub mod telemetry;
