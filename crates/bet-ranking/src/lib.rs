pub mod catalog;
pub mod config;
pub mod error;
pub mod rankings;
pub mod telemetry;
