//! Readiness self-assessment engine for affiliates planning a home repair program.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
