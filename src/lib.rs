pub mod config;
pub mod env;
pub mod generator;
pub mod harness;
pub mod telemetry;
