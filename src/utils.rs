pub mod date;
pub mod telemetry;
