//! Observability for brierboard.
//! `tracing` with `EnvFilter`, per-crate log levels.

pub mod setup;
pub mod spans;

pub use setup::init_tracing;
