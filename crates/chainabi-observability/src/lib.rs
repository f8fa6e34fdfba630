//! # chainabi-observability
//!
//! Structured logging for applications built on ChainABI.
//!
//! The library crates only emit `tracing` events; nothing is printed until a
//! subscriber is installed. [`init_tracing`] installs one from a [`LogConfig`]:
//! a global level, per-component overrides (`chainabi_filter=debug`), and
//! JSON or human-readable output.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
