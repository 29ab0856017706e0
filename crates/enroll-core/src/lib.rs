//! Core types for the Enroll registration wizard.
//!
//! This crate is deliberately free of HTTP, terminal, and device
//! dependencies. All other crates depend on it; it depends on nothing
//! heavier than `chrono` and `regex`.

pub mod error;
pub mod profile;
pub mod schema;
pub mod wizard;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
