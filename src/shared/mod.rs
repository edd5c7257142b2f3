//! Shared Types
//!
//! Data structures, configuration, and error types used across the client.

pub mod config;
pub mod error;
pub mod messaging;
