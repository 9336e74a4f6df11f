//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the player core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//! - Batch scheduling primitives
//!
//! ## Overview
//!
//! This crate contains the core runtime utilities that other modules depend on.
//! It establishes the async runtime patterns, logging conventions, batch
//! throttling policy, and event broadcasting mechanisms used throughout the
//! system.

pub mod batch;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
