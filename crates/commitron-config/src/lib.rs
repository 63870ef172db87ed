//! Configuration for commitron.
//!
//! Settings arrive as optional strings (from flags or environment variables)
//! and are validated into a [`Settings`] before the job touches anything.

pub mod settings;

pub use settings::{ConfigError, RawSettings, Result, SecretBackend, Settings};
