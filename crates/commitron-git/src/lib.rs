//! Git integration for commitron.
//!
//! This crate wraps the handful of git operations the counter job needs
//! behind the [`SourceControl`] trait, and builds the two job steps on top
//! of it: provisioning a fresh clone and publishing the updated counter.

pub mod client;
pub mod commands;
pub mod provision;
pub mod publish;
pub mod remote;

pub use client::{GitCli, SourceControl};
pub use commands::{GitError, Result};
pub use provision::{Checkout, Identity, provision};
pub use publish::{ORIGIN, commit_message, publish};
pub use remote::RemoteUrl;
