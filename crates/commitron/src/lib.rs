//! Commitron: bump a counter file in a git repository and push the commit.
//!
//! The binary reads its settings from flags or the environment and hands
//! them to [`handler::handle`], which runs the job and shapes the result
//! into a [`Response`](commitron_core::response::Response).

pub mod error;
pub mod handler;
pub mod logging;
