//! Core types for commitron.
//!
//! The file-backed counter and the status envelope returned to whoever
//! invoked the job.

pub mod counter;
pub mod response;
