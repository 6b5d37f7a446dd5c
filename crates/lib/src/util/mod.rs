//! Shared utilities.
//!
//! Archive digests, project path resolution and test helpers.

pub mod hash;
pub mod path;
