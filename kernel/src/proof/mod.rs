//! Proof module: canonical JSON and content hashing for run digests.

pub mod canon;
pub mod hash;
