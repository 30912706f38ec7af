//! Crate-internal helpers.
pub mod devlog;
