//! Shared utilities.

pub mod hashing;

pub use hashing::table_fingerprint;
