//! Persistence for the rate document.

pub mod file;

pub use file::write_atomic;
