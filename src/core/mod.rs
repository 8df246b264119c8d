//! Core business logic abstractions

pub mod config;
pub mod document;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use document::RateDocument;
pub use rates::RateProvider;
