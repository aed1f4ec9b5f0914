// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Process-level plumbing that supports the pipeline but is not part of it.

pub mod logging;

pub use logging::init_logging;
