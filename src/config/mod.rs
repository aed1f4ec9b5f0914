// src/config/mod.rs
//
// Configuration Module
//
// A single Config value is loaded once at startup and passed by reference
// into the resolver and the layout engine. There is no global state.

pub mod settings;

pub use settings::{Config, LayoutSettings, ProviderCredentials, DEFAULT_CONFIG_FILE};
