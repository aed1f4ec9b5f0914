// src/integrations/images/mod.rs

pub mod loader;

pub use loader::{decode_image, HttpImageLoader, ImageLoader};

#[cfg(test)]
pub use loader::MockImageLoader;
