// src/integrations/codemark/mod.rs

pub mod encoder;

pub use encoder::{CharacterSet, CodeMark, CodeMarkEncoder, QrCodeEncoder};
