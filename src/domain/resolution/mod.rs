// src/domain/resolution/mod.rs
//
// Resolution Domain
//
// Value objects produced by resolving a TypedReference.
//
// CRITICAL RULES:
// - ResolvedCard.code_payload is the raw link list line, always
// - Warnings are values, not errors; they never abort a run

pub mod value_objects;

pub use value_objects::{CoverImage, CoverOrigin, ResolutionWarning, ResolvedCard};
