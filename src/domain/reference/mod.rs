// src/domain/reference/mod.rs
//
// Reference Domain
//
// A reference is one line of the link list. The classifier turns it into a
// TypedReference exactly once; everything downstream matches on the kind.

pub mod classifier;
pub mod entity;

pub use classifier::classify;
pub use entity::{ReferenceKind, TypedReference};
