// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod deck;
pub mod layout;
pub mod reference;
pub mod resolution;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Reference Domain
pub use reference::{classify, ReferenceKind, TypedReference};

// Resolution Domain
pub use resolution::{CoverImage, CoverOrigin, ResolutionWarning, ResolvedCard};

// Deck Domain
pub use deck::{paginate, Deck, Row};

// Layout Domain
pub use layout::{
    Block, BlockContent, CellInstruction, GridInstance, GridInstruction, Orientation, PageGeometry,
};
