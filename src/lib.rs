// src/lib.rs
// Cardfold - printable fold-over scan cards from a list of media links
//
// Architecture:
// - Domain: references, resolved cards, rows and grid instructions (pure values)
// - Integrations: every external collaborator behind a trait
// - Services: resolution, pagination, fold layout and the run pipeline
// - Explicit: configuration is a value passed down, never global state

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod integrations;
pub mod services;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use config::{Config, LayoutSettings};
pub use domain::{
    classify, paginate, CoverImage, Deck, ReferenceKind, ResolutionWarning, ResolvedCard, Row,
    TypedReference,
};
pub use error::{AppError, AppResult};
pub use services::{DeckPipeline, FoldLayoutEngine, MetadataResolver, RunSummary};
