// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod deck_pipeline;
pub mod layout_service;
pub mod link_list_service;
pub mod resolution_service;

#[cfg(test)]
mod resolution_service_tests;

pub use deck_pipeline::{DeckPipeline, RunSummary};
pub use layout_service::FoldLayoutEngine;
pub use link_list_service::{filter_lines, read_link_list};
pub use resolution_service::{share_cover_path, MetadataResolver, SHARE_COVER_FILE};
