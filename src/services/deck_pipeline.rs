// src/services/deck_pipeline.rs
//
// Deck Pipeline - one run from link list to document
//
// FLOW:
// link list -> classify -> resolve -> paginate -> layout -> document
//
// CRITICAL RULES:
// - Every card is resolved before the document is opened
// - Any AppError aborts the run before close, so no file is written
// - Warnings are collected and returned, never raised

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::deck::{paginate, Deck};
use crate::domain::reference::classify;
use crate::domain::resolution::{CoverImage, ResolutionWarning};
use crate::error::AppResult;
use crate::integrations::images::ImageLoader;
use crate::integrations::pdf::DocumentSink;
use crate::integrations::spotify::MetadataProvider;
use crate::services::layout_service::FoldLayoutEngine;
use crate::services::link_list_service::read_link_list;
use crate::services::resolution_service::MetadataResolver;

/// What a successful run produced
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub destination: PathBuf,
    pub cards: usize,
    pub rows: usize,
    pub warnings: Vec<ResolutionWarning>,
}

impl RunSummary {
    /// Machine-readable record of the run (pretty JSON)
    pub fn write_report(&self, path: &Path) -> AppResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::debug!("Wrote run report to {}", path.display());
        Ok(())
    }
}

pub struct DeckPipeline<'a> {
    config: &'a Config,
    provider: &'a dyn MetadataProvider,
    images: &'a dyn ImageLoader,
}

impl<'a> DeckPipeline<'a> {
    pub fn new(
        config: &'a Config,
        provider: &'a dyn MetadataProvider,
        images: &'a dyn ImageLoader,
    ) -> Self {
        Self {
            config,
            provider,
            images,
        }
    }

    /// Read the configured link list and render it into `sink`
    pub async fn run(&self, sink: &mut dyn DocumentSink) -> AppResult<RunSummary> {
        let lines = read_link_list(&self.config.cards_file)?;
        self.run_lines(&lines, sink).await
    }

    pub async fn run_lines(&self, lines: &[String], sink: &mut dyn DocumentSink) -> AppResult<RunSummary> {
        let (deck, warnings) = self.build_deck(lines).await?;
        let brand_mark = self.load_brand_mark()?;
        if self.config.brand_mark.is_none() && has_streaming_cards(&deck) {
            log::info!("No brand_mark configured, streaming cards print without the logo");
        }

        let engine = FoldLayoutEngine::new(&self.config.layout, brand_mark.as_ref());
        let destination = self.config.destination_file.as_path();

        sink.open(destination, engine.page_geometry())?;
        engine.layout(&deck, sink)?;
        sink.close()?;

        let summary = RunSummary {
            destination: destination.to_path_buf(),
            cards: deck.card_count(),
            rows: deck.rows().len(),
            warnings,
        };

        log::info!(
            "Printed {} card(s) in {} row(s) to {} with {} warning(s)",
            summary.cards,
            summary.rows,
            summary.destination.display(),
            summary.warnings.len()
        );
        Ok(summary)
    }

    /// Classify and resolve every line in order, then bucket into rows
    pub async fn build_deck(&self, lines: &[String]) -> AppResult<(Deck, Vec<ResolutionWarning>)> {
        let mut resolver = MetadataResolver::new(self.provider, self.images, &self.config.share_path);
        let mut cards = Vec::with_capacity(lines.len());

        for (index, line) in lines.iter().enumerate() {
            let reference = classify(line);
            let card = resolver.resolve(&reference).await?;
            log::info!("[{}/{}] {} '{}'", index + 1, lines.len(), reference.kind, card.title);
            cards.push(card);
        }

        let deck = paginate(cards, self.config.layout.cards_per_row)?;
        Ok((deck, resolver.into_warnings()))
    }

    /// A configured but missing brand image only costs the logo
    fn load_brand_mark(&self) -> AppResult<Option<CoverImage>> {
        let Some(path) = self.config.brand_mark.as_deref() else {
            return Ok(None);
        };

        let image = self.images.load_from_path(path)?;
        if image.is_none() {
            log::warn!("Brand mark {} not found, streaming cards print without it", path.display());
        }
        Ok(image)
    }
}

fn has_streaming_cards(deck: &Deck) -> bool {
    deck.rows()
        .iter()
        .flat_map(|row| row.cards())
        .any(|card| card.shows_brand_mark())
}
