// src/services/layout_service.rs
//
// Fold Layout Engine
//
// Each row is printed twice on one page, one copy per half. Folding the
// sheet along the horizontal midline puts the copies back to back, so the
// card stands as a tent readable from both sides.
//
// CRITICAL RULES:
// - Front grid first (upper half), back grid second (lower half)
// - Both grids: same cells, same order, same column count and widths
// - Only the front grid's cells are Inverted (180 degrees in place)
// - Short rows are padded with bare shells to keep the grid rectangular
// - A deck paginated with a different row size is rejected, never overflowed

use crate::config::LayoutSettings;
use crate::domain::deck::{Deck, Row};
use crate::domain::layout::{
    Block, BlockContent, CellInstruction, GridInstance, GridInstruction, Orientation, PageGeometry,
};
use crate::domain::resolution::{CoverImage, ResolvedCard};
use crate::error::{AppError, AppResult};
use crate::integrations::pdf::DocumentSink;

// Fixed block geometry (mm)
const BRAND_MARK_HEIGHT: f32 = 6.0;
const BRAND_MARK_MARGIN: f32 = 3.0;
/// Pulls the code mark up so the logo sits above it without taking space
const BRAND_MARK_PADDING_BOTTOM: f32 = -12.0;
const COVER_PADDING_TOP: f32 = 5.0;

pub struct FoldLayoutEngine<'a> {
    settings: &'a LayoutSettings,
    brand_mark: Option<&'a CoverImage>,
}

impl<'a> FoldLayoutEngine<'a> {
    pub fn new(settings: &'a LayoutSettings, brand_mark: Option<&'a CoverImage>) -> Self {
        Self {
            settings,
            brand_mark,
        }
    }

    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry {
            width_mm: self.settings.page_width,
            height_mm: self.settings.page_height,
        }
    }

    /// Stream the whole deck to the sink, front then back for every row
    pub fn layout(&self, deck: &Deck, sink: &mut dyn DocumentSink) -> AppResult<()> {
        if deck.row_size() != self.settings.cards_per_row {
            return Err(AppError::Config(format!(
                "Deck was paginated in rows of {} but the layout has {} columns",
                deck.row_size(),
                self.settings.cards_per_row
            )));
        }

        for (index, row) in deck.rows().iter().enumerate() {
            log::debug!("Laying out row {} ({} card(s))", index + 1, row.len());
            let [front, back] = self.grids_for_row(row)?;
            sink.add_grid(&front)?;
            sink.add_grid(&back)?;
        }
        Ok(())
    }

    /// Front and back grid for one row; a row wider than the grid is an error
    pub fn grids_for_row<'r>(&'r self, row: &'r Row) -> AppResult<[GridInstruction<'r>; 2]> {
        if row.len() > self.settings.cards_per_row {
            return Err(AppError::Config(format!(
                "Row of {} card(s) does not fit {} columns",
                row.len(),
                self.settings.cards_per_row
            )));
        }

        Ok([
            self.grid(row, GridInstance::Front),
            self.grid(row, GridInstance::Back),
        ])
    }

    fn grid<'r>(&'r self, row: &'r Row, instance: GridInstance) -> GridInstruction<'r> {
        let orientation = match instance {
            GridInstance::Front => Orientation::Inverted,
            GridInstance::Back => Orientation::Upright,
        };

        let columns = self.settings.cards_per_row;
        let mut cells: Vec<CellInstruction<'r>> = row
            .cards()
            .iter()
            .map(|card| CellInstruction {
                orientation,
                blocks: self.card_blocks(card),
            })
            .collect();

        while cells.len() < columns {
            cells.push(CellInstruction {
                orientation,
                blocks: Vec::new(),
            });
        }

        GridInstruction {
            instance,
            columns,
            column_width_percent: 100.0 / columns as f32,
            strip_width_mm: self.settings.strip_width(),
            row_height_mm: self.settings.page_height / 2.0,
            border_width_pt: self.settings.border_width,
            cells,
        }
    }

    /// Block stack of one card, top to bottom
    fn card_blocks<'r>(&'r self, card: &'r ResolvedCard) -> Vec<Block<'r>> {
        let s = self.settings;
        let mut blocks = Vec::with_capacity(5);

        if card.shows_brand_mark() {
            if let Some(image) = self.brand_mark {
                blocks.push(
                    Block::new(BlockContent::BrandMark {
                        image,
                        height_mm: BRAND_MARK_HEIGHT,
                    })
                    .with_margin(BRAND_MARK_MARGIN)
                    .with_padding_bottom(BRAND_MARK_PADDING_BOTTOM),
                );
            }
        }

        blocks.push(
            Block::new(BlockContent::CodeMark {
                payload: &card.code_payload,
                edge_mm: s.code_size,
            })
            .with_padding_top(s.top_margin),
        );

        // Without art the same height is reserved so rows stay aligned
        blocks.push(match &card.cover {
            Some(image) => Block::new(BlockContent::Image {
                image,
                width_mm: s.cover_size,
            })
            .with_padding_top(COVER_PADDING_TOP),
            None => Block::new(BlockContent::Spacer)
                .with_padding_top(COVER_PADDING_TOP)
                .with_padding_bottom(s.cover_size),
        });

        blocks.push(
            Block::new(BlockContent::Text {
                text: &card.artist,
                font_size_pt: s.artist_font_size,
                bold: false,
                max_height_mm: None,
            })
            .with_padding_top(s.artist_padding_top),
        );

        blocks.push(
            Block::new(BlockContent::Text {
                text: &card.title,
                font_size_pt: s.title_font_size,
                bold: true,
                max_height_mm: Some(s.title_max_height),
            })
            .with_padding_top(s.title_padding_top),
        );

        blocks
    }
}
