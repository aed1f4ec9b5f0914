// src/domain/layout/value_objects.rs
//
// Layout Value Objects
//
// UNITS:
// - lengths in millimetres
// - font sizes and border widths in points

use crate::domain::resolution::CoverImage;

/// Physical page size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Which half of the folded sheet a grid belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridInstance {
    /// Upper half, every cell turned upside down
    Front,
    /// Lower half, natural orientation
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    /// Rotated 180 degrees about the cell centre
    Inverted,
}

/// One half-page table of cards
#[derive(Debug, Clone, PartialEq)]
pub struct GridInstruction<'a> {
    pub instance: GridInstance,
    /// Always the configured cards per row; short rows are padded with shells
    pub columns: usize,
    pub column_width_percent: f32,
    /// Total table width
    pub strip_width_mm: f32,
    /// Half the page height
    pub row_height_mm: f32,
    pub border_width_pt: f32,
    pub cells: Vec<CellInstruction<'a>>,
}

impl GridInstruction<'_> {
    pub fn column_width_mm(&self) -> f32 {
        self.strip_width_mm * self.column_width_percent / 100.0
    }
}

/// A bordered cell; an empty block list is a bare shell
#[derive(Debug, Clone, PartialEq)]
pub struct CellInstruction<'a> {
    pub orientation: Orientation,
    pub blocks: Vec<Block<'a>>,
}

impl CellInstruction<'_> {
    pub fn is_shell(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// One independently spaced, horizontally centred sub-block of a cell
#[derive(Debug, Clone, PartialEq)]
pub struct Block<'a> {
    pub content: BlockContent<'a>,
    /// Uniform outer margin
    pub margin_mm: f32,
    pub padding_top_mm: f32,
    /// May be negative, pulling the next block up
    pub padding_bottom_mm: f32,
}

impl<'a> Block<'a> {
    pub fn new(content: BlockContent<'a>) -> Self {
        Self {
            content,
            margin_mm: 0.0,
            padding_top_mm: 0.0,
            padding_bottom_mm: 0.0,
        }
    }

    pub fn with_margin(mut self, margin_mm: f32) -> Self {
        self.margin_mm = margin_mm;
        self
    }

    pub fn with_padding_top(mut self, padding_mm: f32) -> Self {
        self.padding_top_mm = padding_mm;
        self
    }

    pub fn with_padding_bottom(mut self, padding_mm: f32) -> Self {
        self.padding_bottom_mm = padding_mm;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent<'a> {
    /// Streaming-service logo, scaled to a fixed height
    BrandMark { image: &'a CoverImage, height_mm: f32 },

    /// Scannable code for the payload, drawn as a square
    CodeMark { payload: &'a str, edge_mm: f32 },

    /// Cover art scaled to the given width
    Image { image: &'a CoverImage, width_mm: f32 },

    /// Reserves only its padding
    Spacer,

    Text {
        text: &'a str,
        font_size_pt: f32,
        bold: bool,
        /// Lines beyond this height are clipped
        max_height_mm: Option<f32>,
    },
}
