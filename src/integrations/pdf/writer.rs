// src/integrations/pdf/writer.rs
//
// PDF rendering of grid instructions (lopdf)
//
// PAGE MODEL:
// - One page per deck row
// - Front grid fills the upper half, back grid the lower half
// - The card strip is centred horizontally
// - Cells are clipped to their border; blocks flow top-down inside them
//
// The whole document is kept in memory and serialized on close, so a run
// that fails midway leaves no file behind.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::metrics::{win_ansi_bytes, wrap_lines, Font, LEADING};
use super::sink::DocumentSink;
use crate::domain::layout::{
    Block, BlockContent, CellInstruction, GridInstance, GridInstruction, Orientation, PageGeometry,
};
use crate::domain::resolution::{CoverImage, CoverOrigin};
use crate::error::{AppError, AppResult};
use crate::integrations::codemark::{CharacterSet, CodeMarkEncoder};

const PT_PER_MM: f32 = 72.0 / 25.4;
const BORDER_GRAY: f32 = 0.5;
/// Horizontal breathing room for text inside a cell
const TEXT_INSET_MM: f32 = 1.5;
const PRODUCER: &str = "cardfold";

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Cell rectangle in page space (points, origin bottom-left)
#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    fn top(&self) -> f32 {
        self.y + self.height
    }

    fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[derive(Default)]
struct PageBuilder {
    operations: Vec<Operation>,
    xobjects: Dictionary,
    has_back: bool,
}

struct OpenDocument {
    path: PathBuf,
    page: PageGeometry,
    document: Document,
    pages_id: ObjectId,
    fonts: Dictionary,
    page_ids: Vec<ObjectId>,
    images: HashMap<(CoverOrigin, u32, u32), ObjectId>,
    current: Option<PageBuilder>,
}

pub struct PdfDocumentWriter {
    encoder: Box<dyn CodeMarkEncoder>,
    charset: CharacterSet,
    state: Option<OpenDocument>,
}

impl PdfDocumentWriter {
    pub fn new(encoder: Box<dyn CodeMarkEncoder>) -> Self {
        Self {
            encoder,
            charset: CharacterSet::Iso8859_15,
            state: None,
        }
    }

    fn open_document(&mut self) -> AppResult<&mut OpenDocument> {
        self.state
            .as_mut()
            .ok_or_else(|| AppError::Document("document is not open".to_string()))
    }

    // ========================================================================
    // PAGE ASSEMBLY
    // ========================================================================

    fn finish_page(open: &mut OpenDocument, builder: PageBuilder) -> AppResult<()> {
        let content = Content {
            operations: builder.operations,
        };
        let content_id = open
            .document
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let resources = dictionary! {
            "Font" => open.fonts.clone(),
            "XObject" => builder.xobjects,
        };

        let page_id = open.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => open.pages_id,
            "Contents" => content_id,
            "Resources" => resources,
        });
        open.page_ids.push(page_id);
        Ok(())
    }

    fn image_object(open: &mut OpenDocument, image: &CoverImage) -> ObjectId {
        let key = (image.origin.clone(), image.width, image.height);
        if let Some(id) = open.images.get(&key) {
            return *id;
        }

        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(i64::from(image.width)),
                "Height" => Object::Integer(i64::from(image.height)),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => Object::Integer(8),
            },
            image.rgb.clone(),
        );
        let id = open.document.add_object(stream);
        open.images.insert(key, id);
        id
    }

    // ========================================================================
    // CELL PAINTING
    // ========================================================================

    fn paint_cell(
        &self,
        open: &mut OpenDocument,
        builder: &mut PageBuilder,
        rect: Rect,
        cell: &CellInstruction<'_>,
        border_width_pt: f32,
    ) -> AppResult<()> {
        let ops = &mut builder.operations;

        // Border
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("G", vec![BORDER_GRAY.into()]));
        ops.push(Operation::new("w", vec![border_width_pt.into()]));
        ops.push(Operation::new(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        ));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));

        if cell.is_shell() {
            return Ok(());
        }

        // Clip, then flip about the cell centre for the front half
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        ));
        ops.push(Operation::new("W", vec![]));
        ops.push(Operation::new("n", vec![]));
        if cell.orientation == Orientation::Inverted {
            let e = 2.0 * rect.x + rect.width;
            let f = 2.0 * rect.y + rect.height;
            ops.push(Operation::new(
                "cm",
                vec![(-1.0f32).into(), 0.0f32.into(), 0.0f32.into(), (-1.0f32).into(), e.into(), f.into()],
            ));
        }

        let mut cursor = rect.top();
        for block in &cell.blocks {
            cursor = self.paint_block(open, builder, rect, cursor, block)?;
        }

        builder.operations.push(Operation::new("Q", vec![]));
        Ok(())
    }

    /// Paint one block with its top at `cursor`; returns the cursor below it
    fn paint_block(
        &self,
        open: &mut OpenDocument,
        builder: &mut PageBuilder,
        rect: Rect,
        cursor: f32,
        block: &Block<'_>,
    ) -> AppResult<f32> {
        let margin = mm_to_pt(block.margin_mm);
        let top = cursor - margin - mm_to_pt(block.padding_top_mm);

        let height = match &block.content {
            BlockContent::BrandMark { image, height_mm } => {
                let height = mm_to_pt(*height_mm);
                let width = height / image.aspect_ratio();
                self.paint_image(open, builder, image, rect.center_x() - width / 2.0, top - height, width, height);
                height
            }
            BlockContent::CodeMark { payload, edge_mm } => {
                let edge = mm_to_pt(*edge_mm);
                self.paint_code_mark(builder, payload, rect.center_x() - edge / 2.0, top - edge, edge)?;
                edge
            }
            BlockContent::Image { image, width_mm } => {
                let width = mm_to_pt(*width_mm);
                let height = width * image.aspect_ratio();
                self.paint_image(open, builder, image, rect.center_x() - width / 2.0, top - height, width, height);
                height
            }
            BlockContent::Spacer => 0.0,
            BlockContent::Text {
                text,
                font_size_pt,
                bold,
                max_height_mm,
            } => {
                let font = if *bold { Font::Bold } else { Font::Regular };
                let max_width = rect.width - 2.0 * mm_to_pt(TEXT_INSET_MM);
                self.paint_text(builder, text, font, *font_size_pt, max_width, rect.center_x(), top, *max_height_mm)
            }
        };

        Ok(top - height - mm_to_pt(block.padding_bottom_mm) - margin)
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_image(
        &self,
        open: &mut OpenDocument,
        builder: &mut PageBuilder,
        image: &CoverImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) {
        let id = Self::image_object(open, image);
        let name = format!("Im{}", id.0);
        builder.xobjects.set(name.as_bytes().to_vec(), id);

        let ops = &mut builder.operations;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![width.into(), 0.0f32.into(), 0.0f32.into(), height.into(), x.into(), y.into()],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        ops.push(Operation::new("Q", vec![]));
    }

    fn paint_code_mark(&self, builder: &mut PageBuilder, payload: &str, x: f32, y: f32, edge: f32) -> AppResult<()> {
        let mark = self.encoder.encode(payload, self.charset)?;
        let modules = mark.width();
        if modules == 0 {
            return Ok(());
        }
        let module = edge / modules as f32;

        let ops = &mut builder.operations;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("g", vec![0.0f32.into()]));
        for row in 0..modules {
            for col in 0..modules {
                if mark.is_dark(col, row) {
                    let mx = x + col as f32 * module;
                    // Row 0 is the top of the symbol
                    let my = y + edge - (row + 1) as f32 * module;
                    ops.push(Operation::new(
                        "re",
                        vec![mx.into(), my.into(), module.into(), module.into()],
                    ));
                }
            }
        }
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }

    /// Returns the height consumed. Empty text still reserves one line so
    /// titles stay aligned across a row.
    #[allow(clippy::too_many_arguments)]
    fn paint_text(
        &self,
        builder: &mut PageBuilder,
        text: &str,
        font: Font,
        size: f32,
        max_width: f32,
        center_x: f32,
        top: f32,
        max_height_mm: Option<f32>,
    ) -> f32 {
        let line_height = size * LEADING;
        let mut lines = wrap_lines(text, font, size, max_width);

        if let Some(max_height_mm) = max_height_mm {
            let max_lines = (mm_to_pt(max_height_mm) / line_height).floor() as usize;
            lines.truncate(max_lines);
        }

        let ops = &mut builder.operations;
        for (index, line) in lines.iter().enumerate() {
            let x = center_x - font.text_width(line, size) / 2.0;
            let baseline = top - index as f32 * line_height - size;
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            ));
            ops.push(Operation::new("Td", vec![x.into(), baseline.into()]));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(win_ansi_bytes(line), StringFormat::Literal)],
            ));
            ops.push(Operation::new("ET", vec![]));
        }

        lines.len().max(1) as f32 * line_height
    }
}

impl DocumentSink for PdfDocumentWriter {
    fn open(&mut self, path: &Path, page: PageGeometry) -> AppResult<()> {
        if self.state.is_some() {
            return Err(AppError::Document("document is already open".to_string()));
        }

        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for font in [Font::Regular, Font::Bold] {
            let id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), id);
        }

        log::debug!(
            "Opened document {} ({} x {} mm)",
            path.display(),
            page.width_mm,
            page.height_mm
        );

        self.state = Some(OpenDocument {
            path: path.to_path_buf(),
            page,
            document,
            pages_id,
            fonts,
            page_ids: Vec::new(),
            images: HashMap::new(),
            current: None,
        });
        Ok(())
    }

    fn add_grid(&mut self, grid: &GridInstruction<'_>) -> AppResult<()> {
        // Take the state out so painting can borrow self and the document at once
        let mut open = self
            .state
            .take()
            .ok_or_else(|| AppError::Document("document is not open".to_string()))?;
        let result = self.place_grid(&mut open, grid);
        self.state = Some(open);
        result
    }

    fn close(&mut self) -> AppResult<()> {
        let mut open = self
            .state
            .take()
            .ok_or_else(|| AppError::Document("document is not open".to_string()))?;

        if let Some(builder) = open.current.take() {
            Self::finish_page(&mut open, builder)?;
        }

        if open.page_ids.is_empty() {
            return Err(AppError::Document("document has no pages".to_string()));
        }

        let page_count = open.page_ids.len();
        let kids: Vec<Object> = open.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let media_box: Vec<Object> = vec![
            0.0f32.into(),
            0.0f32.into(),
            mm_to_pt(open.page.width_mm).into(),
            mm_to_pt(open.page.height_mm).into(),
        ];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count as i64),
            "MediaBox" => media_box,
        };
        open.document.objects.insert(open.pages_id, Object::Dictionary(pages));

        let catalog_id = open.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => open.pages_id,
        });
        open.document.trailer.set("Root", catalog_id);

        let created = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
        let info_id = open.document.add_object(dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
            "CreationDate" => Object::string_literal(created),
        });
        open.document.trailer.set("Info", info_id);

        if let Some(parent) = open.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        open.document.compress();
        open.document.save(&open.path)?;

        log::info!("Wrote {} page(s) to {}", page_count, open.path.display());
        Ok(())
    }
}

impl PdfDocumentWriter {
    fn place_grid(&self, open: &mut OpenDocument, grid: &GridInstruction<'_>) -> AppResult<()> {
        let mut builder = match grid.instance {
            GridInstance::Front => {
                if let Some(previous) = open.current.take() {
                    Self::finish_page(open, previous)?;
                }
                PageBuilder::default()
            }
            GridInstance::Back => match open.current.take() {
                Some(previous) if previous.has_back => {
                    Self::finish_page(open, previous)?;
                    PageBuilder::default()
                }
                Some(current) => current,
                None => PageBuilder::default(),
            },
        };

        let page_width = mm_to_pt(open.page.width_mm);
        let page_height = mm_to_pt(open.page.height_mm);
        let row_height = mm_to_pt(grid.row_height_mm);
        let column_width = mm_to_pt(grid.column_width_mm());
        let left = (page_width - mm_to_pt(grid.strip_width_mm)) / 2.0;
        let bottom = match grid.instance {
            GridInstance::Front => page_height - row_height,
            GridInstance::Back => page_height - 2.0 * row_height,
        };

        for (index, cell) in grid.cells.iter().enumerate() {
            let rect = Rect {
                x: left + index as f32 * column_width,
                y: bottom,
                width: column_width,
                height: row_height,
            };
            self.paint_cell(open, &mut builder, rect, cell, grid.border_width_pt)?;
        }

        if grid.instance == GridInstance::Back {
            builder.has_back = true;
            Self::finish_page(open, builder)?;
        } else {
            open.current = Some(builder);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::codemark::QrCodeEncoder;

    fn page() -> PageGeometry {
        PageGeometry {
            width_mm: 297.0,
            height_mm: 210.0,
        }
    }

    fn grid<'a>(instance: GridInstance, cells: Vec<CellInstruction<'a>>) -> GridInstruction<'a> {
        GridInstruction {
            instance,
            columns: 2,
            column_width_percent: 50.0,
            strip_width_mm: 80.0,
            row_height_mm: 105.0,
            border_width_pt: 1.0,
            cells,
        }
    }

    fn card_cell<'a>(orientation: Orientation, cover: &'a CoverImage) -> CellInstruction<'a> {
        CellInstruction {
            orientation,
            blocks: vec![
                Block::new(BlockContent::CodeMark {
                    payload: "https://radio.example/stream",
                    edge_mm: 22.0,
                })
                .with_padding_top(11.0),
                Block::new(BlockContent::Image {
                    image: cover,
                    width_mm: 30.0,
                })
                .with_padding_top(5.0),
                Block::new(BlockContent::Text {
                    text: "Radio Example",
                    font_size_pt: 9.0,
                    bold: true,
                    max_height_mm: Some(22.0),
                }),
            ],
        }
    }

    fn shell() -> CellInstruction<'static> {
        CellInstruction {
            orientation: Orientation::Upright,
            blocks: Vec::new(),
        }
    }

    #[test]
    fn test_one_page_per_front_back_pair() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cards.pdf");
        let cover = CoverImage::new(2, 2, vec![255; 12], CoverOrigin::Url("https://i.example/c".into()));

        let mut writer = PdfDocumentWriter::new(Box::new(QrCodeEncoder));
        writer.open(&path, page()).unwrap();
        for _ in 0..2 {
            writer
                .add_grid(&grid(GridInstance::Front, vec![card_cell(Orientation::Inverted, &cover), shell()]))
                .unwrap();
            writer
                .add_grid(&grid(GridInstance::Back, vec![card_cell(Orientation::Upright, &cover), shell()]))
                .unwrap();
        }
        assert!(!path.exists(), "nothing is written before close");
        writer.close().unwrap();

        let document = Document::load(&path).unwrap();
        assert_eq!(document.get_pages().len(), 2);
    }

    #[test]
    fn test_add_grid_before_open_fails() {
        let mut writer = PdfDocumentWriter::new(Box::new(QrCodeEncoder));
        let result = writer.add_grid(&grid(GridInstance::Back, vec![shell()]));
        assert!(matches!(result, Err(AppError::Document(_))));
    }

    #[test]
    fn test_close_without_pages_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");

        let mut writer = PdfDocumentWriter::new(Box::new(QrCodeEncoder));
        writer.open(&path, page()).unwrap();
        assert!(matches!(writer.close(), Err(AppError::Document(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_double_open_fails() {
        let mut writer = PdfDocumentWriter::new(Box::new(QrCodeEncoder));
        writer.open(Path::new("a.pdf"), page()).unwrap();
        assert!(writer.open(Path::new("b.pdf"), page()).is_err());
    }

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 0.001);
    }

    fn shown_lines(builder: &PageBuilder) -> usize {
        builder.operations.iter().filter(|op| op.operator == "Tj").count()
    }

    #[test]
    fn test_long_title_clipped_to_max_height() {
        let writer = PdfDocumentWriter::new(Box::new(QrCodeEncoder));
        let mut builder = PageBuilder::default();
        let title = "Symphony ".repeat(200);
        let max_width = mm_to_pt(40.0 - 2.0 * TEXT_INSET_MM);

        let height = writer.paint_text(
            &mut builder,
            &title,
            Font::Bold,
            9.0,
            max_width,
            100.0,
            500.0,
            Some(22.0),
        );

        // 22 mm is 62.36 pt, room for five 10.8 pt lines
        assert_eq!(shown_lines(&builder), 5);
        assert!((height - 5.0 * 9.0 * LEADING).abs() < 1e-3);
        assert!(height <= mm_to_pt(22.0));
    }

    #[test]
    fn test_unbounded_text_keeps_every_line() {
        let writer = PdfDocumentWriter::new(Box::new(QrCodeEncoder));
        let mut builder = PageBuilder::default();
        let text = "Symphony ".repeat(20);
        let max_width = mm_to_pt(37.0);

        let expected = wrap_lines(&text, Font::Regular, 8.0, max_width).len();
        let height = writer.paint_text(&mut builder, &text, Font::Regular, 8.0, max_width, 100.0, 500.0, None);

        assert!(expected > 5);
        assert_eq!(shown_lines(&builder), expected);
        assert!((height - expected as f32 * 8.0 * LEADING).abs() < 1e-3);
    }

    #[test]
    fn test_empty_artist_reserves_one_line() {
        let writer = PdfDocumentWriter::new(Box::new(QrCodeEncoder));
        let mut builder = PageBuilder::default();

        let height = writer.paint_text(&mut builder, "", Font::Regular, 8.0, 100.0, 100.0, 500.0, None);

        assert_eq!(shown_lines(&builder), 0);
        assert!((height - 8.0 * LEADING).abs() < 1e-3);
    }
}
