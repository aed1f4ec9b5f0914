// src/integrations/pdf/sink.rs

use std::path::Path;

use crate::domain::layout::{GridInstruction, PageGeometry};
use crate::error::AppResult;

/// Write-once output document.
///
/// Lifecycle: `open` once, `add_grid` in print order, `close` once. Nothing
/// is required to reach the filesystem before `close`.
pub trait DocumentSink {
    fn open(&mut self, path: &Path, page: PageGeometry) -> AppResult<()>;

    fn add_grid(&mut self, grid: &GridInstruction<'_>) -> AppResult<()>;

    fn close(&mut self) -> AppResult<()>;
}
