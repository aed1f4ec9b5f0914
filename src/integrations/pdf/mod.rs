// src/integrations/pdf/mod.rs
//
// Document collaborator
//
// The layout engine talks to a DocumentSink; the PDF writer is the only
// production implementation.

pub mod metrics;
pub mod sink;
pub mod writer;

pub use sink::DocumentSink;
pub use writer::{mm_to_pt, PdfDocumentWriter};
