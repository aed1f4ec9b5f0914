// src/integrations/mod.rs
//
// External Integrations Module
//
// Every collaborator the pipeline talks to sits behind a trait here:
// - spotify: MetadataProvider (Web API, client credentials)
// - images: ImageLoader (local files and HTTP downloads)
// - codemark: CodeMarkEncoder (QR symbols)
// - pdf: DocumentSink (lopdf writer)

pub mod codemark;
pub mod images;
pub mod pdf;
pub mod spotify;

pub use codemark::{CharacterSet, CodeMarkEncoder, QrCodeEncoder};
pub use images::{HttpImageLoader, ImageLoader};
pub use pdf::{DocumentSink, PdfDocumentWriter};
pub use spotify::{MetadataProvider, SpotifyClient, UnconfiguredProvider};
