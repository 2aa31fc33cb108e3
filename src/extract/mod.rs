//! Text extraction over the capability set the pipelines dispatch to:
//! PDF page iteration, DOCX paragraph collection, HTML flattening, and
//! passthrough for advisory kinds.
//!
//! Each extractor converts acquired content into an [`Extraction`]
//! (`crate::models::Extraction`): text is always present, even on failure,
//! so every item can still produce an artifact.

pub mod docx;
pub mod html;
pub mod pdf;

pub use docx::DocxError;
