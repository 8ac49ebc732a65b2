//! Report infrastructure implementations

mod pdf_encoder;

pub use pdf_encoder::{PdfEncoder, PDF_CONTENT_TYPE};
