pub mod document;
pub mod removal;

pub use document::PdfDocument;
