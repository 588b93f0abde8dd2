//! DOCX (Word) text and image extraction.

pub mod media;
pub mod paragraphs;
mod parser;

pub use media::{extract_images, image_mime_type, ExtractedMedia};
pub use paragraphs::{extract_paragraphs, scan_paragraphs, ParagraphScan};
pub use parser::{DocxParser, ParseStage, DOCUMENT_PART};
