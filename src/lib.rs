//! # undocx
//!
//! Plain text and embedded image extraction from Word (.docx) documents.
//!
//! The archive is read by walking its local file headers, the main document
//! part is inflated and scanned for paragraphs, and raster images under
//! `word/media/` are returned as `data:` URIs.
//!
//! ## Quick Start
//!
//! ```no_run
//! let data = std::fs::read("document.docx")?;
//! let result = undocx::parse_docx(&data)?;
//!
//! println!("{}", result.text);
//! println!("Paragraphs: {}", result.paragraphs.len());
//! println!("Images: {}", result.images.len());
//! for warning in &result.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! # Ok::<(), undocx::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: `parse_docx_async`, running the parse on Tokio's blocking pool

pub mod container;
pub mod docx;
pub mod error;
pub mod inflate;
pub mod model;
pub mod options;
pub mod render;

// Re-exports
pub use container::{CompressionMethod, ZipEntry};
pub use docx::{DocxParser, ParseStage};
pub use error::{Error, Result};
pub use model::DocxParseResult;
pub use options::ParseOptions;

use std::path::Path;

/// Parse a .docx buffer with default options.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("document.docx")?;
/// let result = undocx::parse_docx(&data)?;
/// assert_eq!(result.text, result.paragraphs.join("\n\n"));
/// # Ok::<(), undocx::Error>(())
/// ```
pub fn parse_docx(data: &[u8]) -> Result<DocxParseResult> {
    parse_docx_with_options(data, &ParseOptions::default())
}

/// Parse a .docx buffer with options.
///
/// `max_input_bytes` is not enforced here; the buffer is already in memory.
pub fn parse_docx_with_options(data: &[u8], options: &ParseOptions) -> Result<DocxParseResult> {
    DocxParser::with_options(data, options.clone()).parse()
}

/// Read and parse a .docx file.
///
/// Rejects files larger than `options.max_input_bytes` before reading them.
///
/// # Example
///
/// ```no_run
/// use undocx::{parse_file, ParseOptions};
///
/// let options = ParseOptions::new().with_max_input_bytes(20 * 1024 * 1024);
/// let result = parse_file("report.docx", &options)?;
/// # Ok::<(), undocx::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<DocxParseResult> {
    let path = path.as_ref();
    if let Some(limit) = options.max_input_bytes {
        let size = std::fs::metadata(path)?.len();
        if size > limit {
            return Err(Error::InputTooLarge { size, limit });
        }
    }
    let data = std::fs::read(path)?;
    parse_docx_with_options(&data, options)
}

/// Extract plain text from a .docx file.
///
/// # Example
///
/// ```no_run
/// let text = undocx::extract_text("document.docx")?;
/// println!("{}", text);
/// # Ok::<(), undocx::Error>(())
/// ```
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let options = ParseOptions::new().with_images(false);
    Ok(parse_file(path, &options)?.text)
}

/// Parse a .docx buffer on Tokio's blocking thread pool.
#[cfg(feature = "async")]
pub async fn parse_docx_async(data: Vec<u8>, options: ParseOptions) -> Result<DocxParseResult> {
    tokio::task::spawn_blocking(move || parse_docx_with_options(&data, &options))
        .await
        .map_err(|e| Error::Task(e.to_string()))?
}
