//! DOCX parser implementation.

use crate::container::{self, ZipEntry};
use crate::error::{Error, Result};
use crate::inflate::decompress;
use crate::model::DocxParseResult;
use crate::options::ParseOptions;

use super::media::extract_images;
use super::paragraphs::scan_paragraphs;

/// Path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Stages a parse moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// Checking the ZIP signature
    Validating,
    /// Scanning entries for the main document part
    LocatingDocument,
    /// Decompressing the main document part
    Inflating,
    /// Pulling paragraphs and images
    Extracting,
    /// Result assembled
    Done,
}

/// One-shot parser for a DOCX byte buffer.
///
/// Holds nothing beyond the borrowed input and the options; each call to
/// [`DocxParser::parse`] starts from scratch.
pub struct DocxParser<'a> {
    data: &'a [u8],
    options: ParseOptions,
    stage: ParseStage,
}

impl<'a> DocxParser<'a> {
    /// Create a parser over a complete .docx buffer with default options.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, ParseOptions::default())
    }

    /// Create a parser with explicit options.
    pub fn with_options(data: &'a [u8], options: ParseOptions) -> Self {
        Self {
            data,
            options,
            stage: ParseStage::Validating,
        }
    }

    /// Stage the parser last entered.
    pub fn stage(&self) -> ParseStage {
        self.stage
    }

    fn enter(&mut self, stage: ParseStage) {
        log::debug!("{:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }

    /// Parse the document.
    ///
    /// Structural problems and a main document part that cannot be inflated
    /// are errors. Image problems and empty documents are warnings.
    pub fn parse(&mut self) -> Result<DocxParseResult> {
        self.stage = ParseStage::Validating;
        if !container::is_zip_file(self.data) {
            return Err(Error::InvalidArchive("not a valid ZIP archive".to_string()));
        }

        self.enter(ParseStage::LocatingDocument);
        let entries = container::parse_entries(self.data);
        log::debug!("found {} archive entries", entries.len());
        if entries.is_empty() {
            return Err(Error::InvalidArchive("no entries".to_string()));
        }
        let document = container::find_entry(&entries, DOCUMENT_PART).ok_or_else(|| {
            container::missing_part_error(&entries, DOCUMENT_PART, self.options.entry_list_limit)
        })?;

        self.enter(ParseStage::Inflating);
        let xml = container::decode_xml_bytes(&decompress(document)?);

        self.enter(ParseStage::Extracting);
        let mut warnings = Vec::new();
        let scan = scan_paragraphs(&xml);
        if let Some(err) = scan.error {
            log::warn!("{} is malformed {}", DOCUMENT_PART, err);
            warnings.push(format!(
                "{} is malformed {}; kept {} paragraphs read before the error",
                DOCUMENT_PART,
                err,
                scan.paragraphs.len()
            ));
        }
        let images = self.extract_images(&entries, &mut warnings);

        self.enter(ParseStage::Done);
        Ok(DocxParseResult::new(scan.paragraphs, images, warnings))
    }

    fn extract_images(&self, entries: &[ZipEntry<'_>], warnings: &mut Vec<String>) -> Vec<String> {
        if !self.options.extract_images {
            return Vec::new();
        }
        let media = extract_images(entries, self.options.min_image_bytes);
        warnings.extend(media.warnings);
        media.images
    }
}
