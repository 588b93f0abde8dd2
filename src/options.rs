//! Parse options configuration.

/// Default size floor for embedded images, in decompressed bytes.
pub const DEFAULT_MIN_IMAGE_BYTES: usize = 50;

/// Default character budget for the entry listing in missing-part errors.
pub const DEFAULT_ENTRY_LIST_LIMIT: usize = 512;

/// Options controlling a parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Extract embedded raster images from `word/media/`
    pub extract_images: bool,

    /// Images smaller than this many decompressed bytes are dropped
    pub min_image_bytes: usize,

    /// Maximum characters of entry names quoted in a missing-part error
    pub entry_list_limit: usize,

    /// Reject input files larger than this (file entry points only)
    pub max_input_bytes: Option<u64>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extract_images: true,
            min_image_bytes: DEFAULT_MIN_IMAGE_BYTES,
            entry_list_limit: DEFAULT_ENTRY_LIST_LIMIT,
            max_input_bytes: None,
        }
    }
}

impl ParseOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Set the minimum decompressed image size.
    pub fn with_min_image_bytes(mut self, bytes: usize) -> Self {
        self.min_image_bytes = bytes;
        self
    }

    /// Set the character budget for entry listings in diagnostics.
    pub fn with_entry_list_limit(mut self, limit: usize) -> Self {
        self.entry_list_limit = limit;
        self
    }

    /// Set the maximum accepted input file size.
    pub fn with_max_input_bytes(mut self, limit: u64) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }
}
