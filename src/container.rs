//! ZIP container scanning for OOXML documents.
//!
//! Entries are discovered by walking local file headers from the start of the
//! buffer. The central directory is never consulted: the scan stops at the
//! first position that does not carry a local header signature, which is where
//! the central directory begins in a well-formed archive.

use crate::error::Error;
use std::borrow::Cow;

/// ZIP local file header magic bytes: PK\x03\x04
pub const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Optional data descriptor magic bytes: PK\x07\x08
const DATA_DESCRIPTOR_MAGIC: [u8; 4] = [0x50, 0x4B, 0x07, 0x08];

/// Fixed size of a local file header.
const LOCAL_HEADER_LEN: usize = 30;

/// Size of a data descriptor including its signature.
const DATA_DESCRIPTOR_LEN: usize = 16;

/// Compression method declared in a local file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Method 0: data is stored as-is.
    Stored,
    /// Method 8: raw DEFLATE.
    Deflated,
    /// Any other method value.
    Other(u16),
}

impl CompressionMethod {
    /// Returns the raw method value.
    pub fn code(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflated => 8,
            CompressionMethod::Other(code) => *code,
        }
    }
}

impl From<u16> for CompressionMethod {
    fn from(code: u16) -> Self {
        match code {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflated,
            other => CompressionMethod::Other(other),
        }
    }
}

/// A single archive entry, borrowing its payload from the input buffer.
#[derive(Debug, Clone)]
pub struct ZipEntry<'a> {
    /// Entry path as stored in the archive (`/` or `\` separated)
    pub filename: String,
    /// Declared compression method
    pub compression: CompressionMethod,
    /// Compressed payload
    pub data: &'a [u8],
    /// Declared uncompressed size; advisory only
    pub uncompressed_size: u32,
}

impl ZipEntry<'_> {
    /// Entry path with backslashes converted to forward slashes.
    pub fn normalized_name(&self) -> Cow<'_, str> {
        if self.filename.contains('\\') {
            Cow::Owned(self.filename.replace('\\', "/"))
        } else {
            Cow::Borrowed(&self.filename)
        }
    }

    /// Check whether this entry is the part at `path` (given with `/`).
    pub fn is_named(&self, path: &str) -> bool {
        self.normalized_name() == path
    }

    /// Check whether this entry lives under `prefix` (given with `/`).
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.normalized_name().starts_with(prefix)
    }
}

/// Check if data starts with ZIP local header magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

/// Scan local file headers into an ordered list of entries.
///
/// Never fails: a missing signature, a truncated header, or the end of the
/// buffer all terminate the scan. An empty result is for the caller to judge.
pub fn parse_entries(data: &[u8]) -> Vec<ZipEntry<'_>> {
    let mut entries = Vec::new();
    let mut offset = 0usize;

    while data.len().saturating_sub(offset) >= LOCAL_HEADER_LEN {
        if data[offset..offset + 4] != ZIP_MAGIC {
            break;
        }

        let header = &data[offset..offset + LOCAL_HEADER_LEN];
        let method = read_u16(header, 8);
        let compressed_size = read_u32(header, 18) as usize;
        let uncompressed_size = read_u32(header, 22);
        let name_len = read_u16(header, 26) as usize;
        let extra_len = read_u16(header, 28) as usize;

        let name_start = offset + LOCAL_HEADER_LEN;
        let name_end = name_start + name_len;
        if name_end > data.len() {
            log::debug!("local header at {} has a truncated filename", offset);
            break;
        }
        let filename = String::from_utf8_lossy(&data[name_start..name_end]).into_owned();

        let data_start = (name_end + extra_len).min(data.len());
        let data_end = data_start.saturating_add(compressed_size);
        if data_end > data.len() {
            log::debug!("entry {} is truncated by the end of the buffer", filename);
        }

        entries.push(ZipEntry {
            filename,
            compression: CompressionMethod::from(method),
            data: &data[data_start..data_end.min(data.len())],
            uncompressed_size,
        });

        offset = data_end;
        if data.len().saturating_sub(offset) >= 4
            && data[offset..offset + 4] == DATA_DESCRIPTOR_MAGIC
        {
            offset += DATA_DESCRIPTOR_LEN;
        }
    }

    entries
}

/// Fix XML encoding declaration from UTF-16 to UTF-8.
///
/// Once UTF-16 content has been decoded into a Rust `String` the declaration
/// no longer describes the bytes.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let (decl, rest) = content.split_at(end_decl + 2);
            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");
            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML part bytes into a string.
///
/// Honours UTF-8 and UTF-16 LE/BE byte order marks. Without a BOM the bytes
/// are read as UTF-8, with invalid sequences replaced.
pub fn decode_xml_bytes(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let units = rest
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        return fix_xml_encoding_declaration(&decode_utf16(units));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        return fix_xml_encoding_declaration(&decode_utf16(units));
    }

    String::from_utf8_lossy(bytes).into_owned()
}

fn decode_utf16(units: impl Iterator<Item = u16>) -> String {
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Locate the entry named `path`, accepting either separator style.
pub fn find_entry<'e, 'a>(entries: &'e [ZipEntry<'a>], path: &str) -> Option<&'e ZipEntry<'a>> {
    entries.iter().find(|entry| entry.is_named(path))
}

/// Build the diagnostic for a missing part, listing what the archive holds.
pub(crate) fn missing_part_error(entries: &[ZipEntry<'_>], path: &str, limit: usize) -> Error {
    let names = entries
        .iter()
        .map(|e| e.filename.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let listing = if names.chars().count() > limit {
        let truncated: String = names.chars().take(limit).collect();
        format!("{}...", truncated)
    } else {
        names
    };

    Error::InvalidArchive(format!("{} not found; entries: {}", path, listing))
}
