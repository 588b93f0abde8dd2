//! Embedded image extraction from `word/media/`.

use crate::container::ZipEntry;
use crate::error::Error;
use crate::inflate::decompress;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Archive folder holding embedded media.
pub const MEDIA_PREFIX: &str = "word/media/";

/// Bytes encoded per base64 step; a multiple of 3 so windows join without padding.
const ENCODE_WINDOW: usize = 3 * 2730;

/// Images and soft failures collected from the media folder.
#[derive(Debug, Clone, Default)]
pub struct ExtractedMedia {
    /// Data URIs in archive order
    pub images: Vec<String>,
    /// One message per image that could not be read, keyed by entry name
    pub warnings: Vec<String>,
}

/// Resolve the MIME type of a supported raster image from its extension.
///
/// Vector formats (EMF, WMF) and unknown extensions return `None`.
pub fn image_mime_type(path: &str) -> Option<&'static str> {
    let ext = path.rsplit_once('.')?.1.to_ascii_lowercase();

    Some(match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "webp" => "image/webp",
        _ => return None,
    })
}

/// Encode bytes as a `data:` URI.
pub fn to_data_uri(mime: &str, data: &[u8]) -> String {
    let prefix = format!("data:{};base64,", mime);
    let mut uri = String::with_capacity(prefix.len() + data.len().div_ceil(3) * 4);
    uri.push_str(&prefix);
    for window in data.chunks(ENCODE_WINDOW) {
        STANDARD.encode_string(window, &mut uri);
    }
    uri
}

/// Collect supported raster images from the media folder.
///
/// Never fails. Unsupported formats, unsupported compression methods and
/// payloads under `min_bytes` are skipped without comment; entries that fail
/// to inflate produce a warning.
pub fn extract_images(entries: &[ZipEntry<'_>], min_bytes: usize) -> ExtractedMedia {
    let mut media = ExtractedMedia::default();

    for entry in entries.iter().filter(|e| e.has_prefix(MEDIA_PREFIX)) {
        let Some(mime) = image_mime_type(&entry.filename) else {
            log::debug!("skipping {}: not a supported raster format", entry.filename);
            continue;
        };

        let data = match decompress(entry) {
            Ok(data) => data,
            Err(Error::UnsupportedCompressionMethod { method, .. }) => {
                log::debug!(
                    "skipping {}: compression method {} not supported",
                    entry.filename,
                    method
                );
                continue;
            }
            Err(e) => {
                log::warn!("failed to extract image {}: {}", entry.filename, e);
                media
                    .warnings
                    .push(format!("failed to extract image {}: {}", entry.filename, e));
                continue;
            }
        };

        if data.len() < min_bytes {
            log::debug!(
                "skipping {}: {} bytes is below the {} byte floor",
                entry.filename,
                data.len(),
                min_bytes
            );
            continue;
        }

        media.images.push(to_data_uri(mime, &data));
    }

    media
}
