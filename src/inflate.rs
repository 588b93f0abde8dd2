//! Entry decompression.

use crate::container::{CompressionMethod, ZipEntry};
use crate::error::{Error, Result};
use miniz_oxide::inflate::stream::{inflate, InflateState};
use miniz_oxide::{DataFormat, MZError, MZFlush, MZStatus};
use std::borrow::Cow;

/// Output window handed to the inflater on each step.
const CHUNK_SIZE: usize = 32 * 1024;

/// Decompress an entry according to its declared method.
///
/// Stored entries are returned without copying. Deflated entries are raw
/// DEFLATE streams (no zlib or gzip envelope) and are inflated in fixed-size
/// output windows; the declared uncompressed size is not used for sizing.
pub fn decompress<'a>(entry: &ZipEntry<'a>) -> Result<Cow<'a, [u8]>> {
    match entry.compression {
        CompressionMethod::Stored => Ok(Cow::Borrowed(entry.data)),
        CompressionMethod::Deflated => inflate_raw(entry.data)
            .map(Cow::Owned)
            .map_err(|reason| Error::DecompressionFailure {
                entry: entry.filename.clone(),
                reason,
            }),
        CompressionMethod::Other(method) => Err(Error::UnsupportedCompressionMethod {
            entry: entry.filename.clone(),
            method,
        }),
    }
}

/// Inflate a raw DEFLATE stream, collecting output chunks until the end of
/// stream marker.
fn inflate_raw(compressed: &[u8]) -> std::result::Result<Vec<u8>, String> {
    let mut state = InflateState::new_boxed(DataFormat::Raw);
    let mut window = vec![0u8; CHUNK_SIZE];
    let mut chunks: Vec<Vec<u8>> = Vec::new();
    let mut input = compressed;

    loop {
        let step = inflate(&mut state, input, &mut window, MZFlush::None);
        input = &input[step.bytes_consumed..];
        if step.bytes_written > 0 {
            chunks.push(window[..step.bytes_written].to_vec());
        }

        match step.status {
            Ok(MZStatus::StreamEnd) => break,
            Ok(MZStatus::Ok) => {
                if step.bytes_consumed == 0 && step.bytes_written == 0 {
                    return Err("inflate made no progress".to_string());
                }
            }
            Ok(MZStatus::NeedDict) => return Err("stream requires a preset dictionary".to_string()),
            Err(MZError::Buf) => return Err("unexpected end of compressed data".to_string()),
            Err(MZError::Data) => return Err("invalid DEFLATE data".to_string()),
            Err(e) => return Err(format!("inflate error: {:?}", e)),
        }
    }

    if !input.is_empty() {
        log::debug!("{} trailing bytes after end of DEFLATE stream", input.len());
    }

    Ok(chunks.concat())
}
