//! Synthetic .docx builders shared by the integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

pub const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

/// Wrap a body fragment in a `w:document` element.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{}</w:body>
</w:document>"#,
        body
    )
}

/// Build a paragraph from plain run texts.
pub fn paragraph(runs: &[&str]) -> String {
    let mut xml = String::from("<w:p>");
    for run in runs {
        xml.push_str(&format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, run));
    }
    xml.push_str("</w:p>");
    xml
}

/// Fake PNG payload of the given size.
pub fn png_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend((0..len.saturating_sub(8)).map(|i| (i % 251) as u8));
    data.truncate(len);
    data
}

/// Build an archive with `zip::ZipWriter`, entries in the given order.
pub fn build_docx(files: &[(&str, &[u8])], method: CompressionMethod) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default().compression_method(method);
        for (name, data) in files {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

/// A realistic document: package parts, the main part, then `media`.
pub fn build_standard_docx(body: &str, media: &[(&str, &[u8])], method: CompressionMethod) -> Vec<u8> {
    let xml = document_xml(body);
    let mut files: Vec<(&str, &[u8])> = vec![
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("word/document.xml", xml.as_bytes()),
    ];
    files.extend_from_slice(media);
    build_docx(&files, method)
}

/// Hand-assembled local file header followed by the payload.
///
/// Sizes in the header describe `payload` as given; `method` is written
/// verbatim so callers can pass pre-compressed data.
pub fn local_entry(name: &str, method: u16, payload: &[u8], uncompressed_size: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&[0x50, 0x4B, 0x03, 0x04]);
    out.extend_from_slice(&20u16.to_le_bytes()); // version needed
    out.extend_from_slice(&0u16.to_le_bytes()); // flags
    out.extend_from_slice(&method.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // mod time
    out.extend_from_slice(&0u16.to_le_bytes()); // mod date
    out.extend_from_slice(&0u32.to_le_bytes()); // crc32
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&uncompressed_size.to_le_bytes());
    out.extend_from_slice(&(name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // extra length
    out.extend_from_slice(name.as_bytes());
    out.extend_from_slice(payload);
    out
}

/// Stored local entry.
pub fn stored_entry(name: &str, payload: &[u8]) -> Vec<u8> {
    local_entry(name, 0, payload, payload.len() as u32)
}

/// Raw-DEFLATE local entry.
pub fn deflated_entry(name: &str, payload: &[u8]) -> Vec<u8> {
    let compressed = miniz_oxide::deflate::compress_to_vec(payload, 6);
    local_entry(name, 8, &compressed, payload.len() as u32)
}

/// Data descriptor record (signature, crc32, sizes).
pub fn data_descriptor(compressed: u32, uncompressed: u32) -> Vec<u8> {
    let mut out = vec![0x50, 0x4B, 0x07, 0x08];
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&compressed.to_le_bytes());
    out.extend_from_slice(&uncompressed.to_le_bytes());
    out
}
