//! Paragraph text extraction from `word/document.xml`.
//!
//! A paragraph runs from a `<w:p>` start tag to the next `</w:p>` end tag.
//! Inside it, one left-to-right pass maps line breaks to `\n`, tabs to `\t`
//! and `<w:t>` runs to their literal text, so token order is document order.
//! Tables are not reconstructed; each cell paragraph comes out on its own.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Result of scanning a document part for paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphScan {
    /// Non-empty paragraphs in document order
    pub paragraphs: Vec<String>,
    /// Syntax error that stopped the scan early, if any
    pub error: Option<String>,
}

/// Extract non-empty paragraph strings from document XML.
pub fn extract_paragraphs(xml: &str) -> Vec<String> {
    scan_paragraphs(xml).paragraphs
}

/// Scan document XML for paragraphs, reporting where a malformed part ended
/// the scan.
///
/// Run text is returned exactly as written in the part; character and entity
/// references such as `&amp;` are not decoded.
pub fn scan_paragraphs(xml: &str) -> ParagraphScan {
    let mut reader = Reader::from_str(xml);
    // Whitespace inside runs is content
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = false;
    reader.config_mut().allow_unmatched_ends = true;

    let mut scan = ParagraphScan::default();
    let mut buf = Vec::new();
    let mut current: Option<String> = None;
    let mut in_ppr = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    if current.is_none() {
                        current = Some(String::new());
                        in_ppr = false;
                        in_text = false;
                    }
                }
                b"w:pPr" => in_ppr = true,
                b"w:t" => in_text = current.is_some(),
                name => push_control(&mut current, name, in_ppr),
            },
            Ok(Event::Empty(ref e)) => push_control(&mut current, e.name().as_ref(), in_ppr),
            Ok(Event::Text(ref e)) => {
                if in_text {
                    if let Some(para) = current.as_mut() {
                        para.push_str(&String::from_utf8_lossy(e));
                    }
                }
            }
            Ok(Event::CData(ref e)) => {
                if in_text {
                    if let Some(para) = current.as_mut() {
                        para.push_str(&String::from_utf8_lossy(e));
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:pPr" => in_ppr = false,
                b"w:p" => {
                    if let Some(para) = current.take() {
                        if !para.trim().is_empty() {
                            scan.paragraphs.push(para);
                        }
                    }
                    in_ppr = false;
                    in_text = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                scan.error = Some(format!(
                    "at byte {}: {}",
                    reader.error_position(),
                    e
                ));
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    scan
}

/// Append the character a break or tab element stands for.
fn push_control(current: &mut Option<String>, name: &[u8], in_ppr: bool) {
    // Tabs under w:pPr are tab stop definitions, not content
    if in_ppr {
        return;
    }
    let Some(para) = current.as_mut() else {
        return;
    };
    match name {
        b"w:br" | b"w:cr" => para.push('\n'),
        b"w:tab" => para.push('\t'),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    #[test]
    fn test_single_paragraph() {
        let xml = doc("<w:p><w:r><w:t>Hello</w:t></w:r></w:p>");
        assert_eq!(extract_paragraphs(&xml), vec!["Hello"]);
    }

    #[test]
    fn test_tokens_in_document_order() {
        let xml = doc("<w:p><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:p>");
        assert_eq!(extract_paragraphs(&xml), vec!["A\tB\nC"]);
    }

    #[test]
    fn test_runs_concatenate() {
        let xml = doc(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r><w:r><w:t xml:space="preserve"> and plain</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_paragraphs(&xml), vec!["Bold and plain"]);
    }

    #[test]
    fn test_empty_paragraphs_dropped() {
        let xml = doc(
            "<w:p></w:p><w:p><w:r><w:t>   </w:t></w:r></w:p><w:p><w:r><w:t>Kept</w:t></w:r></w:p><w:p/>",
        );
        assert_eq!(extract_paragraphs(&xml), vec!["Kept"]);
    }

    #[test]
    fn test_self_closing_paragraph_does_not_merge() {
        let xml = doc("<w:p/><w:p><w:r><w:t>One</w:t></w:r></w:p><w:p><w:r><w:t>Two</w:t></w:r></w:p>");
        assert_eq!(extract_paragraphs(&xml), vec!["One", "Two"]);
    }

    #[test]
    fn test_whitespace_preserved_inside_paragraph() {
        let xml = doc(r#"<w:p><w:r><w:t xml:space="preserve">  padded  </w:t></w:r></w:p>"#);
        assert_eq!(extract_paragraphs(&xml), vec!["  padded  "]);
    }

    #[test]
    fn test_tab_stops_are_not_content() {
        let xml = doc(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Name</w:t></w:r><w:r><w:tab/><w:t>Value</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_paragraphs(&xml), vec!["Name\tValue"]);
    }

    #[test]
    fn test_carriage_return_is_line_break() {
        let xml = doc("<w:p><w:r><w:t>Line 1</w:t><w:cr/><w:t>Line 2</w:t></w:r></w:p>");
        assert_eq!(extract_paragraphs(&xml), vec!["Line 1\nLine 2"]);
    }

    #[test]
    fn test_entities_not_decoded() {
        let xml = doc("<w:p><w:r><w:t>Tom &amp; Jerry &lt;3</w:t></w:r></w:p>");
        assert_eq!(extract_paragraphs(&xml), vec!["Tom &amp; Jerry &lt;3"]);
    }

    #[test]
    fn test_table_cells_flatten() {
        let xml = doc(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell 1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Cell 2</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        assert_eq!(extract_paragraphs(&xml), vec!["Cell 1", "Cell 2"]);
    }

    #[test]
    fn test_non_text_runs_ignored() {
        let xml = doc(
            r#"<w:p><w:r><w:instrText xml:space="preserve"> PAGE </w:instrText></w:r><w:r><w:delText>gone</w:delText></w:r><w:r><w:t>visible</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_paragraphs(&xml), vec!["visible"]);
    }

    #[test]
    fn test_nested_paragraph_ends_at_first_close() {
        let xml = doc(
            "<w:p><w:r><w:t>Outer</w:t></w:r><w:r><w:txbxContent><w:p><w:r><w:t>Inner</w:t></w:r></w:p></w:txbxContent></w:r><w:r><w:t>Tail</w:t></w:r></w:p><w:p><w:r><w:t>Next</w:t></w:r></w:p>",
        );
        assert_eq!(extract_paragraphs(&xml), vec!["OuterInner", "Next"]);
    }

    #[test]
    fn test_text_outside_paragraphs_ignored() {
        let xml = doc("<w:r><w:t>stray</w:t></w:r><w:p><w:r><w:t>real</w:t></w:r></w:p>");
        assert_eq!(extract_paragraphs(&xml), vec!["real"]);
    }

    #[test]
    fn test_malformed_tail_keeps_completed_paragraphs() {
        let xml = "<w:body><w:p><w:r><w:t>ok</w:t></w:r></w:p><w:p><w:r><w:t>lost</w:t><!-- never closed";
        let scan = scan_paragraphs(xml);
        assert_eq!(scan.paragraphs, vec!["ok"]);
        assert!(scan.error.is_some());
    }

    #[test]
    fn test_stray_close_tag_does_not_stop_scan() {
        let scan = scan_paragraphs("<w:p><w:t>A</w:t></w:p></w:r><w:p><w:t>B</w:t></w:p>");
        assert_eq!(scan.paragraphs, vec!["A", "B"]);
        assert!(scan.error.is_none());

        let xml = doc("<w:p><w:r><w:t>A</w:t></w:r></w:p></w:r></w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p>");
        assert_eq!(extract_paragraphs(&xml), vec!["A", "B"]);
    }

    #[test]
    fn test_cdata_run_text() {
        let xml = doc("<w:p><w:r><w:t><![CDATA[x < y]]></w:t><w:t> ok</w:t></w:r></w:p>");
        assert_eq!(extract_paragraphs(&xml), vec!["x < y ok"]);
    }

    #[test]
    fn test_no_paragraphs() {
        let scan = scan_paragraphs(&doc(""));
        assert!(scan.paragraphs.is_empty());
        assert!(scan.error.is_none());
    }
}
