//! Writing a document model back into its .docx package.

use std::collections::HashMap;
use std::ops::Range;

use quick_xml::escape::partial_escape;

use crate::error::Result;
use crate::model::Document;
use crate::parser::{DocxParser, Package};

/// Writes a modified [`Document`] back into the package it was parsed from.
///
/// Only the `w:t` elements of runs whose text changed are rewritten; every
/// other byte of the main part, and every other part of the package, is
/// carried over as it was.
pub struct DocxWriter {
    package: Package,
    main_part: String,
    xml: String,
}

impl DocxWriter {
    /// Create a writer from the parser the document came from.
    pub fn new(parser: DocxParser) -> Self {
        let (package, main_part, xml) = parser.into_parts();
        Self {
            package,
            main_part,
            xml,
        }
    }

    /// Main part XML with the document's run changes applied.
    pub fn render_xml(&self, doc: &Document) -> String {
        splice_runs(&self.xml, doc)
    }

    /// Serialize the package with the document's run changes applied.
    pub fn write(&mut self, doc: &Document) -> Result<Vec<u8>> {
        let mut replaced = HashMap::new();
        if doc.is_modified() {
            replaced.insert(self.main_part.clone(), self.render_xml(doc).into_bytes());
        } else {
            log::debug!("Document unchanged, copying {} as is", self.main_part);
        }
        self.package.write(&replaced)
    }
}

/// Apply changed run texts to the XML they were parsed from.
///
/// The new text of a run goes into its first `w:t` element (marked
/// `xml:space="preserve"`); its other `w:t` elements are emptied.
pub fn splice_runs(xml: &str, doc: &Document) -> String {
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    for run in doc.paragraphs().flat_map(|p| p.runs.iter()) {
        if !run.is_modified() {
            continue;
        }
        let Some(origin) = run.origin.as_ref() else {
            continue;
        };
        let Some((first, rest)) = origin.slots.split_first() else {
            log::warn!("Run has no text element, change to {:?} dropped", run.text);
            continue;
        };

        edits.push((
            first.element.clone(),
            format!(
                r#"<{q} xml:space="preserve">{}</{q}>"#,
                partial_escape(&run.text),
                q = first.qname
            ),
        ));
        for slot in rest {
            edits.push((slot.element.clone(), format!("<{}/>", slot.qname)));
        }
    }

    edits.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(xml.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        if range.start < cursor || range.end > xml.len() {
            log::warn!("Skipping overlapping edit at byte {}", range.start);
            continue;
        }
        out.push_str(&xml[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&xml[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_body;

    fn wrap(body: &str) -> String {
        format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    #[test]
    fn test_unchanged_document_is_identical() {
        let xml = wrap(r#"<w:p><w:r><w:rPr><w:i/></w:rPr><w:t>keep</w:t></w:r></w:p>"#);
        let doc = parse_body(&xml).unwrap();
        assert_eq!(splice_runs(&xml, &doc), xml);
    }

    #[test]
    fn test_changed_runs_are_spliced() {
        let xml = wrap(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Hello {{na</w:t></w:r><w:r><w:t>me}} !</w:t></w:r></w:p>"#,
        );
        let mut doc = parse_body(&xml).unwrap();
        doc.paragraphs[0].runs[0].text = "Hello World".to_string();
        doc.paragraphs[0].runs[1].text = " !".to_string();

        let out = splice_runs(&xml, &doc);
        assert_eq!(
            out,
            wrap(
                r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Hello World</w:t></w:r><w:r><w:t xml:space="preserve"> !</w:t></w:r></w:p>"#
            )
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = wrap(r#"<w:p><w:r><w:t>x</w:t></w:r></w:p>"#);
        let mut doc = parse_body(&xml).unwrap();
        doc.paragraphs[0].runs[0].text = "a < b & c".to_string();

        let out = splice_runs(&xml, &doc);
        assert!(out.contains(r#"<w:t xml:space="preserve">a &lt; b &amp; c</w:t>"#));

        let reparsed = parse_body(&out).unwrap();
        assert_eq!(reparsed.paragraphs[0].text(), "a < b & c");
    }

    #[test]
    fn test_extra_text_elements_are_emptied() {
        let xml = wrap(r#"<w:p><w:r><w:t>{{a</w:t><w:br/><w:t>b}}</w:t></w:r></w:p>"#);
        let mut doc = parse_body(&xml).unwrap();
        doc.paragraphs[0].runs[0].text = "v".to_string();

        let out = splice_runs(&xml, &doc);
        assert!(out.contains(r#"<w:t xml:space="preserve">v</w:t><w:br/><w:t/>"#));
    }

    #[test]
    fn test_cell_runs_are_spliced() {
        let xml = wrap(r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>{{x}}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#);
        let mut doc = parse_body(&xml).unwrap();
        for p in doc.paragraphs_mut() {
            p.runs[0].text = "1".to_string();
        }

        let out = splice_runs(&xml, &doc);
        assert!(out.contains(r#"<w:tc><w:p><w:r><w:t xml:space="preserve">1</w:t></w:r></w:p></w:tc>"#));
    }
}
