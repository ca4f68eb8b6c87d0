//! Main document part parsing.
//!
//! Builds the [`Document`] model from `word/document.xml` while recording,
//! for every run, the byte range of each of its `w:t` elements. The writer
//! uses those ranges to splice changed text back without touching any other
//! markup.

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, Run, RunStyle, Table, TableCell, TableRow, TextSlot};

const BOM: char = '\u{feff}';

/// Role of an open element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Root,
    Body,
    Table,
    Row,
    Cell,
    Paragraph,
    Run,
    RunProps,
    Text,
    Other,
}

impl Frame {
    /// Role of an element named `local` whose parent has role `parent`.
    ///
    /// Only tables that are direct children of the body are tracked, and only
    /// paragraphs that are direct children of the body or of such a table's
    /// cells. Runs must be direct children of a tracked paragraph.
    fn classify(parent: Option<Frame>, local: &[u8]) -> Frame {
        match (parent, local) {
            (None, _) => Frame::Root,
            (Some(Frame::Root), b"body") => Frame::Body,
            (Some(Frame::Body), b"tbl") => Frame::Table,
            (Some(Frame::Table), b"tr") => Frame::Row,
            (Some(Frame::Row), b"tc") => Frame::Cell,
            (Some(Frame::Body | Frame::Cell), b"p") => Frame::Paragraph,
            (Some(Frame::Paragraph), b"r") => Frame::Run,
            (Some(Frame::Run), b"rPr") => Frame::RunProps,
            (Some(Frame::Run), b"t") => Frame::Text,
            _ => Frame::Other,
        }
    }
}

#[derive(Default)]
struct RunBuilder {
    text: String,
    style: RunStyle,
    slots: Vec<TextSlot>,
}

struct OpenText {
    tag_start: usize,
    content_start: usize,
    qname: String,
}

/// Parse the main document part.
pub fn parse_body(xml: &str) -> Result<Document> {
    BodyBuilder::new(xml).build()
}

struct BodyBuilder<'x> {
    xml: &'x str,
    stack: Vec<Frame>,
    document: Document,
    seen_body: bool,
    table: Option<Table>,
    row: Option<TableRow>,
    cell: Option<TableCell>,
    paragraph: Option<Paragraph>,
    run: Option<RunBuilder>,
    text: Option<OpenText>,
    props_start: Option<usize>,
}

impl<'x> BodyBuilder<'x> {
    fn new(xml: &'x str) -> Self {
        Self {
            xml,
            stack: Vec::new(),
            document: Document::new(),
            seen_body: false,
            table: None,
            row: None,
            cell: None,
            paragraph: None,
            run: None,
            text: None,
            props_start: None,
        }
    }

    fn build(mut self) -> Result<Document> {
        // Positions must index the full string, byte-order mark included.
        let xml = self.xml;
        let skip = if xml.starts_with(BOM) { BOM.len_utf8() } else { 0 };
        let mut reader = Reader::from_str(&xml[skip..]);

        loop {
            let event = reader.read_event()?;
            let pos = skip + reader.buffer_position() as usize;

            match event {
                Event::Start(e) => {
                    let frame = Frame::classify(self.stack.last().copied(), e.local_name().as_ref());
                    self.open(frame, &e, pos);
                    self.stack.push(frame);
                }
                Event::Empty(e) => {
                    let frame = Frame::classify(self.stack.last().copied(), e.local_name().as_ref());
                    self.open(frame, &e, pos);
                    self.close(frame, pos, true)?;
                }
                Event::End(_) => {
                    let frame = self
                        .stack
                        .pop()
                        .ok_or_else(|| Error::Xml(format!("unexpected end tag at byte {}", pos)))?;
                    self.close(frame, pos, false)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !self.stack.is_empty() {
            return Err(Error::Xml("document ended inside an open element".to_string()));
        }
        if !self.seen_body {
            return Err(Error::Xml("no document body found".to_string()));
        }

        log::debug!(
            "Parsed {} paragraphs and {} tables",
            self.document.paragraphs.len(),
            self.document.tables.len()
        );
        Ok(self.document)
    }

    /// Byte offset of the `<` opening the tag that ends at `end`.
    fn tag_start(&self, end: usize) -> usize {
        self.xml[..end].rfind('<').unwrap_or(end)
    }

    fn open(&mut self, frame: Frame, e: &BytesStart<'_>, pos: usize) {
        match frame {
            Frame::Body => self.seen_body = true,
            Frame::Table => self.table = Some(Table::new()),
            Frame::Row => self.row = Some(TableRow::default()),
            Frame::Cell => self.cell = Some(TableCell::default()),
            Frame::Paragraph => self.paragraph = Some(Paragraph::new()),
            Frame::Run => self.run = Some(RunBuilder::default()),
            Frame::RunProps => self.props_start = Some(self.tag_start(pos)),
            Frame::Text => {
                self.text = Some(OpenText {
                    tag_start: self.tag_start(pos),
                    content_start: pos,
                    qname: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                })
            }
            Frame::Root | Frame::Other => {}
        }
    }

    fn close(&mut self, frame: Frame, pos: usize, empty: bool) -> Result<()> {
        let parent = self.stack.last().copied();

        match frame {
            Frame::Text => {
                let (Some(open), Some(run)) = (self.text.take(), self.run.as_mut()) else {
                    return Ok(());
                };
                if !empty {
                    let content_end = self.xml[..pos].rfind("</").unwrap_or(pos);
                    let raw = &self.xml[open.content_start..content_end];
                    run.text.push_str(&unescape(raw)?);
                }
                run.slots.push(TextSlot {
                    element: open.tag_start..pos,
                    qname: open.qname,
                });
            }
            Frame::RunProps => {
                if let (Some(start), Some(run)) = (self.props_start.take(), self.run.as_mut()) {
                    run.style = RunStyle::from_markup(&self.xml[start..pos]);
                }
            }
            Frame::Run => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    if run.slots.is_empty() && !run.text.is_empty() {
                        log::warn!("Run text without a text element was dropped");
                    }
                    paragraph.add_run(Run::parsed(run.text, run.style, run.slots));
                }
            }
            Frame::Paragraph => {
                if let Some(paragraph) = self.paragraph.take() {
                    match (parent, self.cell.as_mut()) {
                        (Some(Frame::Cell), Some(cell)) => cell.paragraphs.push(paragraph),
                        _ => self.document.add_paragraph(paragraph),
                    }
                }
            }
            Frame::Cell => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.cells.push(cell);
                }
            }
            Frame::Row => {
                if let (Some(row), Some(table)) = (self.row.take(), self.table.as_mut()) {
                    table.add_row(row);
                }
            }
            Frame::Table => {
                if let Some(table) = self.table.take() {
                    self.document.add_table(table);
                }
            }
            Frame::Root | Frame::Body | Frame::Other => {}
        }

        Ok(())
    }
}
