//! Bookmark documents on disk:
//!
//! ```text
//! <bookmarks>
//!   <bookmark>
//!     <name>Left ear</name>
//!     <comments>Outer helix only</comments>
//!     <faces>12,13,40</faces>
//!   </bookmark>
//! </bookmarks>
//! ```

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::Bookmark;
use crate::error::BookmarkError;

const ROOT: &str = "bookmarks";
const ENTRY: &str = "bookmark";
const NAME: &str = "name";
const COMMENTS: &str = "comments";
const FACES: &str = "faces";

/// One `<bookmark>` element with its three text fields, undecoded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RawEntry {
    pub name: String,
    pub comments: String,
    pub faces: String,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Comments,
    Faces,
}

impl RawEntry {
    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Comments => &mut self.comments,
            Field::Faces => &mut self.faces,
        }
    }
}

/// Serializes bookmarks into an indented XML document.
pub(crate) fn write_document<'a>(
    bookmarks: impl IntoIterator<Item = &'a Bookmark>,
) -> Result<Vec<u8>, BookmarkError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emit(&mut writer, Event::Start(BytesStart::new(ROOT)))?;
    for bookmark in bookmarks {
        emit(&mut writer, Event::Start(BytesStart::new(ENTRY)))?;
        text_element(&mut writer, NAME, bookmark.name())?;
        text_element(&mut writer, COMMENTS, bookmark.comment())?;
        text_element(&mut writer, FACES, &bookmark.selection().to_string())?;
        emit(&mut writer, Event::End(BytesEnd::new(ENTRY)))?;
    }
    emit(&mut writer, Event::End(BytesEnd::new(ROOT)))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<(), BookmarkError> {
    emit(writer, Event::Start(BytesStart::new(tag)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(tag)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), BookmarkError> {
    writer
        .write_event(event)
        .map_err(|e| BookmarkError::Xml(e.to_string()))
}

/// Extracts every `<bookmark>` element under the document root.
///
/// Field text is kept verbatim (unescaped, not trimmed). Missing fields read
/// as empty strings.
pub(crate) fn read_document(text: &str) -> Result<Vec<RawEntry>, BookmarkError> {
    let mut reader = Reader::from_str(text);
    let mut entries = Vec::new();
    let mut current: Option<RawEntry> = None;
    let mut field: Option<Field> = None;
    let mut saw_root = false;
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            BookmarkError::Xml(format!("at byte {}: {e}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(e) => {
                depth += 1;
                if !saw_root {
                    saw_root = true;
                    continue;
                }
                match (e.local_name().as_ref(), current.is_some()) {
                    (b"bookmark", false) => current = Some(RawEntry::default()),
                    (b"name", true) => field = Some(Field::Name),
                    (b"comments", true) => field = Some(Field::Comments),
                    (b"faces", true) => field = Some(Field::Faces),
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if !saw_root {
                    saw_root = true;
                    continue;
                }
                if current.is_none() && e.local_name().as_ref() == b"bookmark" {
                    entries.push(RawEntry::default());
                }
            }
            Event::Text(e) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    let text = e
                        .unescape()
                        .map_err(|err| BookmarkError::Xml(err.to_string()))?;
                    entry.field_mut(field).push_str(&text);
                }
            }
            Event::CData(e) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    let text = std::str::from_utf8(&e)
                        .map_err(|err| BookmarkError::Xml(err.to_string()))?;
                    entry.field_mut(field).push_str(text);
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                match e.local_name().as_ref() {
                    b"bookmark" => {
                        if let Some(entry) = current.take() {
                            entries.push(entry);
                        }
                        field = None;
                    }
                    b"name" | b"comments" | b"faces" => field = None,
                    _ => {}
                }
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(BookmarkError::Xml(format!(
                        "unexpected end of document, {depth} element(s) left open"
                    )));
                }
                break;
            }
            _ => {}
        }
    }

    if !saw_root {
        return Err(BookmarkError::MissingRoot);
    }
    Ok(entries)
}
