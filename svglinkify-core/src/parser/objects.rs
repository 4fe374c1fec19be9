//! Indirect object reader
//!
//! Reads `<id> <gen> obj ... endobj` from a bounded window at a known offset.
//! The objects we read (catalog, page tree node, page) are small dictionaries,
//! so anything that does not close inside the window is treated as malformed.

use super::{ParseError, ParseResult};
use crate::objects::{ObjectId, RawDictionary};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{Read, Seek, SeekFrom};

/// Bytes read ahead from an object's offset.
pub const LOOKAHEAD_WINDOW: u64 = 4096;

lazy_static! {
    static ref INDIRECT: Regex =
        Regex::new(r"(?s)\A\s*(\d+)\s+(\d+)\s+obj\b\s*(.*?)\s*endobj\b").unwrap();
}

/// An indirect object with an unparsed body
#[derive(Debug, Clone)]
pub struct IndirectObject {
    pub id: ObjectId,
    pub offset: u64,
    pub body: RawDictionary,
}

impl IndirectObject {
    pub fn parse(text: &str, offset: u64) -> ParseResult<Self> {
        let caps = INDIRECT
            .captures(text)
            .ok_or(ParseError::ObjectNotReadable { offset })?;
        let id = ObjectId::from_digits(&caps[1], &caps[2])
            .ok_or(ParseError::ObjectNotReadable { offset })?;

        Ok(Self {
            id,
            offset,
            body: RawDictionary::new(&caps[3]),
        })
    }
}

/// Read the object that starts at `offset`.
pub fn read_indirect_object<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
) -> ParseResult<IndirectObject> {
    reader.seek(SeekFrom::Start(offset))?;

    let mut buffer = Vec::with_capacity(LOOKAHEAD_WINDOW as usize);
    reader.take(LOOKAHEAD_WINDOW).read_to_end(&mut buffer)?;

    IndirectObject::parse(&String::from_utf8_lossy(&buffer), offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_object() {
        let text = "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n";
        let obj = IndirectObject::parse(text, 9).unwrap();
        assert_eq!(obj.id, ObjectId::new(1, 0));
        assert_eq!(obj.offset, 9);
        assert_eq!(obj.body.as_str(), "<< /Type /Catalog /Pages 2 0 R >>");
    }

    #[test]
    fn test_parse_object_keeps_inner_layout() {
        let text = "3 0 obj\n<< /Type /Page\n   /Parent 2 0 R\n>>\nendobj";
        let obj = IndirectObject::parse(text, 0).unwrap();
        assert_eq!(obj.body.as_str(), "<< /Type /Page\n   /Parent 2 0 R\n>>");
    }

    #[test]
    fn test_parse_object_without_endobj() {
        let result = IndirectObject::parse("1 0 obj\n<< /Type /Catalog", 42);
        assert!(matches!(
            result,
            Err(ParseError::ObjectNotReadable { offset: 42 })
        ));
    }

    #[test]
    fn test_read_at_offset() {
        let data = b"%PDF-1.5\n1 0 obj\n<< /A 1 >>\nendobj\n2 0 obj\n<< /B 2 >>\nendobj\n";
        let mut cursor = Cursor::new(data.to_vec());
        let obj = read_indirect_object(&mut cursor, 35).unwrap();
        assert_eq!(obj.id, ObjectId::new(2, 0));
        assert_eq!(obj.body.as_str(), "<< /B 2 >>");
    }

    #[test]
    fn test_read_outside_window_fails() {
        let mut data = b"1 0 obj\n<< /Pad (".to_vec();
        data.extend(std::iter::repeat(b'x').take(LOOKAHEAD_WINDOW as usize));
        data.extend_from_slice(b") >>\nendobj\n");
        let mut cursor = Cursor::new(data);
        assert!(read_indirect_object(&mut cursor, 0).is_err());
    }
}
