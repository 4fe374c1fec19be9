//! PDF Cross-Reference Table Parser
//!
//! Reads the single classic xref section the rendering engine writes at the
//! end of the file, and serializes a complete replacement section.

use super::trailer::PdfTrailer;
use super::{ParseError, ParseResult};
use crate::objects::ObjectId;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{Read, Seek, SeekFrom};

/// Size of the tail window searched for `startxref`.
pub const TAIL_WINDOW: u64 = 1024;

/// Length of one serialized entry, end-of-line included.
pub const ENTRY_LEN: usize = 20;

/// Largest offset that fits the 10-digit entry field.
pub const MAX_OFFSET: u64 = 9_999_999_999;

lazy_static! {
    static ref STARTXREF: Regex = Regex::new(r"startxref\s+(\d+)").unwrap();
    static ref SECTION: Regex =
        Regex::new(r"(?s)\A\s*xref\s+(\d+)\s+(\d+)\s+(.*?)\s*trailer\s*(.*?)\s*startxref\b")
            .unwrap();
    static ref ENTRY: Regex = Regex::new(r"\A(\d{10}) (\d{5}) ([fn])\s*\z").unwrap();
}

/// Cross-reference entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRefEntry {
    /// Byte offset in the file (for in-use entries)
    pub offset: u64,
    /// Generation number
    pub generation: u16,
    /// Whether this entry is in use
    pub in_use: bool,
}

impl XRefEntry {
    /// An in-use entry for a freshly written object.
    pub fn in_use(offset: u64) -> Self {
        Self {
            offset,
            generation: 0,
            in_use: true,
        }
    }

    /// A free entry whose object number is never reused.
    pub fn free() -> Self {
        Self {
            offset: 0,
            generation: 65535,
            in_use: false,
        }
    }

    /// Parse one `nnnnnnnnnn ggggg n` record.
    pub fn parse(line: &str) -> ParseResult<Self> {
        let caps = ENTRY.captures(line).ok_or(ParseError::InvalidXRef)?;
        let offset = caps[1].parse::<u64>().map_err(|_| ParseError::InvalidXRef)?;
        let generation = caps[2].parse::<u16>().map_err(|_| ParseError::InvalidXRef)?;

        Ok(Self {
            offset,
            generation,
            in_use: &caps[3] == "n",
        })
    }

    /// The fixed-width 20 byte record.
    pub fn to_line(&self) -> String {
        let flag = if self.in_use { 'n' } else { 'f' };
        format!("{:010} {:05} {} \n", self.offset, self.generation, flag)
    }
}

/// Cross-reference table
#[derive(Debug, Clone)]
pub struct XRefTable {
    /// Entries indexed by object number
    entries: Vec<XRefEntry>,
    /// Byte offset of the `xref` keyword
    own_offset: u64,
    /// Object number declared by the subsection header
    first_object: u32,
    /// Entry count declared by the subsection header
    declared_count: u32,
    trailer: PdfTrailer,
}

impl XRefTable {
    /// Locate and parse the last xref section of a document.
    pub fn read<R: Read + Seek>(reader: &mut R) -> ParseResult<Self> {
        let xref_offset = find_xref_offset(reader)?;
        reader.seek(SeekFrom::Start(xref_offset))?;

        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;

        Self::parse_section(&String::from_utf8_lossy(&buffer), xref_offset)
    }

    /// Parse the text of a section that begins with `xref` and runs at least
    /// up to its `startxref` keyword.
    pub fn parse_section(text: &str, own_offset: u64) -> ParseResult<Self> {
        let caps = SECTION.captures(text).ok_or(ParseError::InvalidXRef)?;

        let first_object = caps[1].parse::<u32>().map_err(|_| ParseError::InvalidXRef)?;
        let declared_count = caps[2].parse::<u32>().map_err(|_| ParseError::InvalidXRef)?;
        if first_object != 0 {
            return Err(ParseError::UnsupportedSubsection(first_object));
        }

        let entries = caps[3]
            .split(['\n', '\r'])
            .filter(|line| !line.trim().is_empty())
            .map(XRefEntry::parse)
            .collect::<ParseResult<Vec<_>>>()?;

        if entries.is_empty() {
            return Err(ParseError::InvalidXRef);
        }
        if entries.len() != declared_count as usize {
            tracing::warn!(
                declared = declared_count,
                found = entries.len(),
                "xref entry count does not match its subsection header"
            );
        }

        let trailer = PdfTrailer::parse(&caps[4])?;
        tracing::debug!(
            offset = own_offset,
            entries = entries.len(),
            root = %trailer.root(),
            "parsed xref section"
        );

        Ok(Self {
            entries,
            own_offset,
            first_object,
            declared_count,
            trailer,
        })
    }

    pub fn entries(&self) -> &[XRefEntry] {
        &self.entries
    }

    /// Get entry by object number
    pub fn get_entry(&self, obj_num: u32) -> Option<&XRefEntry> {
        self.entries.get(obj_num as usize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn own_offset(&self) -> u64 {
        self.own_offset
    }

    pub fn first_object(&self) -> u32 {
        self.first_object
    }

    pub fn declared_count(&self) -> u32 {
        self.declared_count
    }

    pub fn trailer(&self) -> &PdfTrailer {
        &self.trailer
    }

    pub fn trailer_mut(&mut self) -> &mut PdfTrailer {
        &mut self.trailer
    }

    /// Byte offset of an in-use object.
    pub fn offset_of(&self, id: ObjectId) -> ParseResult<u64> {
        match self.get_entry(id.number()) {
            Some(entry) if entry.in_use => Ok(entry.offset),
            _ => Err(ParseError::InvalidReference(id.number(), id.generation())),
        }
    }

    /// Next object number that has never been used.
    pub fn next_object_number(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Flag an object number as free. The slot itself stays in the table.
    pub fn free(&mut self, obj_num: u32) {
        if let Some(entry) = self.entries.get_mut(obj_num as usize) {
            *entry = XRefEntry::free();
        }
    }

    /// Append an entry and return the object number it was given.
    pub fn push(&mut self, entry: XRefEntry) -> u32 {
        self.entries.push(entry);
        self.entries.len() as u32 - 1
    }

    /// The complete section: header, one record per entry, then the trailer.
    pub fn serialize(&self) -> ParseResult<String> {
        if let Some(entry) = self.entries.iter().find(|e| e.offset > MAX_OFFSET) {
            tracing::error!(offset = entry.offset, "xref offset exceeds 10 digits");
            return Err(ParseError::InvalidXRef);
        }

        let mut out = String::with_capacity(32 + self.entries.len() * ENTRY_LEN);
        out.push_str(&format!("xref\n0 {}\n", self.entries.len()));
        for entry in &self.entries {
            out.push_str(&entry.to_line());
        }
        out.push_str(&self.trailer.serialize());
        Ok(out)
    }
}

/// Find the xref offset by looking for the last `startxref` near the end of
/// the file.
pub fn find_xref_offset<R: Read + Seek>(reader: &mut R) -> ParseResult<u64> {
    let file_size = reader.seek(SeekFrom::End(0))?;

    let read_size = std::cmp::min(TAIL_WINDOW, file_size);
    reader.seek(SeekFrom::End(-(read_size as i64)))?;

    let mut buffer = vec![0u8; read_size as usize];
    reader.read_exact(&mut buffer)?;

    let content = String::from_utf8_lossy(&buffer);
    let caps = STARTXREF
        .captures_iter(&content)
        .last()
        .ok_or(ParseError::MissingStartXRef(read_size))?;

    let offset = caps[1].parse::<u64>().map_err(|_| ParseError::InvalidXRef)?;
    if offset >= file_size {
        return Err(ParseError::InvalidXRef);
    }
    Ok(offset)
}
