//! PDF Trailer Parser
//!
//! The trailer dictionary is kept as raw text. Only `/Size` and `/Root` are
//! ever rewritten; `/Info`, `/ID` and anything else pass through untouched.

use super::{ParseError, ParseResult};
use crate::objects::{ObjectId, RawDictionary};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ROOT: Regex = Regex::new(r"/Root\s+(\d+)\s+(\d+)\s+R").unwrap();
    static ref SIZE: Regex = Regex::new(r"/Size\s+(\d+)").unwrap();
}

/// PDF Trailer information
#[derive(Debug, Clone)]
pub struct PdfTrailer {
    /// One past the highest object number
    size: u32,
    /// Document catalog
    root: ObjectId,
    /// The dictionary text as the producer wrote it
    raw: RawDictionary,
}

impl PdfTrailer {
    /// Parse trailer dictionary text (the part between `trailer` and
    /// `startxref`).
    pub fn parse(text: &str) -> ParseResult<Self> {
        let raw = RawDictionary::new(text.trim());
        let root = raw.reference(&ROOT).ok_or(ParseError::InvalidTrailer)?;
        let size = raw
            .captures(&SIZE)
            .and_then(|groups| groups.first().and_then(|s| s.parse::<u32>().ok()))
            .ok_or(ParseError::InvalidTrailer)?;

        Ok(Self { size, root, raw })
    }

    /// Get the size (number of entries in xref table)
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Get the root object reference (document catalog)
    pub fn root(&self) -> ObjectId {
        self.root
    }

    pub fn raw(&self) -> &RawDictionary {
        &self.raw
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    pub fn set_root(&mut self, root: ObjectId) {
        self.root = root;
    }

    /// `trailer` keyword plus the dictionary with `/Size` and `/Root`
    /// substituted.
    pub fn serialize(&self) -> String {
        let dict = self
            .raw
            .replace(&SIZE, &format!("/Size {}", self.size))
            .replace(&ROOT, &format!("/Root {}", self.root));
        format!("trailer\n{dict}\n")
    }
}
