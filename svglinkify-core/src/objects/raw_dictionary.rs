//! Pattern-based access to dictionary text
//!
//! This is not a PDF object model. A `RawDictionary` holds the exact bytes a
//! producer wrote between `obj` and `endobj` (or after `trailer`) and lets the
//! caller read or substitute individual fields with regular expressions.
//! Everything the patterns do not touch is written back untouched, including
//! keys we know nothing about.

use super::ObjectId;
use lazy_static::lazy_static;
use regex::{Captures, NoExpand, Regex};
use std::fmt;

lazy_static! {
    static ref DICT_CLOSE: Regex = Regex::new(r">>\s*$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDictionary {
    text: String,
}

impl RawDictionary {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_match(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.text)
    }

    /// Capture groups of the first match of `pattern`.
    pub fn captures<'a>(&'a self, pattern: &Regex) -> Option<Vec<&'a str>> {
        let caps = pattern.captures(&self.text)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map_or("", |m| m.as_str()))
                .collect(),
        )
    }

    /// Reads a reference from a pattern whose first two groups are the
    /// object number and generation.
    pub fn reference(&self, pattern: &Regex) -> Option<ObjectId> {
        let groups = self.captures(pattern)?;
        match groups.as_slice() {
            [number, generation, ..] => ObjectId::from_digits(number, generation),
            _ => None,
        }
    }

    /// Replaces every match of `pattern` with `replacement`, taken literally.
    pub fn replace(&self, pattern: &Regex, replacement: &str) -> Self {
        Self::new(pattern.replace_all(&self.text, NoExpand(replacement)))
    }

    /// Points every reference to `from` matched by `pattern` at `to`.
    ///
    /// `pattern` captures the text before the reference, then the object
    /// number and generation. Other references are left as written.
    pub fn retarget(&self, pattern: &Regex, from: ObjectId, to: ObjectId) -> Self {
        let text = pattern.replace_all(&self.text, |caps: &Captures<'_>| {
            match ObjectId::from_digits(&caps[2], &caps[3]) {
                Some(id) if id == from => format!("{}{}", &caps[1], to),
                _ => caps[0].to_string(),
            }
        });
        Self::new(text)
    }

    /// Inserts `entry` in front of the closing `>>` of the dictionary.
    ///
    /// Returns `None` when the text does not end with `>>`.
    pub fn insert_before_close(&self, entry: &str) -> Option<Self> {
        let close = DICT_CLOSE.find(&self.text)?;
        let mut text = String::with_capacity(self.text.len() + entry.len() + 4);
        text.push_str(&self.text[..close.start()]);
        text.push_str(entry);
        text.push_str("\n>>");
        Some(Self::new(text))
    }
}

impl fmt::Display for RawDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages_pattern() -> Regex {
        Regex::new(r"/Pages\s+(\d+)\s+(\d+)\s+R").unwrap()
    }

    #[test]
    fn test_reference_lookup() {
        let dict = RawDictionary::new("<< /Type /Catalog /Pages 2 0 R >>");
        assert_eq!(dict.reference(&pages_pattern()), Some(ObjectId::new(2, 0)));
    }

    #[test]
    fn test_reference_missing() {
        let dict = RawDictionary::new("<< /Type /Pages /Kids [ 3 0 R ] >>");
        assert_eq!(dict.reference(&pages_pattern()), None);
    }

    #[test]
    fn test_replace_preserves_other_bytes() {
        let raw = "<< /Type /Catalog\n   /Pages  2 0 R /Custom (x$1) >>";
        let dict = RawDictionary::new(raw);
        let replaced = dict.replace(&pages_pattern(), "/Pages 9 0 R");
        assert_eq!(
            replaced.as_str(),
            "<< /Type /Catalog\n   /Pages 9 0 R /Custom (x$1) >>"
        );
    }

    #[test]
    fn test_replacement_is_literal() {
        let dict = RawDictionary::new("<< /Pages 2 0 R >>");
        let replaced = dict.replace(&pages_pattern(), "/Pages $1");
        assert_eq!(replaced.as_str(), "<< /Pages $1 >>");
    }

    #[test]
    fn test_retarget_only_matching_references() {
        let pattern = Regex::new(r"(/D\s*\[\s*)(\d+)\s+(\d+)\s+R").unwrap();
        let dict = RawDictionary::new("<< /D [ 6 0 R /Fit ] /D [6 1 R] /D [ 16 0 R ] >>");
        let moved = dict.retarget(&pattern, ObjectId::new(6, 0), ObjectId::new(9, 0));
        assert_eq!(
            moved.as_str(),
            "<< /D [ 9 0 R /Fit ] /D [6 1 R] /D [ 16 0 R ] >>"
        );
    }

    #[test]
    fn test_insert_before_close() {
        let dict = RawDictionary::new("<< /Type /Page\n   /Parent 1 0 R\n>>");
        let patched = dict.insert_before_close("/Annots [ ]").unwrap();
        assert_eq!(
            patched.as_str(),
            "<< /Type /Page\n   /Parent 1 0 R\n/Annots [ ]\n>>"
        );
    }

    #[test]
    fn test_insert_before_close_requires_dictionary() {
        let dict = RawDictionary::new("[ 1 2 3 ]");
        assert!(dict.insert_before_close("/Annots [ ]").is_none());
    }

    #[test]
    fn test_insert_uses_last_close() {
        let dict = RawDictionary::new("<< /Resources << /Font 4 0 R >> >>");
        let patched = dict.insert_before_close("/X 1").unwrap();
        assert_eq!(
            patched.as_str(),
            "<< /Resources << /Font 4 0 R >> /X 1\n>>"
        );
    }
}
