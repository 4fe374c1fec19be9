//! Catalog → page tree → first page
//!
//! Walks the reference chain from the trailer's `/Root` down to the first
//! page and keeps each dictionary's text so it can be written back as a new
//! object with only its outgoing reference (or `/Annots`) changed.

use super::objects::{read_indirect_object, IndirectObject};
use super::xref::XRefTable;
use super::{ParseError, ParseResult};
use crate::objects::{ObjectId, RawDictionary};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{Read, Seek};

lazy_static! {
    static ref PAGES_REF: Regex = Regex::new(r"/Pages\s+(\d+)\s+(\d+)\s+R").unwrap();
    static ref FIRST_KID: Regex = Regex::new(r"/Kids\s*\[\s*(\d+)\s+(\d+)\s+R").unwrap();
    static ref MEDIA_BOX: Regex =
        Regex::new(r"/MediaBox\s*\[\s*(\S+)\s+(\S+)\s+(\S+)\s+([^\s\]]+)").unwrap();
    // References and annotation dictionaries with at most one nested level.
    // String literals are skipped whole so brackets inside URIs do not end a match.
    static ref ANNOTS_INLINE: Regex = {
        let string = r"\((?:[^()\\]|\\.|\([^()\\]*\))*\)";
        let inner = format!(r"<<(?:[^<>()]|{string})*>>");
        let dict = format!(r"<<(?:[^<>()]|{string}|{inner})*>>");
        Regex::new(&format!(
            r"/Annots\s*\[((?:\s*(?:\d+\s+\d+\s+R|{dict}))*)\s*\]"
        ))
        .unwrap()
    };
    static ref ANNOTS_KEY: Regex = Regex::new(r"/Annots\b").unwrap();
    static ref GOTO_PAGE: Regex = Regex::new(r"(/D\s*\[\s*)(\d+)\s+(\d+)\s+R").unwrap();
}

fn serialize_object(id: ObjectId, body: &RawDictionary) -> String {
    format!("{}\n{}\nendobj\n", id.header(), body)
}

/// Document catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    pub own_ref: ObjectId,
    pub pages_ref: ObjectId,
    raw: RawDictionary,
}

impl Catalog {
    pub fn from_object(object: IndirectObject) -> ParseResult<Self> {
        let pages_ref = object
            .body
            .reference(&PAGES_REF)
            .ok_or_else(|| ParseError::MissingKey("Pages".to_string()))?;

        Ok(Self {
            own_ref: object.id,
            pages_ref,
            raw: object.body,
        })
    }

    pub fn raw(&self) -> &RawDictionary {
        &self.raw
    }

    /// The object definition with `/Pages` pointing at `pages_ref`.
    pub fn serialize(&self) -> String {
        let body = self
            .raw
            .replace(&PAGES_REF, &format!("/Pages {}", self.pages_ref));
        serialize_object(self.own_ref, &body)
    }
}

/// Page tree node holding the first page
#[derive(Debug, Clone)]
pub struct PageTreeNode {
    pub own_ref: ObjectId,
    pub first_page_ref: ObjectId,
    raw: RawDictionary,
}

impl PageTreeNode {
    pub fn from_object(object: IndirectObject) -> ParseResult<Self> {
        let first_page_ref = object
            .body
            .reference(&FIRST_KID)
            .ok_or_else(|| ParseError::MissingKey("Kids".to_string()))?;

        Ok(Self {
            own_ref: object.id,
            first_page_ref,
            raw: object.body,
        })
    }

    pub fn raw(&self) -> &RawDictionary {
        &self.raw
    }

    /// The object definition with the first `/Kids` entry pointing at
    /// `first_page_ref`.
    pub fn serialize(&self) -> String {
        let body = self
            .raw
            .replace(&FIRST_KID, &format!("/Kids [ {}", self.first_page_ref));
        serialize_object(self.own_ref, &body)
    }
}

/// The first page of the document
#[derive(Debug, Clone)]
pub struct PdfPage {
    pub own_ref: ObjectId,
    /// Upper y coordinate of the media box, used to flip y coordinates
    pub media_box_top: f64,
    /// Number the page was read under
    loaded_ref: ObjectId,
    raw: RawDictionary,
}

impl PdfPage {
    pub fn from_object(object: IndirectObject) -> ParseResult<Self> {
        let groups = object
            .body
            .captures(&MEDIA_BOX)
            .ok_or_else(|| ParseError::MissingKey("MediaBox".to_string()))?;
        let top = groups.get(3).copied().unwrap_or_default();
        let media_box_top = top
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidMediaBox(top.to_string()))?;

        Ok(Self {
            own_ref: object.id,
            media_box_top,
            loaded_ref: object.id,
            raw: object.body,
        })
    }

    pub fn raw(&self) -> &RawDictionary {
        &self.raw
    }

    /// The page dictionary with `annotations` (a sequence of annotation
    /// dictionaries) placed in its `/Annots` array.
    ///
    /// An existing inline array (references, or dictionaries from an earlier
    /// update) is extended; otherwise a new `/Annots` key is inserted before
    /// the closing `>>`. Destinations in the existing array that point at the
    /// page as it was read are moved to `own_ref`.
    pub fn with_annotations(&self, annotations: &str) -> ParseResult<RawDictionary> {
        if let Some(groups) = self.raw.captures(&ANNOTS_INLINE) {
            let existing = RawDictionary::new(groups.first().copied().unwrap_or_default())
                .retarget(&GOTO_PAGE, self.loaded_ref, self.own_ref);
            let merged = format!("/Annots [{existing} {annotations} ]");
            return Ok(self.raw.replace(&ANNOTS_INLINE, &merged));
        }
        if self.raw.is_match(&ANNOTS_KEY) {
            return Err(ParseError::UnsupportedAnnots);
        }

        self.raw
            .insert_before_close(&format!("/Annots [ {annotations} ]"))
            .ok_or(ParseError::NotADictionary(self.own_ref))
    }

    /// The object definition carrying `annotations`.
    pub fn serialize(&self, annotations: &str) -> ParseResult<String> {
        let body = self.with_annotations(annotations)?;
        Ok(serialize_object(self.own_ref, &body))
    }
}

/// Everything the patcher reads from the original document
#[derive(Debug, Clone)]
pub struct DocumentChain {
    pub xref: XRefTable,
    pub catalog: Catalog,
    pub pages: PageTreeNode,
    pub page: PdfPage,
}

impl DocumentChain {
    /// Read the last xref section and resolve root → pages → first page.
    pub fn read<R: Read + Seek>(reader: &mut R) -> ParseResult<Self> {
        let xref = XRefTable::read(reader)?;

        let catalog = Catalog::from_object(load(reader, &xref, xref.trailer().root())?)?;
        let pages = PageTreeNode::from_object(load(reader, &xref, catalog.pages_ref)?)?;
        let page = PdfPage::from_object(load(reader, &xref, pages.first_page_ref)?)?;

        tracing::debug!(
            catalog = %catalog.own_ref,
            pages = %pages.own_ref,
            page = %page.own_ref,
            media_box_top = page.media_box_top,
            "resolved document chain"
        );

        Ok(Self {
            xref,
            catalog,
            pages,
            page,
        })
    }
}

fn load<R: Read + Seek>(
    reader: &mut R,
    xref: &XRefTable,
    id: ObjectId,
) -> ParseResult<IndirectObject> {
    let offset = xref.offset_of(id)?;
    let object = read_indirect_object(reader, offset)?;
    if object.id != id {
        return Err(ParseError::ObjectMismatch {
            expected: id,
            found: object.id,
            offset,
        });
    }
    Ok(object)
}
