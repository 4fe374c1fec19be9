//! PDF Parser Module
//!
//! A deliberately small reader for PDFs written by the rendering engine: it
//! understands a single classic cross-reference section, the trailer, and the
//! catalog → page tree → first page chain. Object bodies are kept as raw text
//! so they can be written back with only the fields we touch changed.

pub mod objects;
pub mod page_tree;
#[doc(hidden)]
pub mod test_helpers;
pub mod trailer;
pub mod xref;

pub use self::objects::{read_indirect_object, IndirectObject, LOOKAHEAD_WINDOW};
pub use self::page_tree::{Catalog, DocumentChain, PageTreeNode, PdfPage};
pub use self::trailer::PdfTrailer;
pub use self::xref::{XRefEntry, XRefTable};

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// PDF Parser errors
///
/// Every variant except `Io` means the file does not have the shape the
/// patcher depends on. None of them are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot find startxref in the last {0} bytes")]
    MissingStartXRef(u64),

    #[error("Invalid xref table")]
    InvalidXRef,

    #[error("Unsupported xref subsection starting at object {0}")]
    UnsupportedSubsection(u32),

    #[error("Invalid trailer")]
    InvalidTrailer,

    #[error("Invalid object reference: {0} {1} R")]
    InvalidReference(u32, u16),

    #[error("Missing required key: {0}")]
    MissingKey(String),

    #[error("Cannot read object at byte {offset}")]
    ObjectNotReadable { offset: u64 },

    #[error("Expected object {expected} at byte {offset}, found {found}")]
    ObjectMismatch {
        expected: crate::objects::ObjectId,
        found: crate::objects::ObjectId,
        offset: u64,
    },

    #[error("Object {0} is not a dictionary")]
    NotADictionary(crate::objects::ObjectId),

    #[error("Invalid media box value: {0}")]
    InvalidMediaBox(String),

    #[error("Page /Annots given as an indirect object is not supported")]
    UnsupportedAnnots,
}
