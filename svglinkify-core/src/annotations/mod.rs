//! Link annotations according to ISO 32000-1 Section 12.5.6.5
//!
//! Annotations are produced directly as dictionary text for the page's
//! `/Annots` array; they are never written as separate indirect objects.

mod link;

pub use link::{annotations_to_pdf_string, LinkAction, LinkAnnotation, LinkDestination};
