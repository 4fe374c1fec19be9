//! # svglinkify
//!
//! Adds clickable links to PDFs rendered from SVG drawings.
//!
//! SVG anchors do not survive Inkscape's PDF export. This crate recovers them:
//! it collects every `<a href="...">` that carries an `id`, asks the rendering
//! engine for the bounding box of each one, exports the PDF, and then appends
//! an incremental update that gives page one a Link annotation per anchor.
//!
//! ## Features
//!
//! - **External links**: any URL becomes a `URI` action
//! - **Internal links**: `#id` jumps to a `/FitR` view of object `id`
//! - **Byte-exact update**: everything before the original cross-reference
//!   section is preserved; only the page, its page tree node and the catalog
//!   are replaced
//! - **Atomic mode**: optionally patch a copy and rename it over the target
//!
//! The PDF side is not a general parser. It reads the single classic xref
//! section and the catalog → pages → first page chain that cairo writes, and
//! keeps every dictionary as raw text with only the touched keys substituted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use svglinkify::{linkify_svg, LinkifyOptions, Result};
//!
//! # fn main() -> Result<()> {
//! let summary = linkify_svg("drawing.svg", "drawing.pdf", &LinkifyOptions::default())?;
//! println!(
//!     "{} of {} links placed on page {}",
//!     summary.links_resolved, summary.links_found, summary.update.page
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Patching an existing PDF
//!
//! ```rust,no_run
//! use svglinkify::engine::{ObjectMap, PositionedObject};
//! use svglinkify::svg::PositionedLink;
//! use svglinkify::writer::{patch_file, PatchMode};
//!
//! # fn main() -> svglinkify::Result<()> {
//! let mut link = PositionedLink::new("logo", "https://example.com");
//! link.resolve(&PositionedObject::new("logo", 10.0, 20.0, 30.0, 40.0));
//!
//! let report = patch_file("rendered.pdf", &ObjectMap::new(), &[link], PatchMode::Atomic)?;
//! println!("new catalog: {}", report.catalog);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`svg`] - anchor extraction
//! - [`engine`] - rendering engine invocation and bounding box report
//! - [`operations`] - link resolution and the end-to-end pipeline
//! - [`parser`] - xref, trailer and page chain reader
//! - [`annotations`] - Link annotation text
//! - [`writer`] - incremental update writer

pub mod annotations;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod objects;
pub mod operations;
pub mod parser;
pub mod svg;
pub mod writer;

#[cfg(test)]
mod log_capture;

pub use engine::{EngineConfig, ObjectMap, PositionedObject};
pub use error::{LinkifyError, Result};
pub use geometry::{Point, Rectangle};
pub use objects::ObjectId;
pub use operations::{linkify_svg, resolve_links, LinkifyOptions, LinkifySummary};
pub use parser::ParseError;
pub use svg::{extract_links, PositionedLink};
pub use writer::{add_links_to_pdf, patch_file, IncrementalUpdateReport, PatchMode};

/// Current version of svglinkify
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
