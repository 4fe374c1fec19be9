//! High-level operations
//!
//! [`resolve_links`] joins anchors to the engine's bounding boxes and
//! [`linkify_svg`] runs the whole SVG to linked PDF conversion.

pub mod linkify;
pub mod resolve;

pub use linkify::{linkify_svg, LinkifyOptions, LinkifySummary};
pub use resolve::resolve_links;
