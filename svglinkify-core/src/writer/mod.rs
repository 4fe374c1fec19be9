//! PDF writing functionality
//!
//! Only incremental updates are supported: replacement objects and a new
//! cross-reference section are appended over the tail of an existing file.

mod incremental;

pub use incremental::{add_links_to_pdf, patch_file, IncrementalUpdateReport, PatchMode};
