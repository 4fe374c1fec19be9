//! SVG to linked PDF pipeline

use super::resolve::resolve_links;
use crate::engine::{export_pdf, query_bounding_boxes, EngineConfig};
use crate::error::Result;
use crate::svg::extract_links;
use crate::writer::{patch_file, IncrementalUpdateReport, PatchMode};
use std::fs;
use std::path::Path;

/// Options for [`linkify_svg`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkifyOptions {
    pub engine: EngineConfig,
    pub mode: PatchMode,
}

/// Outcome of a conversion
#[derive(Debug, Clone)]
pub struct LinkifySummary {
    /// Anchors with an id found in the SVG
    pub links_found: usize,
    /// Anchors the engine reported a bounding box for
    pub links_resolved: usize,
    /// Objects in the bounding box report
    pub objects: usize,
    pub update: IncrementalUpdateReport,
}

/// Render `input` to `output` and add a link annotation for every anchor.
pub fn linkify_svg<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &LinkifyOptions,
) -> Result<LinkifySummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    let svg = fs::read(input)?;
    let links = extract_links(&String::from_utf8_lossy(&svg));
    if links.is_empty() {
        tracing::warn!(input = %input.display(), "did not find any links");
    }
    let links_found = links.len();

    let objects = query_bounding_boxes(&options.engine, input)?;
    let links = resolve_links(links, &objects);

    export_pdf(&options.engine, input, output)?;
    let update = patch_file(output, &objects, &links, options.mode)?;

    Ok(LinkifySummary {
        links_found,
        links_resolved: links.len(),
        objects: objects.len(),
        update,
    })
}
