//! Rendering engine (Inkscape) subprocess wrapper
//!
//! Two blocking invocations, each with its output fully buffered:
//!
//! - `<engine> -S <input>` reports `id,x,y,width,height` for every object
//! - `<engine> --export-dpi <dpi> --export-pdf <output> <input>` renders the PDF

use crate::error::{LinkifyError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

lazy_static! {
    static ref BOUNDING_BOX: Regex =
        Regex::new(r"(?m)^([^,\r\n]+),([^,\r\n]+),([^,\r\n]+),([^,\r\n]+),([^,\r\n]+)\r?$")
            .unwrap();
}

/// Objects reported by the engine, keyed by SVG id
pub type ObjectMap = HashMap<String, PositionedObject>;

/// How to run the rendering engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Executable, resolved through `PATH` when not absolute
    pub binary: PathBuf,
    /// Resolution for rasterized content in the exported PDF
    pub export_dpi: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("inkscape"),
            export_dpi: 96,
        }
    }
}

impl EngineConfig {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ..Default::default()
        }
    }

    pub fn with_export_dpi(mut self, dpi: u32) -> Self {
        self.export_dpi = dpi;
        self
    }

    fn run<I, S>(&self, action: &'static str, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        tracing::debug!(binary = %self.binary.display(), action, "invoking rendering engine");
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| LinkifyError::EngineNotFound {
                path: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(LinkifyError::EngineFailed {
                action,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

/// Bounding box of an SVG object in pixels, origin at the top-left
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedObject {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionedObject {
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
        }
    }
}

/// Parse the engine's query report. Lines that do not have five fields are
/// ignored; lines with a non-numeric field are skipped with a warning.
pub fn parse_bounding_boxes(report: &str) -> ObjectMap {
    let mut objects = ObjectMap::new();

    'lines: for caps in BOUNDING_BOX.captures_iter(report) {
        let id = &caps[1];
        let mut values = [0.0f64; 4];
        for (slot, (value, field)) in values
            .iter_mut()
            .zip(["x", "y", "width", "height"])
            .enumerate()
        {
            let text = &caps[slot + 2];
            match text.trim().parse::<f64>() {
                Ok(parsed) => *value = parsed,
                Err(_) => {
                    tracing::warn!(
                        id,
                        field,
                        value = text,
                        "invalid number in bounding box report, ignoring object"
                    );
                    continue 'lines;
                }
            }
        }

        let [x, y, width, height] = values;
        objects.insert(id.to_string(), PositionedObject::new(id, x, y, width, height));
    }

    objects
}

/// Ask the engine for the bounding box of every object in `input`.
pub fn query_bounding_boxes(config: &EngineConfig, input: &Path) -> Result<ObjectMap> {
    let output = config.run("querying bounding boxes", [OsStr::new("-S"), input.as_os_str()])?;
    let report = String::from_utf8(output.stdout)
        .map_err(|e| LinkifyError::InvalidEngineOutput(e.to_string()))?;

    let objects = parse_bounding_boxes(&report);
    tracing::info!(objects = objects.len(), "queried bounding boxes");
    Ok(objects)
}

/// Render `input` to a PDF at `output`.
pub fn export_pdf(config: &EngineConfig, input: &Path, output: &Path) -> Result<()> {
    let dpi = config.export_dpi.to_string();
    config.run(
        "exporting PDF",
        [
            OsStr::new("--export-dpi"),
            OsStr::new(&dpi),
            OsStr::new("--export-pdf"),
            output.as_os_str(),
            input.as_os_str(),
        ],
    )?;
    tracing::info!(output = %output.display(), dpi = config.export_dpi, "exported PDF");
    Ok(())
}
