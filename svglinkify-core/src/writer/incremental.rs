//! Incremental append writer
//!
//! Replaces the first page, its page tree node and the catalog with new
//! objects. Writing starts at the byte offset of the current `xref` keyword,
//! so the old cross-reference section and trailer are overwritten and every
//! byte before them is left as it was.

use crate::annotations::{annotations_to_pdf_string, LinkAnnotation};
use crate::engine::ObjectMap;
use crate::error::Result;
use crate::objects::ObjectId;
use crate::parser::{DocumentChain, XRefEntry};
use crate::svg::PositionedLink;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// How [`patch_file`] touches the target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchMode {
    /// Patch the file itself; a failure midway leaves it partially written
    #[default]
    InPlace,
    /// Patch a copy in the same directory and rename it over the target
    Atomic,
}

/// What an incremental update wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementalUpdateReport {
    /// Offset where appended data begins (the replaced `xref` keyword)
    pub append_start: u64,
    /// Offset of the new `xref` keyword
    pub xref_offset: u64,
    /// Offset just past the final `%%EOF` line
    pub end_offset: u64,
    pub page: ObjectId,
    pub pages: ObjectId,
    pub catalog: ObjectId,
    /// Original page, page tree node and catalog, now free
    pub freed: [ObjectId; 3],
    pub annotation_count: usize,
}

struct AppendWriter<W: Write> {
    writer: W,
    current_position: u64,
}

impl<W: Write> AppendWriter<W> {
    fn new(writer: W, start: u64) -> Self {
        Self {
            writer,
            current_position: start,
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }

    /// Write `data` and return the offset it starts at.
    fn write_object(&mut self, data: &str) -> io::Result<u64> {
        let offset = self.current_position;
        self.write_bytes(data.as_bytes())?;
        Ok(offset)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Add one link annotation per entry of `links` to the first page of `file`.
///
/// `objects` is the complete object map used to resolve `#id` targets. The
/// stream is left positioned at `end_offset`; nothing past it is removed.
pub fn add_links_to_pdf<F: Read + Write + Seek>(
    file: &mut F,
    objects: &ObjectMap,
    links: &[PositionedLink],
) -> Result<IncrementalUpdateReport> {
    let DocumentChain {
        mut xref,
        mut catalog,
        mut pages,
        mut page,
    } = DocumentChain::read(file)?;

    let append_start = xref.own_offset();
    let freed = [page.own_ref, pages.own_ref, catalog.own_ref];

    let first_new = xref.next_object_number();
    let new_page = ObjectId::new(first_new, 0);
    let new_pages = ObjectId::new(first_new + 1, 0);
    let new_catalog = ObjectId::new(first_new + 2, 0);

    page.own_ref = new_page;
    pages.own_ref = new_pages;
    pages.first_page_ref = new_page;
    catalog.own_ref = new_catalog;
    catalog.pages_ref = new_pages;

    let annotations = LinkAnnotation::from_links(links, objects, new_page, page.media_box_top);

    // Serialize before seeking so a rejected page leaves the file untouched
    let page_text = page.serialize(&annotations_to_pdf_string(&annotations))?;
    let pages_text = pages.serialize();
    let catalog_text = catalog.serialize();

    for id in freed {
        xref.free(id.number());
    }

    file.seek(SeekFrom::Start(append_start))?;
    let mut writer = AppendWriter::new(&mut *file, append_start);

    let page_offset = writer.write_object(&page_text)?;
    let pages_offset = writer.write_object(&pages_text)?;
    let catalog_offset = writer.write_object(&catalog_text)?;

    xref.push(XRefEntry::in_use(page_offset));
    xref.push(XRefEntry::in_use(pages_offset));
    xref.push(XRefEntry::in_use(catalog_offset));
    let size = xref.len() as u32;
    xref.trailer_mut().set_root(new_catalog);
    xref.trailer_mut().set_size(size);

    let xref_offset = writer.current_position;
    writer.write_bytes(xref.serialize()?.as_bytes())?;
    writer.write_bytes(format!("startxref\n{xref_offset}\n%%EOF\n").as_bytes())?;
    writer.flush()?;
    let end_offset = writer.current_position;

    tracing::debug!(
        append_start,
        page_offset,
        pages_offset,
        catalog_offset,
        xref_offset,
        "appended incremental update"
    );
    tracing::info!(
        annotations = annotations.len(),
        page = %new_page,
        catalog = %new_catalog,
        size,
        "added link annotations"
    );

    Ok(IncrementalUpdateReport {
        append_start,
        xref_offset,
        end_offset,
        page: new_page,
        pages: new_pages,
        catalog: new_catalog,
        freed,
        annotation_count: annotations.len(),
    })
}

/// Patch the PDF at `path`, then truncate it after the new `%%EOF`.
pub fn patch_file<P: AsRef<Path>>(
    path: P,
    objects: &ObjectMap,
    links: &[PositionedLink],
    mode: PatchMode,
) -> Result<IncrementalUpdateReport> {
    let path = path.as_ref();
    match mode {
        PatchMode::InPlace => {
            let mut file = OpenOptions::new().read(true).write(true).open(path)?;
            let report = add_links_to_pdf(&mut file, objects, links)?;
            file.set_len(report.end_offset)?;
            Ok(report)
        }
        PatchMode::Atomic => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut temp = NamedTempFile::new_in(dir)?;
            io::copy(&mut File::open(path)?, temp.as_file_mut())?;

            let report = add_links_to_pdf(temp.as_file_mut(), objects, links)?;
            temp.as_file().set_len(report.end_offset)?;
            temp.as_file().sync_all()?;
            fs::set_permissions(temp.path(), fs::metadata(path)?.permissions())?;

            temp.persist(path)?;
            tracing::debug!(path = %path.display(), "replaced file atomically");
            Ok(report)
        }
    }
}
