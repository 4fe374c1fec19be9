//! Helper functions for creating test PDFs with correct xref offsets
//!
//! The layout mirrors what cairo (Inkscape's PDF backend) writes: content
//! stream first, then page, page tree, info and catalog, one classic xref
//! section and a multi-line trailer.

use crate::objects::ObjectId;

/// Knobs for [`build_single_page_pdf`]
#[derive(Debug, Clone)]
pub struct FixtureOptions {
    pub page_width: f64,
    pub page_height: f64,
    /// Extra text placed inside the page dictionary before `>>`
    pub extra_page_entries: String,
    /// Bytes appended after `%%EOF`
    pub trailing_bytes: Vec<u8>,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            extra_page_entries: String::new(),
            trailing_bytes: b"\n".to_vec(),
        }
    }
}

/// A generated PDF and where things ended up in it
#[derive(Debug, Clone)]
pub struct PdfFixture {
    pub bytes: Vec<u8>,
    /// Offsets of objects 1..=n, in object number order
    pub object_offsets: Vec<u64>,
    pub xref_offset: u64,
    pub catalog: ObjectId,
    pub pages: ObjectId,
    pub page: ObjectId,
    pub info: ObjectId,
    pub options: FixtureOptions,
}

impl PdfFixture {
    pub fn offset_of(&self, id: ObjectId) -> u64 {
        self.object_offsets[id.number() as usize - 1]
    }
}

/// Creates a one page PDF shaped like the rendering engine's output
pub fn build_single_page_pdf(options: &FixtureOptions) -> PdfFixture {
    let content = "0.2 0.4 0.8 rg\n0 0 72 72 re f\n";
    let objects = vec![
        format!(
            "1 0 obj\n<< /Length {} >>\nstream\n{}endstream\nendobj\n",
            content.len(),
            content
        ),
        format!(
            "2 0 obj\n<< /Type /Page\n   /Parent 3 0 R\n   /MediaBox [ 0 0 {} {} ]\n   /Contents 1 0 R\n   /Group <<\n      /Type /Group\n      /S /Transparency\n      /I true\n      /CS /DeviceRGB\n   >>\n   /Resources << >>{}\n>>\nendobj\n",
            options.page_width, options.page_height, options.extra_page_entries
        ),
        "3 0 obj\n<< /Type /Pages\n   /Kids [ 2 0 R ]\n   /Count 1\n>>\nendobj\n".to_string(),
        "4 0 obj\n<< /Producer (cairo 1.16.0 (https://cairographics.org))\n   /CreationDate (D:20240102030405Z)\n>>\nendobj\n".to_string(),
        "5 0 obj\n<< /Type /Catalog\n   /Pages 3 0 R\n>>\nendobj\n".to_string(),
    ];

    let mut bytes = b"%PDF-1.5\n%\xB5\xED\xAE\xFB\n".to_vec();
    let mut object_offsets = Vec::new();
    for object in &objects {
        object_offsets.push(bytes.len() as u64);
        bytes.extend_from_slice(object.as_bytes());
    }

    let xref_offset = bytes.len() as u64;
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in &object_offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {}\n   /Root 5 0 R\n   /Info 4 0 R\n>>\nstartxref\n{}\n%%EOF",
        objects.len() + 1,
        xref_offset
    ));
    bytes.extend_from_slice(xref.as_bytes());
    bytes.extend_from_slice(&options.trailing_bytes);

    PdfFixture {
        bytes,
        object_offsets,
        xref_offset,
        catalog: ObjectId::new(5, 0),
        pages: ObjectId::new(3, 0),
        page: ObjectId::new(2, 0),
        info: ObjectId::new(4, 0),
        options: options.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_point_at_objects() {
        let fixture = build_single_page_pdf(&FixtureOptions::default());
        for (index, offset) in fixture.object_offsets.iter().enumerate() {
            let header = format!("{} 0 obj", index + 1);
            assert!(fixture.bytes[*offset as usize..].starts_with(header.as_bytes()));
        }
        assert!(fixture.bytes[fixture.xref_offset as usize..].starts_with(b"xref\n"));
    }

    #[test]
    fn test_page_size_is_configurable() {
        let options = FixtureOptions {
            page_width: 300.0,
            page_height: 400.5,
            ..Default::default()
        };
        let fixture = build_single_page_pdf(&options);
        let text = String::from_utf8_lossy(&fixture.bytes);
        assert!(text.contains("/MediaBox [ 0 0 300 400.5 ]"));
    }
}
