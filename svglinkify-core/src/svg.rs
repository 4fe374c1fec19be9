//! Anchor extraction from SVG markup
//!
//! Only `<a>` start tags are inspected. The target attribute is matched on a
//! word boundary so `xlink:href` (SVG 1.1) and plain `href` (SVG 2) both
//! work. Anchors without an `id` cannot be located by the rendering engine
//! and are skipped.

use crate::engine::PositionedObject;
use crate::geometry::Rectangle;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ANCHOR: Regex = Regex::new(r#"<a\s[^>]*\bhref="([^">]+)"[^>]*>"#).unwrap();
    static ref ANCHOR_ID: Regex = Regex::new(r#"\bid="([^"]+)""#).unwrap();
}

/// A hyperlink found in the SVG, with its pixel geometry once resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLink {
    pub id: String,
    pub url: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Set once the rendering engine reported a bounding box for `id`
    pub resolved: bool,
}

impl PositionedLink {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            resolved: false,
        }
    }

    /// The target id of an internal `#id` link.
    ///
    /// A lone `#` names no object and is treated as an ordinary URL.
    pub fn bare_fragment(&self) -> Option<&str> {
        self.url.strip_prefix('#').filter(|id| !id.is_empty())
    }

    /// Take over the geometry of the object carrying this link's id.
    pub fn resolve(&mut self, object: &PositionedObject) {
        self.x = object.x;
        self.y = object.y;
        self.width = object.width;
        self.height = object.height;
        self.resolved = true;
    }

    /// Hotspot rectangle in PDF user space.
    pub fn rect(&self, page_top: f64) -> Rectangle {
        Rectangle::from_pixel_box(self.x, self.y, self.width, self.height, page_top)
    }
}

/// All anchors carrying both an `href` and an `id`, in document order.
pub fn extract_links(svg: &str) -> Vec<PositionedLink> {
    let mut links = Vec::new();
    for caps in ANCHOR.captures_iter(svg) {
        let tag = &caps[0];
        match ANCHOR_ID.captures(tag) {
            Some(id) => links.push(PositionedLink::new(&id[1], &caps[1])),
            None => tracing::debug!(url = &caps[1], "skipping anchor without id"),
        }
    }
    tracing::debug!(count = links.len(), "extracted anchors");
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_href() {
        let svg = r##"<svg><a id="a1" href="https://example.com"><rect/></a></svg>"##;
        let links = extract_links(svg);
        assert_eq!(links, vec![PositionedLink::new("a1", "https://example.com")]);
    }

    #[test]
    fn test_extract_xlink_href_any_attribute_order() {
        let svg = r##"<svg>
  <a xlink:href="#target" id="jump"><text>go</text></a>
  <a
     id="ext"
     xlink:href="mailto:someone@example.com"><rect /></a>
</svg>"##;
        let links = extract_links(svg);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].id, "jump");
        assert_eq!(links[0].url, "#target");
        assert_eq!(links[1].id, "ext");
        assert_eq!(links[1].url, "mailto:someone@example.com");
    }

    #[test]
    fn test_anchor_without_id_skipped() {
        let svg = r##"<a href="https://one.example"></a><a id="two" href="https://two.example"></a>"##;
        let links = extract_links(svg);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].id, "two");
    }

    #[test]
    fn test_non_anchor_elements_ignored() {
        let svg = r##"<abbr id="x" href="https://nope.example"/><use id="u" xlink:href="#sym"/>"##;
        assert!(extract_links(svg).is_empty());
    }

    #[test]
    fn test_bare_fragment() {
        assert_eq!(PositionedLink::new("l", "#other").bare_fragment(), Some("other"));
        assert_eq!(PositionedLink::new("l", "https://x.example/#frag").bare_fragment(), None);
        assert_eq!(PositionedLink::new("l", "#").bare_fragment(), None);
    }

    #[test]
    fn test_resolve_copies_geometry() {
        let mut link = PositionedLink::new("l", "https://example.com");
        link.resolve(&PositionedObject::new("l", 10.0, 20.0, 30.0, 40.0));
        assert!(link.resolved);
        assert_eq!((link.x, link.y, link.width, link.height), (10.0, 20.0, 30.0, 40.0));

        let rect = link.rect(792.0);
        assert_eq!(rect.left(), 7.5);
        assert_eq!(rect.top(), 777.0);
    }
}
