//! Link annotation implementation

use crate::engine::ObjectMap;
use crate::geometry::Rectangle;
use crate::objects::ObjectReference;
use crate::svg::PositionedLink;

/// Link destination types
#[derive(Debug, Clone, PartialEq)]
pub enum LinkDestination {
    /// Fit rectangle
    FitR {
        /// Page reference
        page: ObjectReference,
        /// Rectangle to fit
        rect: Rectangle,
    },
}

impl LinkDestination {
    /// Convert to PDF array
    pub fn to_array(&self) -> String {
        match self {
            LinkDestination::FitR { page, rect } => {
                format!("[ {} /FitR {} ]", page, rect.to_fit_operands())
            }
        }
    }
}

/// Link action types
#[derive(Debug, Clone, PartialEq)]
pub enum LinkAction {
    /// Go to destination in same document
    GoTo(LinkDestination),
    /// URI action
    URI {
        /// URI to open, written verbatim between parentheses
        uri: String,
    },
}

impl LinkAction {
    /// Convert to PDF dictionary
    pub fn to_dict(&self) -> String {
        match self {
            LinkAction::GoTo(dest) => format!("<< /S /GoTo /D {} >>", dest.to_array()),
            LinkAction::URI { uri } => format!("<< /S /URI /URI ({uri}) >>"),
        }
    }
}

/// Link annotation
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAnnotation {
    /// Clickable area
    pub rect: Rectangle,
    /// `None` leaves the hotspot without an action
    pub action: Option<LinkAction>,
}

impl LinkAnnotation {
    /// Create a new link annotation
    pub fn new(rect: Rectangle, action: LinkAction) -> Self {
        Self {
            rect,
            action: Some(action),
        }
    }

    /// An annotation that does nothing when clicked
    pub fn inert(rect: Rectangle) -> Self {
        Self { rect, action: None }
    }

    /// Create a link to a URI
    pub fn to_uri(rect: Rectangle, uri: impl Into<String>) -> Self {
        Self::new(rect, LinkAction::URI { uri: uri.into() })
    }

    /// Create a link that frames `target` on `page`
    pub fn to_rect(rect: Rectangle, page: ObjectReference, target: Rectangle) -> Self {
        Self::new(
            rect,
            LinkAction::GoTo(LinkDestination::FitR { page, rect: target }),
        )
    }

    /// The annotation dictionary, padded with one space on each side.
    pub fn to_pdf_string(&self) -> String {
        let action = self
            .action
            .as_ref()
            .map(|action| format!("/A {} ", action.to_dict()))
            .unwrap_or_default();
        format!(
            " << /Type /Annot /Subtype /Link /Border [ 0 0 0 ] {}/Rect [ {} ] >> ",
            action,
            self.rect.to_rect_operands()
        )
    }

    /// Build one annotation per link. `#id` links jump to the box of object
    /// `id` on `page`; everything else opens the URL.
    pub fn from_links(
        links: &[PositionedLink],
        objects: &ObjectMap,
        page: ObjectReference,
        page_top: f64,
    ) -> Vec<Self> {
        links
            .iter()
            .map(|link| {
                let rect = link.rect(page_top);
                match link.bare_fragment() {
                    Some(fragment) => match objects.get(fragment) {
                        Some(target) => {
                            let target = Rectangle::from_pixel_box(
                                target.x,
                                target.y,
                                target.width,
                                target.height,
                                page_top,
                            );
                            Self::to_rect(rect, page, target)
                        }
                        None => {
                            tracing::warn!(url = %link.url, "link points to non-existing object");
                            Self::inert(rect)
                        }
                    },
                    None => Self::to_uri(rect, link.url.as_str()),
                }
            })
            .collect()
    }
}

/// Concatenated annotation dictionaries, ready for an `/Annots` array.
pub fn annotations_to_pdf_string(annotations: &[LinkAnnotation]) -> String {
    annotations
        .iter()
        .map(LinkAnnotation::to_pdf_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PositionedObject;
    use crate::geometry::Point;
    use crate::log_capture::capture_logs;

    fn resolved(id: &str, url: &str, x: f64, y: f64, w: f64, h: f64) -> PositionedLink {
        let mut link = PositionedLink::new(id, url);
        link.resolve(&PositionedObject::new(id, x, y, w, h));
        link
    }

    #[test]
    fn test_link_action_uri() {
        let action = LinkAction::URI {
            uri: "https://example.com".to_string(),
        };
        assert_eq!(action.to_dict(), "<< /S /URI /URI (https://example.com) >>");
    }

    #[test]
    fn test_destination_fit_rect() {
        let rect = Rectangle::new(Point::new(50.0, 100.0), Point::new(550.0, 700.0));
        let dest = LinkDestination::FitR {
            page: ObjectReference::new(9, 0),
            rect,
        };
        assert_eq!(
            dest.to_array(),
            "[ 9 0 R /FitR 50.000000 100.000000 550.000000 700.000000 ]"
        );
    }

    #[test]
    fn test_uri_annotation_text() {
        let rect = Rectangle::from_pixel_box(0.0, 0.0, 96.0, 96.0, 792.0);
        let link = LinkAnnotation::to_uri(rect, "https://example.com");
        assert_eq!(
            link.to_pdf_string(),
            " << /Type /Annot /Subtype /Link /Border [ 0 0 0 ] /A << /S /URI /URI (https://example.com) >> /Rect [ 0.000000 792.000000 72.000000 720.000000 ] >> "
        );
    }

    #[test]
    fn test_inert_annotation_has_no_action() {
        let rect = Rectangle::from_pixel_box(0.0, 0.0, 96.0, 96.0, 792.0);
        let text = LinkAnnotation::inert(rect).to_pdf_string();
        assert!(!text.contains("/A "));
        assert_eq!(
            text,
            " << /Type /Annot /Subtype /Link /Border [ 0 0 0 ] /Rect [ 0.000000 792.000000 72.000000 720.000000 ] >> "
        );
    }

    #[test]
    fn test_fragment_resolves_to_page_rect() {
        let mut objects = ObjectMap::new();
        objects.insert(
            "other".to_string(),
            PositionedObject::new("other", 50.0, 60.0, 10.0, 10.0),
        );
        let links = vec![resolved("jump", "#other", 10.0, 20.0, 30.0, 40.0)];
        let page = ObjectReference::new(12, 0);

        let annotations = LinkAnnotation::from_links(&links, &objects, page, 792.0);
        assert_eq!(annotations.len(), 1);
        match &annotations[0].action {
            Some(LinkAction::GoTo(LinkDestination::FitR { page: target, rect })) => {
                assert_eq!(*target, page);
                assert_eq!(rect.left(), 37.5);
                assert_eq!(rect.bottom(), 739.5);
                assert_eq!(rect.right(), 45.0);
                assert_eq!(rect.top(), 747.0);
            }
            other => panic!("expected GoTo action, got {other:?}"),
        }
        assert!(annotations[0].to_pdf_string().contains(
            "/A << /S /GoTo /D [ 12 0 R /FitR 37.500000 739.500000 45.000000 747.000000 ] >>"
        ));
    }

    #[test]
    fn test_missing_fragment_target_is_inert() {
        let links = vec![resolved("jump", "#nowhere", 0.0, 0.0, 10.0, 10.0)];
        let page = ObjectReference::new(3, 0);
        let (annotations, logs) = capture_logs(|| {
            LinkAnnotation::from_links(&links, &ObjectMap::new(), page, 792.0)
        });
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].action, None);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("link points to non-existing object"));
        assert!(logs.contains("#nowhere"));
    }

    #[test]
    fn test_resolved_links_log_nothing() {
        let mut objects = ObjectMap::new();
        objects.insert(
            "other".to_string(),
            PositionedObject::new("other", 0.0, 0.0, 1.0, 1.0),
        );
        let links = vec![
            resolved("jump", "#other", 0.0, 0.0, 1.0, 1.0),
            resolved("web", "https://example.com", 0.0, 0.0, 1.0, 1.0),
        ];
        let (_, logs) = capture_logs(|| {
            LinkAnnotation::from_links(&links, &objects, ObjectReference::new(3, 0), 10.0)
        });
        assert!(!logs.contains("WARN"));
    }

    #[test]
    fn test_lone_hash_is_a_uri() {
        let links = vec![resolved("top", "#", 0.0, 0.0, 1.0, 1.0)];
        let page = ObjectReference::new(3, 0);
        let (annotations, logs) = capture_logs(|| {
            LinkAnnotation::from_links(&links, &ObjectMap::new(), page, 10.0)
        });
        assert_eq!(
            annotations[0].action,
            Some(LinkAction::URI {
                uri: "#".to_string()
            })
        );
        assert!(annotations[0].to_pdf_string().contains("/URI (#)"));
        assert!(!logs.contains("non-existing object"));
    }

    #[test]
    fn test_uri_is_written_verbatim() {
        let links = vec![resolved(
            "q",
            "https://example.com/search?q=a+b&x=%20",
            0.0,
            0.0,
            1.0,
            1.0,
        )];
        let page = ObjectReference::new(3, 0);
        let annotations = LinkAnnotation::from_links(&links, &ObjectMap::new(), page, 100.0);
        assert!(annotations[0]
            .to_pdf_string()
            .contains("/URI (https://example.com/search?q=a+b&x=%20)"));
    }

    #[test]
    fn test_annotations_concatenated_in_order() {
        let rect = Rectangle::from_pixel_box(0.0, 0.0, 4.0, 4.0, 10.0);
        let text = annotations_to_pdf_string(&[
            LinkAnnotation::to_uri(rect, "a:1"),
            LinkAnnotation::to_uri(rect, "b:2"),
        ]);
        let first = text.find("(a:1)").unwrap();
        let second = text.find("(b:2)").unwrap();
        assert!(first < second);
        assert!(text.contains(">>  <<"));
    }
}
