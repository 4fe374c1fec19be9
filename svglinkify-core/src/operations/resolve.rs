//! Geometry resolution for extracted anchors

use crate::engine::ObjectMap;
use crate::svg::PositionedLink;

/// Give every link the bounding box of the object sharing its id.
///
/// Links the engine reported nothing for are dropped with a warning; the
/// others keep their document order.
pub fn resolve_links(mut links: Vec<PositionedLink>, objects: &ObjectMap) -> Vec<PositionedLink> {
    for link in links.iter_mut() {
        match objects.get(&link.id) {
            Some(object) => link.resolve(object),
            None => tracing::warn!(
                id = %link.id,
                url = %link.url,
                "no bounding box reported for link, ignoring it"
            ),
        }
    }
    links.retain(|link| link.resolved);
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PositionedObject;
    use crate::log_capture::capture_logs;

    fn objects() -> ObjectMap {
        let mut objects = ObjectMap::new();
        objects.insert("a".to_string(), PositionedObject::new("a", 1.0, 2.0, 3.0, 4.0));
        objects.insert("c".to_string(), PositionedObject::new("c", 5.0, 6.0, 7.0, 8.0));
        objects
    }

    #[test]
    fn test_resolved_links_take_object_geometry() {
        let links = vec![
            PositionedLink::new("a", "https://a.example"),
            PositionedLink::new("c", "#a"),
        ];
        let resolved = resolve_links(links, &objects());
        assert_eq!(resolved.len(), 2);
        assert!(resolved.iter().all(|l| l.resolved));
        assert_eq!((resolved[1].x, resolved[1].height), (5.0, 8.0));
    }

    #[test]
    fn test_unresolved_links_dropped_in_order() {
        let links = vec![
            PositionedLink::new("c", "https://c.example"),
            PositionedLink::new("b", "https://b.example"),
            PositionedLink::new("a", "https://a.example"),
        ];
        let (resolved, logs) = capture_logs(|| resolve_links(links, &objects()));
        let ids: Vec<_> = resolved.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);

        assert_eq!(
            logs.matches("no bounding box reported for link").count(),
            1
        );
        assert!(logs.contains("https://b.example"));
        assert!(!logs.contains("https://a.example"));
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve_links(Vec::new(), &objects()).is_empty());
    }
}
