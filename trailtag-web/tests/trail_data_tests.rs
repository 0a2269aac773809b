use std::collections::BTreeSet;

use trailtag_web::trail::{CatalogLoader, WebCatalogLoader, distance_meters};

#[test]
fn embedded_stops_dataset_loads() {
    let catalog = WebCatalogLoader.load_stops().expect("embedded stops parse");
    assert!(!catalog.is_empty());

    let ids: BTreeSet<&str> = catalog.iter().map(|stop| stop.id.as_str()).collect();
    assert_eq!(ids.len(), catalog.len(), "stop ids must be unique");

    let ordinals: Vec<usize> = catalog.iter().map(|stop| stop.ordinal).collect();
    let expected: Vec<usize> = (0..catalog.len()).collect();
    assert_eq!(ordinals, expected, "ordinals are a dense 0..N-1 assignment");

    for stop in catalog.iter() {
        assert!(!stop.name.is_empty());
        assert!(!stop.hint.is_empty());
        assert!(
            !stop.short_label.is_empty(),
            "short label falls back to the name"
        );
        assert!(
            !stop.emblem.is_empty(),
            "emblem falls back to the default glyph"
        );
        assert!(stop.lat.is_finite() && stop.lng.is_finite());
    }
}

#[test]
fn consecutive_stops_are_a_short_walk_apart() {
    let catalog = WebCatalogLoader.load_stops().unwrap();
    let stops: Vec<_> = catalog.iter().collect();
    for pair in stops.windows(2) {
        let d = distance_meters(pair[0].lat, pair[0].lng, pair[1].lat, pair[1].lng);
        assert!(
            d > 20.0,
            "{} and {} overlap within the unlock radius: {d} m",
            pair[0].id,
            pair[1].id
        );
        assert!(
            d < 1_000.0,
            "{} and {} are too far apart for a walking trail: {d} m",
            pair[0].id,
            pair[1].id
        );
    }
}
