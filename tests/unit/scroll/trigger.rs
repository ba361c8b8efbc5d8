use super::*;

#[test]
fn edges_parse_and_print() {
    let e: Edge = "top 20%".parse().unwrap();
    assert_eq!(e, Edge::new(Anchor::Top, Anchor::Percent(20.0)));
    assert_eq!(e.to_string(), "top 20%");

    let e: Edge = "center 100px".parse().unwrap();
    assert_eq!(e, Edge::new(Anchor::Center, Anchor::Pixels(100.0)));
}

#[test]
fn malformed_edges_are_rejected() {
    assert!("top".parse::<Edge>().is_err());
    assert!("top bottom extra".parse::<Edge>().is_err());
    assert!("middle bottom".parse::<Edge>().is_err());
    assert!("top abc%".parse::<Edge>().is_err());
}

#[test]
fn element_region_resolves_against_viewport() {
    let region = TriggerRegion::parse("top bottom", "bottom top").unwrap();
    let r = region.resolve(ElementBox::new(2000.0, 500.0), 800.0);
    assert_eq!(r.start, 1200.0);
    assert_eq!(r.end, 2500.0);
    assert_eq!(r.progress(1200.0), Progress::START);
    assert_eq!(r.progress(1850.0).get(), 0.5);
    assert_eq!(r.progress(9999.0), Progress::END);
}

#[test]
fn document_region_is_scroll_fraction() {
    let metrics = ScrollMetrics::new(500.0, 3000.0, 1000.0);
    let el = Observed::Document.element_box(&metrics);
    let r = TriggerRegion::document().resolve(el, metrics.viewport_height);
    assert_eq!(r.start, 0.0);
    assert_eq!(r.end, 2000.0);
    assert_eq!(r.progress(metrics.offset).get(), 0.25);
}

#[test]
fn zones_are_inclusive_at_edges() {
    let r = ResolvedRegion {
        start: 100.0,
        end: 200.0,
    };
    assert_eq!(r.zone(99.0), Zone::Below);
    assert_eq!(r.zone(100.0), Zone::Inside);
    assert_eq!(r.zone(200.0), Zone::Inside);
    assert_eq!(r.zone(200.5), Zone::Past);
}

#[test]
fn degenerate_region_steps_at_start() {
    let r = ResolvedRegion {
        start: 300.0,
        end: 100.0,
    };
    assert!(r.is_degenerate());
    assert_eq!(r.progress(299.0), Progress::START);
    assert_eq!(r.progress(300.0), Progress::END);
    assert_eq!(r.zone(299.0), Zone::Below);
    assert_eq!(r.zone(300.0), Zone::Past);
}

#[test]
fn trigger_region_json_uses_edge_strings() {
    let r: TriggerRegion =
        serde_json::from_str(r#"{"start": "top 20%", "end": "bottom bottom"}"#).unwrap();
    assert_eq!(r.start, Edge::new(Anchor::Top, Anchor::Percent(20.0)));
    let back = serde_json::to_string(&r).unwrap();
    assert_eq!(back, r#"{"start":"top 20%","end":"bottom bottom"}"#);
}
