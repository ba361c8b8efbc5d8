use super::*;
use crate::animation::binding::Binding;
use crate::animation::value::Property;

fn fade(target: &str) -> BindingTable {
    BindingTable::builder()
        .bind(Binding::new(target, Property::Opacity, 0.0, 1.0))
        .build()
        .unwrap()
}

#[test]
fn parses_minimal_json() {
    let spec: RegionSpec = serde_json::from_str(
        r#"{
            "id": "hero",
            "trigger": { "start": "top top", "end": "bottom top" },
            "element": { "kind": "element", "top": 0, "height": 800 },
            "bindings": [
                { "target": "title", "property": "opacity", "from": 0, "to": 1 }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(spec.id, "hero");
    assert_eq!(spec.bindings.len(), 1);
    assert_eq!(spec.scrub_secs, 0.0);
    assert!(spec.steps.is_empty());
    assert!(spec.clips.is_empty());
    spec.validate().unwrap();
}

#[test]
fn unknown_fields_are_rejected() {
    let r: Result<RegionSpec, _> = serde_json::from_str(
        r#"{ "id": "x", "trigger": { "start": "top top", "end": "bottom top" }, "scrub": 1 }"#,
    );
    assert!(r.is_err());
}

#[test]
fn targets_are_deduplicated_across_bindings_and_steps() {
    let spec = RegionSpec::new("r", TriggerRegion::document())
        .bindings(fade("ring"))
        .steps(StepSetSpec::new(["a", "b"]).markers(["da", "db"]));
    let names: Vec<String> = spec
        .targets()
        .into_iter()
        .map(|t| t.as_str().to_owned())
        .collect();
    assert_eq!(names, ["ring", "a", "b", "da", "db"]);
}

#[test]
fn validation_catches_bad_regions() {
    let blank = RegionSpec::new("  ", TriggerRegion::document());
    assert!(blank.validate().is_err());

    let neg_scrub = RegionSpec::new("r", TriggerRegion::document()).scrub(-1.0);
    assert!(neg_scrub.validate().is_err());

    let reset_without_steps =
        RegionSpec::new("r", TriggerRegion::document()).reset_steps_on([EdgeEvent::Leave]);
    assert!(reset_without_steps.validate().is_err());

    let marker_mismatch = RegionSpec::new("r", TriggerRegion::document())
        .steps(StepSetSpec::new(["a", "b"]).markers(["da"]));
    assert!(marker_mismatch.validate().is_err());

    let shared = RegionSpec::new("r", TriggerRegion::document())
        .bindings(fade("a"))
        .steps(StepSetSpec::new(["a"]));
    assert!(shared.validate().is_err());
}

fn fade_in(target: &str) -> Timeline {
    Timeline::builder()
        .push(
            crate::animation::timeline::TimelineStep::new(target, Property::Opacity, 0.0, 1.0, 1.0),
            crate::animation::timeline::Position::After,
        )
        .build()
        .unwrap()
}

#[test]
fn several_step_sets_and_clips_share_a_region() {
    let spec = RegionSpec::new("circle", TriggerRegion::document())
        .bindings(fade("ring"))
        .steps(StepSetSpec::new(["t1", "t2"]).markers(["d1", "d2"]))
        .steps(StepSetSpec::new(["desc1", "desc2"]))
        .clip(fade_in("model"), ToggleActions::PLAY_REVERSE);
    spec.validate().unwrap();
    let names: Vec<String> = spec
        .targets()
        .into_iter()
        .map(|t| t.as_str().to_owned())
        .collect();
    assert_eq!(names, ["ring", "t1", "t2", "d1", "d2", "desc1", "desc2", "model"]);
}

#[test]
fn conflicting_clips_and_step_sets_are_rejected() {
    let clip_over_binding = RegionSpec::new("r", TriggerRegion::document())
        .bindings(fade("model"))
        .clip(fade_in("model"), ToggleActions::PLAY_REVERSE);
    let err = clip_over_binding.validate().unwrap_err().to_string();
    assert!(err.contains("region 'r'"), "{err}");

    let same_target_twice = RegionSpec::new("r", TriggerRegion::document())
        .steps(StepSetSpec::new(["a", "b"]))
        .steps(StepSetSpec::new(["b", "c"]));
    assert!(same_target_twice.validate().is_err());

    let stepped_and_clipped = RegionSpec::new("r", TriggerRegion::document())
        .steps(StepSetSpec::new(["a"]))
        .clip(fade_in("a"), ToggleActions::PLAY_REVERSE);
    assert!(stepped_and_clipped.validate().is_err());
}

#[test]
fn clips_parse_from_json() {
    let spec: RegionSpec = serde_json::from_str(
        r#"{
            "id": "words",
            "trigger": { "start": "top 80%", "end": "bottom 20%" },
            "clips": [{
                "actions": "play none none reverse",
                "timeline": {
                    "duration_secs": 1.2,
                    "bindings": [
                        { "target": "word", "property": "opacity", "from": 0, "to": 1 }
                    ],
                    "cues": [{ "name": "shown", "at_secs": 1.2 }]
                }
            }]
        }"#,
    )
    .unwrap();
    assert_eq!(spec.clips.len(), 1);
    assert_eq!(spec.clips[0].actions, ToggleActions::PLAY_REVERSE);
    assert_eq!(spec.clips[0].timeline.cues()[0].name, "shown");
    spec.validate().unwrap();
}
