use super::*;

fn frame(entries: &[(&str, Property, f64)]) -> StyleFrame {
    let mut f = StyleFrame::new();
    for (t, p, v) in entries {
        f.set(TargetId::from(*t), *p, Value::Scalar(*v));
    }
    f
}

#[test]
fn diff_only_contains_changed_entries() {
    let applied = frame(&[("a", Property::Opacity, 1.0), ("b", Property::Opacity, 0.5)]);
    let desired = frame(&[("a", Property::Opacity, 1.0), ("b", Property::Opacity, 0.6)]);
    let diff = desired.diff(&applied);
    assert_eq!(diff.len(), 1);
    assert_eq!(diff.writes()[0].target.as_str(), "b");
    assert_eq!(diff.writes()[0].value, Value::Scalar(0.6));
}

#[test]
fn diff_against_empty_writes_everything() {
    let desired = frame(&[("a", Property::Opacity, 1.0), ("a", Property::Scale, 2.0)]);
    assert_eq!(desired.diff(&StyleFrame::new()).len(), 2);
}

#[test]
fn merge_prefers_overlay() {
    let mut base = frame(&[("a", Property::Opacity, 0.0)]);
    base.merge(frame(&[("a", Property::Opacity, 1.0)]));
    assert_eq!(
        base.get(&TargetId::from("a"), Property::Opacity),
        Some(Value::Scalar(1.0))
    );
}

#[test]
fn memory_target_filters_unknown_targets_only_via_contains() {
    let mut target = MemoryTarget::with_targets(["a"]);
    assert!(target.contains(&TargetId::from("a")));
    assert!(!target.contains(&TargetId::from("ghost")));

    let mut diff = frame(&[("a", Property::Opacity, 1.0), ("ghost", Property::Opacity, 1.0)])
        .diff(&StyleFrame::new());
    diff.retain_targets(|t| target.contains(t));
    target.apply(&diff);

    assert_eq!(target.value("a", Property::Opacity), Some(Value::Scalar(1.0)));
    assert_eq!(target.value("ghost", Property::Opacity), None);
    assert_eq!(target.commits().len(), 1);
    assert_eq!(target.writes_to(&TargetId::from("a")), 1);
}

#[test]
fn frame_serializes_as_write_list() {
    let f = frame(&[("a", Property::Opacity, 1.0)]);
    let json = serde_json::to_value(&f).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"values": [{"target": "a", "property": "opacity", "value": 1.0}]})
    );
}

#[test]
fn retain_targets_forgets_whole_targets() {
    let mut f = frame(&[
        ("gone", Property::Opacity, 1.0),
        ("gone", Property::Scale, 2.0),
        ("kept", Property::Opacity, 0.5),
    ]);
    f.retain_targets(|t| t.as_str() != "gone");
    assert_eq!(f.len(), 1);
    assert_eq!(
        f.get(&TargetId::from("kept"), Property::Opacity),
        Some(Value::Scalar(0.5))
    );
}
