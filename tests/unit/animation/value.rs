use super::*;

#[test]
fn scalar_lerp_endpoints_are_exact() {
    let (a, b) = (0.1, 0.7);
    assert_eq!(f64::lerp(&a, &b, 0.0), a);
    assert_eq!(f64::lerp(&a, &b, 1.0), b);
    assert_eq!(f64::lerp(&0.0, &10.0, 0.5), 5.0);
}

#[test]
fn inset_lerps_per_side() {
    let v = ClipInset::lerp(&ClipInset::closed_from_top(), &ClipInset::open(), 0.25);
    assert_eq!(v, ClipInset::new(75.0, 0.0, 0.0, 0.0));
    assert_eq!(ClipInset::closed_from_bottom().to_string(), "inset(0% 0% 100% 0%)");
}

#[test]
fn mismatched_kinds_hold_until_end() {
    let a = Value::Scalar(1.0);
    let b = Value::Inset(ClipInset::open());
    assert_eq!(Value::lerp(&a, &b, 0.99), a);
    assert_eq!(Value::lerp(&a, &b, 1.0), b);
}

#[test]
fn property_kinds() {
    assert_eq!(Property::Opacity.kind(), ValueKind::Scalar);
    assert_eq!(Property::Translate.kind(), ValueKind::Vec2);
    assert_eq!(Property::ClipPath.kind(), ValueKind::Inset);
}

#[test]
fn values_deserialize_untagged() {
    let s: Value = serde_json::from_str("0.5").unwrap();
    assert_eq!(s, Value::Scalar(0.5));

    let v: Value = serde_json::from_str(r#"{"x": 1.0, "y": 2.0}"#).unwrap();
    assert_eq!(v, Value::Vec2(Vec2::new(1.0, 2.0)));

    let c: Value =
        serde_json::from_str(r#"{"top": 100.0, "right": 0.0, "bottom": 0.0, "left": 0.0}"#)
            .unwrap();
    assert_eq!(c, Value::Inset(ClipInset::closed_from_top()));
}
