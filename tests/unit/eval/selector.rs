use super::*;

#[test]
fn active_index_known_points() {
    assert_eq!(active_index(Progress::new(0.0), 5), Some(0));
    assert_eq!(active_index(Progress::new(0.999), 5), Some(4));
    assert_eq!(active_index(Progress::new(1.0), 5), Some(4));
    assert_eq!(active_index(Progress::new(0.5), 0), None);
}

#[test]
fn exact_boundaries_enter_the_upper_step() {
    assert_eq!(active_index(Progress::new(0.2), 5), Some(1));
    assert_eq!(active_index(Progress::new(0.4), 5), Some(2));
    assert_eq!(active_index(Progress::new(0.5), 2), Some(1));
}

#[test]
fn forty_percent_of_five_steps() {
    let snap = StepSnapshot::at(Progress::new(0.4), 5).unwrap();
    assert_eq!(snap.active, 2);
    assert_eq!(
        snap.states,
        vec![
            StepState::Completed,
            StepState::Completed,
            StepState::Active,
            StepState::Pending,
            StepState::Pending,
        ]
    );
}

#[test]
fn sequence_rejects_empty_and_indexes_in_order() {
    assert!(StepSequence::<&str>::new(Vec::new()).is_err());
    let seq = StepSequence::new([("a", -90.0), ("b", -18.0)]).unwrap();
    assert_eq!(seq.get(1).unwrap().index, 1);
    assert_eq!(seq.active(Progress::new(0.75)).unwrap().content, "b");
}

#[test]
fn evenly_spaced_starts_at_top() {
    let seq = StepSequence::evenly_spaced(["a", "b", "c", "d", "e"]).unwrap();
    let angles: Vec<f64> = seq.items().iter().map(|i| i.angle_deg).collect();
    assert_eq!(angles, vec![-90.0, -18.0, 54.0, 126.0, 198.0]);

    let top = seq.get(0).unwrap().position(350.0);
    assert!(top.x.abs() < 1e-9);
    assert!((top.y + 350.0).abs() < 1e-9);
}

#[test]
fn markers_lag_their_step_by_a_tenth() {
    assert!(!marker_visible(Progress::new(0.0), 0, 5));
    assert!(marker_visible(Progress::new(0.03), 0, 5));
    assert!(!marker_visible(Progress::new(0.215), 1, 5));
    assert!(marker_visible(Progress::new(0.23), 1, 5));
    assert!(!marker_visible(Progress::new(1.0), 5, 5));
}
