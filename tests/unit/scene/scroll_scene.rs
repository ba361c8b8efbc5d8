use super::*;
use crate::animation::binding::Binding;
use crate::animation::ease::Ease;
use crate::animation::timeline::{Position, TimelineStep};
use crate::animation::value::{Property, Value};
use crate::eval::diff::MemoryTarget;
use crate::scene::clip::ToggleActions;
use crate::scene::region::StepSetSpec;
use crate::scroll::trigger::TriggerRegion;
use std::cell::RefCell;

fn fade_region(id: &str, target: &str) -> RegionSpec {
    // Element at [1000, 1500] with a 500px viewport: progress runs over offsets [500, 1500].
    RegionSpec::new(id, TriggerRegion::parse("top bottom", "bottom top").unwrap())
        .element(1000.0, 500.0)
        .bindings(
            BindingTable::builder()
                .bind(Binding::new(target, Property::Opacity, 0.0, 1.0))
                .build()
                .unwrap(),
        )
}

fn at(offset: f64) -> ScrollMetrics {
    ScrollMetrics::new(offset, 5000.0, 500.0)
}

#[test]
fn scroll_event_writes_interpolated_value() {
    let scene = ScrollScene::new();
    let _h = scene.mount(fade_region("r", "box")).unwrap();
    let mut dom = MemoryTarget::open();

    scene.on_scroll(at(900.0), &mut dom);
    assert_eq!(dom.value("box", Property::Opacity), Some(Value::Scalar(0.4)));
    assert_eq!(scene.progress_of("r"), Some(Progress::new(0.4)));
}

#[test]
fn unchanged_progress_produces_no_writes() {
    let scene = ScrollScene::new();
    let _h = scene.mount(fade_region("r", "box")).unwrap();
    let mut dom = MemoryTarget::open();

    scene.on_scroll(at(900.0), &mut dom);
    let report = scene.on_scroll(at(900.0), &mut dom);
    assert!(report.diff.is_empty());
    assert!(report.edges.is_empty());
    assert_eq!(dom.commits().len(), 1);
}

#[test]
fn one_apply_per_event_covers_all_regions() {
    let scene = ScrollScene::new();
    let _a = scene.mount(fade_region("a", "one")).unwrap();
    let _b = scene.mount(fade_region("b", "two")).unwrap();
    let mut dom = MemoryTarget::open();

    scene.on_scroll(at(1000.0), &mut dom);
    assert_eq!(dom.commits().len(), 1);
    assert_eq!(dom.commits()[0].len(), 2);
}

#[test]
fn unmount_stops_writes() {
    let scene = ScrollScene::new();
    let handle = scene.mount(fade_region("r", "box")).unwrap();
    let mut dom = MemoryTarget::open();
    scene.on_scroll(at(900.0), &mut dom);
    let before = dom.writes_to(&TargetId::from("box"));

    drop(handle);
    assert!(!scene.is_mounted("r"));
    scene.on_scroll(at(1200.0), &mut dom);
    scene.on_frame(0.016, &mut dom);
    assert_eq!(dom.writes_to(&TargetId::from("box")), before);
}

#[test]
fn unmount_cancels_step_tweens() {
    let scene = ScrollScene::new();
    let spec = RegionSpec::new("steps", TriggerRegion::document())
        .steps(StepSetSpec::new(["a", "b"]));
    let handle = scene.mount(spec).unwrap();
    let mut dom = MemoryTarget::open();
    scene.on_scroll(ScrollMetrics::new(0.0, 2000.0, 1000.0), &mut dom);
    scene.on_scroll(ScrollMetrics::new(600.0, 2000.0, 1000.0), &mut dom);
    assert!(!scene.is_idle());

    handle.unmount();
    assert!(scene.is_idle());
    let commits = dom.commits().len();
    scene.on_frame(0.1, &mut dom);
    assert_eq!(dom.commits().len(), commits);
}

#[test]
fn failed_mount_registers_nothing() {
    let scene = ScrollScene::new();
    let _ok = scene.mount(fade_region("r", "box")).unwrap();

    assert!(scene.mount(fade_region("r", "other")).is_err());
    assert!(scene.mount(fade_region("s", "box")).is_err());
    let bad = fade_region("t", "x").scrub(f64::NAN);
    assert!(scene.mount(bad).is_err());
    assert_eq!(scene.mounted_ids(), ["r"]);
}

#[test]
fn remount_after_unmount_is_allowed() {
    let scene = ScrollScene::new();
    let h = scene.mount(fade_region("r", "box")).unwrap();
    drop(h);
    assert!(scene.mount(fade_region("r", "box")).is_ok());
}

#[test]
fn missing_targets_are_skipped() {
    let scene = ScrollScene::new();
    let _a = scene.mount(fade_region("a", "present")).unwrap();
    let _b = scene.mount(fade_region("b", "absent")).unwrap();
    let mut dom = MemoryTarget::with_targets(["present"]);

    let report = scene.on_scroll(at(1000.0), &mut dom);
    assert_eq!(report.diff.len(), 1);
    assert_eq!(dom.value("absent", Property::Opacity), None);

    dom.insert_target("absent");
    scene.on_frame(0.0, &mut dom);
    assert_eq!(
        dom.value("absent", Property::Opacity),
        Some(Value::Scalar(0.5))
    );
}

#[test]
fn edge_listeners_run_after_apply() {
    let scene = ScrollScene::new();
    let handle = scene.mount(fade_region("r", "box")).unwrap();
    let seen: Rc<RefCell<Vec<EdgeEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let seen = Rc::clone(&seen);
        handle.on_edge(move |n| seen.borrow_mut().push(n.edge))
    };
    let mut dom = MemoryTarget::open();

    scene.on_scroll(at(0.0), &mut dom);
    scene.on_scroll(at(600.0), &mut dom);
    scene.on_scroll(at(700.0), &mut dom);
    scene.on_scroll(at(1600.0), &mut dom);
    scene.on_scroll(at(1400.0), &mut dom);
    assert_eq!(
        *seen.borrow(),
        vec![EdgeEvent::Enter, EdgeEvent::Leave, EdgeEvent::EnterBack]
    );
}

#[test]
fn listener_may_unmount_its_own_region() {
    let scene = ScrollScene::new();
    let slot: Rc<RefCell<Option<RegionHandle>>> = Rc::new(RefCell::new(None));
    let handle = scene.mount(fade_region("r", "box")).unwrap();
    let sub = {
        let slot = Rc::clone(&slot);
        handle.on_edge(move |_| {
            slot.borrow_mut().take();
        })
    };
    *slot.borrow_mut() = Some(handle);

    let mut dom = MemoryTarget::open();
    scene.on_scroll(at(600.0), &mut dom);
    assert!(!scene.is_mounted("r"));
    drop(sub);
}

#[test]
fn reset_edge_snaps_steps_to_pending() {
    let scene = ScrollScene::new();
    let spec = RegionSpec::new("steps", TriggerRegion::document())
        .steps(StepSetSpec::new(["a", "b"]))
        .reset_steps_on([EdgeEvent::Leave]);
    let _h = scene.mount(spec).unwrap();
    let mut dom = MemoryTarget::open();

    scene.on_scroll(ScrollMetrics::new(0.0, 2000.0, 1000.0), &mut dom);
    scene.on_scroll(ScrollMetrics::new(500.0, 2000.0, 1000.0), &mut dom);
    scene.on_frame(1.0, &mut dom);
    assert_eq!(dom.value("b", Property::Opacity), Some(Value::Scalar(1.0)));

    scene.on_scroll(ScrollMetrics::new(1500.0, 2000.0, 1000.0), &mut dom);
    scene.on_frame(1.0, &mut dom);
    assert_eq!(dom.value("a", Property::Opacity), Some(Value::Scalar(0.0)));
    assert_eq!(dom.value("b", Property::Opacity), Some(Value::Scalar(0.0)));

    scene.on_scroll(ScrollMetrics::new(900.0, 2000.0, 1000.0), &mut dom);
    scene.on_frame(1.0, &mut dom);
    assert_eq!(dom.value("a", Property::Opacity), Some(Value::Scalar(0.6)));
    assert_eq!(dom.value("b", Property::Opacity), Some(Value::Scalar(1.0)));
}

#[test]
fn scrubbed_region_catches_up_on_frames() {
    let scene = ScrollScene::new();
    let _h = scene.mount(fade_region("r", "box").scrub(1.0)).unwrap();
    let mut dom = MemoryTarget::open();

    scene.on_scroll(at(500.0), &mut dom);
    scene.on_scroll(at(1500.0), &mut dom);
    assert_eq!(scene.progress_of("r"), Some(Progress::START));

    scene.on_frame(0.25, &mut dom);
    let mid = scene.progress_of("r").unwrap().get();
    assert!(mid > 0.0 && mid < 1.0);

    for _ in 0..300 {
        scene.on_frame(0.016, &mut dom);
    }
    assert_eq!(scene.progress_of("r"), Some(Progress::END));
    assert_eq!(dom.value("box", Property::Opacity), Some(Value::Scalar(1.0)));
}

#[test]
fn relayout_is_picked_up_on_next_frame() {
    let scene = ScrollScene::new();
    let _h = scene.mount(fade_region("r", "box")).unwrap();
    let mut dom = MemoryTarget::open();
    scene.on_scroll(at(1000.0), &mut dom);

    assert!(scene.set_element_box("r", ElementBox::new(500.0, 500.0)));
    scene.on_frame(0.0, &mut dom);
    assert_eq!(scene.progress_of("r"), Some(Progress::END));
    assert!(!scene.set_element_box("nope", ElementBox::new(0.0, 0.0)));
}

#[test]
fn played_timeline_runs_to_completion() {
    let scene = ScrollScene::new();
    let tl = Timeline::builder()
        .push(
            TimelineStep::new("title", Property::Opacity, 0.0, 1.0, 1.0).ease(Ease::OutCubic),
            Position::After,
        )
        .build()
        .unwrap();
    let run = scene.play(tl);
    let mut dom = MemoryTarget::open();

    scene.on_frame(0.0, &mut dom);
    assert_eq!(dom.value("title", Property::Opacity), Some(Value::Scalar(0.0)));
    scene.on_frame(0.5, &mut dom);
    scene.on_frame(0.6, &mut dom);
    assert_eq!(dom.value("title", Property::Opacity), Some(Value::Scalar(1.0)));
    assert!(scene.is_idle());
    assert!(!run.is_playing());
}

#[test]
fn sample_region_settles_step_styles() {
    let spec = RegionSpec::new("steps", TriggerRegion::document())
        .steps(StepSetSpec::new(["a", "b"]));
    let frame = sample_region(&spec, Progress::new(0.75)).unwrap();
    assert_eq!(
        frame.get(&TargetId::from("a"), Property::Opacity),
        Some(Value::Scalar(0.6))
    );
    assert_eq!(
        frame.get(&TargetId::from("b"), Property::Opacity),
        Some(Value::Scalar(1.0))
    );
}

#[test]
fn missing_targets_lists_absent_elements() {
    let spec = fade_region("r", "box");
    let dom = MemoryTarget::with_targets(["other"]);
    let missing = missing_targets([&spec], &dom);
    assert!(missing.contains(&TargetId::from("box")));
}

fn linear(target: &str, property: Property, secs: f64) -> TimelineStep {
    TimelineStep::new(target, property, 0.0, 1.0, secs)
}

fn opacity_of(dom: &MemoryTarget, target: &str) -> f64 {
    dom.value(target, Property::Opacity)
        .and_then(|v| v.as_scalar())
        .unwrap()
}

#[test]
fn unmounting_a_region_stops_timelines_on_its_targets() {
    let scene = ScrollScene::new();
    let handle = scene.mount(fade_region("r", "box")).unwrap();
    let tl = Timeline::builder()
        .push_all(
            [linear("box", Property::Scale, 1.0), linear("other", Property::Opacity, 1.0)],
            Position::After,
        )
        .build()
        .unwrap();
    let _run = scene.play(tl);
    let mut dom = MemoryTarget::open();
    scene.on_scroll(at(900.0), &mut dom);
    scene.on_frame(0.25, &mut dom);
    let box_writes = dom.writes_to(&TargetId::from("box"));
    let other = opacity_of(&dom, "other");

    drop(handle);
    scene.on_frame(0.25, &mut dom);
    scene.on_frame(0.25, &mut dom);
    assert_eq!(dom.writes_to(&TargetId::from("box")), box_writes);
    assert!(opacity_of(&dom, "other") > other);
}

#[test]
fn dropping_a_playback_cancels_it() {
    let scene = ScrollScene::new();
    let tl = Timeline::builder()
        .push(linear("title", Property::Opacity, 1.0), Position::After)
        .build()
        .unwrap();
    let run = scene.play(tl);
    let mut dom = MemoryTarget::open();
    scene.on_frame(0.5, &mut dom);
    assert!(run.is_playing());
    assert_eq!(opacity_of(&dom, "title"), 0.5);

    drop(run);
    assert!(scene.is_idle());
    let commits = dom.commits().len();
    scene.on_frame(0.25, &mut dom);
    assert_eq!(dom.commits().len(), commits);
    assert_eq!(opacity_of(&dom, "title"), 0.5);
}

#[test]
fn detached_playback_runs_to_the_end() {
    let scene = ScrollScene::new();
    let tl = Timeline::builder()
        .push(linear("title", Property::Opacity, 1.0), Position::After)
        .build()
        .unwrap();
    scene.play(tl).detach();
    let mut dom = MemoryTarget::open();
    scene.on_frame(0.5, &mut dom);
    scene.on_frame(0.6, &mut dom);
    assert_eq!(opacity_of(&dom, "title"), 1.0);
    assert!(scene.is_idle());
}

#[test]
fn newer_timeline_takes_over_shared_properties() {
    let scene = ScrollScene::new();
    let slow = Timeline::builder()
        .push_all(
            [linear("card", Property::Opacity, 2.0), linear("ring", Property::Scale, 2.0)],
            Position::After,
        )
        .build()
        .unwrap();
    let quick = Timeline::builder()
        .push(linear("card", Property::Opacity, 0.5), Position::After)
        .build()
        .unwrap();
    let _first = scene.play(slow);
    let mut dom = MemoryTarget::open();
    scene.on_frame(0.2, &mut dom);

    let _second = scene.play(quick);
    scene.on_frame(0.0, &mut dom);
    assert_eq!(opacity_of(&dom, "card"), 0.0);
    // Once the second timeline finishes, the first must not pull the card back down.
    let mut finished = false;
    for _ in 0..20 {
        scene.on_frame(0.1, &mut dom);
        let card = opacity_of(&dom, "card");
        if finished {
            assert_eq!(card, 1.0);
        }
        finished |= card == 1.0;
    }
    assert!(finished);
    assert_eq!(
        dom.value("ring", Property::Scale).and_then(|v| v.as_scalar()),
        Some(1.0)
    );
}

#[test]
fn frames_before_the_first_scroll_do_not_pin_scrub() {
    let scene = ScrollScene::new();
    let spec = RegionSpec::new("page", TriggerRegion::document())
        .bindings(
            BindingTable::builder()
                .bind(Binding::new("bar", Property::Opacity, 0.0, 1.0))
                .build()
                .unwrap(),
        )
        .scrub(1.0);
    let _h = scene.mount(spec).unwrap();
    let mut dom = MemoryTarget::open();

    let report = scene.on_frame(1.0 / 60.0, &mut dom);
    assert!(report.diff.is_empty());
    assert!(report.edges.is_empty());

    scene.on_scroll(ScrollMetrics::new(500.0, 2000.0, 1000.0), &mut dom);
    assert_eq!(scene.progress_of("page"), Some(Progress::new(0.5)));
    assert_eq!(dom.value("bar", Property::Opacity), Some(Value::Scalar(0.5)));
}

#[test]
fn returning_targets_are_written_again() {
    let scene = ScrollScene::new();
    let _h = scene.mount(fade_region("r", "box")).unwrap();
    let mut dom = MemoryTarget::with_targets(["box"]);
    scene.on_scroll(at(900.0), &mut dom);
    assert_eq!(dom.value("box", Property::Opacity), Some(Value::Scalar(0.4)));

    dom.remove_target(&TargetId::from("box"));
    scene.on_scroll(at(900.0), &mut dom);
    assert_eq!(dom.value("box", Property::Opacity), None);

    dom.insert_target("box");
    let report = scene.on_scroll(at(900.0), &mut dom);
    assert_eq!(report.diff.len(), 1);
    assert_eq!(dom.value("box", Property::Opacity), Some(Value::Scalar(0.4)));
}

#[test]
fn cues_are_reported_once_when_reached() {
    let scene = ScrollScene::new();
    let tl = Timeline::builder()
        .push(linear("quote", Property::Opacity, 1.0), Position::After)
        .call("swap", Position::At(0.5))
        .build()
        .unwrap();
    let _run = scene.play(tl);
    let mut dom = MemoryTarget::open();
    assert!(scene.on_frame(0.25, &mut dom).cues.is_empty());
    assert_eq!(scene.on_frame(0.3, &mut dom).cues, ["swap"]);
    assert!(scene.on_frame(0.3, &mut dom).cues.is_empty());
}

#[test]
fn clips_play_on_enter_and_reverse_on_leave_back() {
    let scene = ScrollScene::new();
    let words = Timeline::builder()
        .push(linear("word", Property::Opacity, 1.0), Position::After)
        .build()
        .unwrap();
    let spec = RegionSpec::new("words", TriggerRegion::parse("top bottom", "bottom top").unwrap())
        .element(1000.0, 500.0)
        .clip(words, ToggleActions::PLAY_REVERSE);
    let _h = scene.mount(spec).unwrap();
    let mut dom = MemoryTarget::open();

    scene.on_scroll(at(0.0), &mut dom);
    assert_eq!(opacity_of(&dom, "word"), 0.0);
    assert!(scene.is_idle());

    scene.on_scroll(at(900.0), &mut dom);
    assert!(!scene.is_idle());
    scene.on_frame(0.5, &mut dom);
    assert_eq!(opacity_of(&dom, "word"), 0.5);
    scene.on_frame(1.0, &mut dom);
    assert_eq!(opacity_of(&dom, "word"), 1.0);
    assert!(scene.is_idle());

    scene.on_scroll(at(0.0), &mut dom);
    scene.on_frame(0.25, &mut dom);
    assert_eq!(opacity_of(&dom, "word"), 0.75);
    scene.on_frame(1.0, &mut dom);
    assert_eq!(opacity_of(&dom, "word"), 0.0);
}
