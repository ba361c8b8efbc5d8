use super::*;

#[test]
fn events_fire_at_cumulative_delays() {
    let mut seq = LandingSequence::new(LandingTuning::default());
    assert!(seq.advance(0.4).is_empty());
    assert_eq!(seq.phase(), 0);

    assert_eq!(seq.advance(0.2).as_slice(), &[LandingEvent::Phase(1)]);
    assert_eq!(seq.phase(), 1);

    assert!(seq.advance(1.8).is_empty());
    assert_eq!(seq.advance(0.2).as_slice(), &[LandingEvent::Phase(2)]);

    assert!(!seq.ready_signal().is_ready());
    assert_eq!(seq.advance(1.0).as_slice(), &[LandingEvent::Ready]);
    assert!(seq.ready_signal().is_ready());
    assert!(seq.is_complete());
    assert!(seq.advance(10.0).is_empty());
}

#[test]
fn large_step_emits_every_event_once_in_order() {
    let mut seq = LandingSequence::new(LandingTuning::default());
    assert_eq!(
        seq.advance(100.0).as_slice(),
        &[
            LandingEvent::Phase(1),
            LandingEvent::Phase(2),
            LandingEvent::Ready
        ]
    );
    assert_eq!(seq.phase(), 2);
}

#[test]
fn shared_ready_signal_notifies_subscribers() {
    let ready = ReadySignal::new();
    let seen = std::rc::Rc::new(std::cell::Cell::new(false));
    let _sub = {
        let seen = seen.clone();
        ready.subscribe(move || seen.set(true))
    };
    let mut seq = LandingSequence::with_signal(LandingTuning::default(), ready);
    seq.advance(3.4);
    assert!(!seen.get());
    seq.advance(0.2);
    assert!(seen.get());
}

#[test]
fn negative_delay_is_rejected() {
    let t = LandingTuning {
        ready_delay_secs: -1.0,
        ..LandingTuning::default()
    };
    assert!(t.validate().is_err());
}
