use super::*;
use crate::foundation::core::TargetId;

fn scalar(tl: &Timeline, secs: f64, target: &str, property: Property) -> Option<f64> {
    tl.sample(secs)
        .get(&TargetId::from(target), property)
        .and_then(|v| v.as_scalar())
}

#[test]
fn only_one_entry_is_open() {
    let mut faq = Accordion::new(5);
    assert_eq!(faq.open_index(), None);
    assert_eq!(
        faq.toggle(1),
        Some(AccordionChange::Opened {
            index: 1,
            closed: None
        })
    );
    assert_eq!(
        faq.toggle(3),
        Some(AccordionChange::Opened {
            index: 3,
            closed: Some(1)
        })
    );
    assert!(faq.is_open(3));
    assert!(!faq.is_open(1));
}

#[test]
fn toggling_the_open_entry_collapses_all() {
    let mut faq = Accordion::new(5);
    faq.toggle(2);
    assert_eq!(faq.toggle(2), Some(AccordionChange::Closed(2)));
    assert_eq!(faq.open_index(), None);
    assert_eq!(faq.collapse(), None);
}

#[test]
fn out_of_range_toggles_are_ignored() {
    let mut faq = Accordion::new(2);
    faq.toggle(0);
    assert_eq!(faq.toggle(2), None);
    assert_eq!(faq.open_index(), Some(0));
    assert!(Accordion::new(0).is_empty());
}

#[test]
fn switching_entries_closes_the_old_panel_while_opening_the_new() {
    let tl = Accordion::transition(AccordionChange::Opened {
        index: 3,
        closed: Some(0),
    })
    .unwrap();
    assert!((tl.duration_secs() - Accordion::TRANSITION_SECS).abs() < 1e-12);

    assert_eq!(scalar(&tl, 0.0, "faq-panel-1", Property::HeightFraction), Some(1.0));
    assert_eq!(scalar(&tl, 0.0, "faq-panel-4", Property::HeightFraction), Some(0.0));
    let end = tl.duration_secs();
    assert_eq!(scalar(&tl, end, "faq-panel-1", Property::HeightFraction), Some(0.0));
    assert_eq!(scalar(&tl, end, "faq-panel-4", Property::HeightFraction), Some(1.0));
    assert_eq!(
        scalar(&tl, end, "faq-icon-4", Property::Rotation),
        Some(Accordion::ICON_OPEN_DEG)
    );
    assert_eq!(scalar(&tl, end, "faq-icon-1", Property::Rotation), Some(0.0));
}

#[test]
fn collapsing_touches_only_the_closed_entry() {
    let tl = Accordion::transition(AccordionChange::Closed(1)).unwrap();
    let end = tl.sample(tl.duration_secs());
    assert_eq!(end.len(), 2);
    assert_eq!(
        scalar(&tl, tl.duration_secs(), "faq-panel-2", Property::HeightFraction),
        Some(0.0)
    );
}
