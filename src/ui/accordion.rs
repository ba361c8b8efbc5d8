use crate::animation::ease::Ease;
use crate::animation::timeline::{Position, Timeline, TimelineStep};
use crate::animation::value::Property;
use crate::foundation::error::ScrublineResult;

/// Result of a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccordionChange {
    /// `index` opened; `closed` was open before and is now shut.
    Opened { index: usize, closed: Option<usize> },
    /// `index` was open and collapsed, leaving nothing open.
    Closed(usize),
}

/// Single-open accordion (FAQ list). At most one entry is open; toggling it again collapses
/// the list.
#[derive(Clone, Debug)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub const ICON_OPEN_DEG: f64 = 45.0;
    pub const TRANSITION_SECS: f64 = 0.3;

    /// `len` entries, all collapsed.
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) -> Option<AccordionChange> {
        if index >= self.len {
            return None;
        }
        if self.open == Some(index) {
            self.open = None;
            return Some(AccordionChange::Closed(index));
        }
        let closed = self.open.replace(index);
        Some(AccordionChange::Opened { index, closed })
    }

    pub fn collapse(&mut self) -> Option<usize> {
        self.open.take()
    }

    /// Panel and `+` icon motion for `change`. Panels are `faq-panel-N`, icons `faq-icon-N`
    /// (1-based).
    pub fn transition(change: AccordionChange) -> ScrublineResult<Timeline> {
        let (opening, closing) = match change {
            AccordionChange::Opened { index, closed } => (Some(index), closed),
            AccordionChange::Closed(index) => (None, Some(index)),
        };
        let mut tl = Timeline::builder();
        let mut position = Position::At(0.0);
        let moves = closing
            .map(|i| (i, 1.0, 0.0))
            .into_iter()
            .chain(opening.map(|i| (i, 0.0, 1.0)));
        for (i, from, to) in moves {
            tl = tl.push_all(
                [
                    TimelineStep::new(
                        format!("faq-panel-{}", i + 1),
                        Property::HeightFraction,
                        from,
                        to,
                        Self::TRANSITION_SECS,
                    )
                    .ease(Ease::OutCubic),
                    TimelineStep::new(
                        format!("faq-icon-{}", i + 1),
                        Property::Rotation,
                        from * Self::ICON_OPEN_DEG,
                        to * Self::ICON_OPEN_DEG,
                        Self::TRANSITION_SECS,
                    )
                    .ease(Ease::OutCubic),
                ],
                position,
            );
            position = Position::WithPrevious;
        }
        tl.build()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/accordion.rs"]
mod tests;
