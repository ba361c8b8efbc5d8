use crate::animation::ease::Ease;
use crate::animation::timeline::{Position, Timeline, TimelineStep};
use crate::animation::value::Property;
use crate::foundation::error::ScrublineResult;
use crate::ui::switcher::{Switched, Switcher};

/// Where a card sits relative to the active one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPose {
    /// Offset from the active card, clamped to `-1..=1`.
    pub slot: i32,
    pub translate_x: f64,
    pub depth: f64,
    pub rotation_y: f64,
    pub rotation: f64,
    pub blur: f64,
    pub glow: f64,
}

impl CardPose {
    pub const SPACING: f64 = 200.0;

    /// Pose of the card `offset` places from the active one. Cards further out share the
    /// outermost pose.
    pub fn for_offset(offset: isize) -> Self {
        let slot = offset.clamp(-1, 1) as i32;
        let s = f64::from(slot);
        let center = slot == 0;
        Self {
            slot,
            translate_x: s * Self::SPACING,
            depth: if center { 0.0 } else { -160.0 },
            rotation_y: s * 15.0,
            rotation: s * 10.0,
            blur: if center { 0.0 } else { 0.5 },
            glow: if center { 1.0 } else { 0.3 },
        }
    }
}

/// Fanned 3D card deck. Clicking a card brings it to the center; the others fan out behind it.
#[derive(Clone, Debug)]
pub struct CardDeck<T> {
    cards: Switcher<T>,
}

impl<T> CardDeck<T> {
    pub const MOVE_SECS: f64 = 0.9;
    pub const GLOW_SECS: f64 = 0.6;

    /// The second card starts in front when there is one.
    pub fn new(cards: Vec<T>) -> ScrublineResult<Self> {
        Ok(Self {
            cards: Switcher::starting_at(cards, 1)?,
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn active(&self) -> usize {
        self.cards.index()
    }

    pub fn cards(&self) -> &[T] {
        self.cards.items()
    }

    pub fn select(&mut self, index: usize) -> Option<Switched> {
        self.cards.select(index)
    }

    pub fn pose(&self, index: usize) -> CardPose {
        CardPose::for_offset(offset(index, self.active()))
    }

    /// Stacking order: the active card on top, then outward.
    pub fn z_index(&self, index: usize) -> i32 {
        z_for(index, self.active())
    }

    /// Motion of every card from the layout around `from` to the current one. With
    /// `from == active()` every card holds its pose, which places a freshly mounted deck.
    ///
    /// Cards are `card-N` with glow layers `card-glow-N` (1-based).
    pub fn transition(&self, from: usize) -> ScrublineResult<Timeline> {
        let to = self.active();
        let mut tl = Timeline::builder();
        for i in 0..self.len() {
            let card = format!("card-{}", i + 1);
            let a = CardPose::for_offset(offset(i, from));
            let b = CardPose::for_offset(offset(i, to));
            let pose = |p: Property, from: f64, to: f64| {
                TimelineStep::new(card.as_str(), p, from, to, Self::MOVE_SECS)
                    .ease(Ease::InOutQuart)
            };
            tl = tl.push_all(
                [
                    pose(Property::TranslateX, a.translate_x, b.translate_x),
                    pose(Property::TranslateZ, a.depth, b.depth),
                    pose(Property::RotationY, a.rotation_y, b.rotation_y),
                    pose(Property::Rotation, a.rotation, b.rotation),
                    pose(Property::Blur, a.blur, b.blur),
                    TimelineStep::hold(
                        card.as_str(),
                        Property::ZIndex,
                        f64::from(z_for(i, to)),
                        Self::MOVE_SECS,
                    ),
                    TimelineStep::new(
                        format!("card-glow-{}", i + 1),
                        Property::Opacity,
                        a.glow,
                        b.glow,
                        Self::GLOW_SECS,
                    )
                    .ease(Ease::InOutQuart),
                ],
                Position::At(0.0),
            );
        }
        tl.build()
    }
}

fn offset(index: usize, active: usize) -> isize {
    index as isize - active as isize
}

fn z_for(index: usize, active: usize) -> i32 {
    30 - index.abs_diff(active) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/ui/deck.rs"]
mod tests;
