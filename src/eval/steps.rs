use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::tween::TweenSet;
use crate::animation::value::{ClipInset, Property, Value};
use crate::eval::selector::{StepSnapshot, StepState, marker_visible};
use crate::foundation::core::{Progress, TargetId};
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Property values a step takes on in one state, and how it transitions there.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateStyle {
    pub props: BTreeMap<Property, Value>,
    #[serde(default)]
    pub duration_secs: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl StateStyle {
    pub fn new(duration_secs: f64, ease: Ease) -> Self {
        Self {
            props: BTreeMap::new(),
            duration_secs,
            ease,
        }
    }

    pub fn with(mut self, property: Property, value: impl Into<Value>) -> Self {
        self.props.insert(property, value.into());
        self
    }

    fn validate(&self, what: &str) -> ScrublineResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs >= 0.0) {
            return Err(ScrublineError::validation(format!(
                "{what} style duration must be finite and >= 0"
            )));
        }
        for (p, v) in &self.props {
            if v.kind() != p.kind() {
                return Err(ScrublineError::validation(format!(
                    "{what} style value for {p} has kind {:?}, expected {:?}",
                    v.kind(),
                    p.kind()
                )));
            }
        }
        Ok(())
    }

    fn write(&self, target: &TargetId, tweens: &mut TweenSet, snap: bool) {
        for (&p, &v) in &self.props {
            if snap {
                tweens.set(target, p, v);
            } else {
                tweens.to(target, p, v, self.duration_secs, self.ease);
            }
        }
    }
}

/// Styles for completed, active and pending steps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepStyles {
    pub completed: StateStyle,
    pub active: StateStyle,
    pub pending: StateStyle,
}

impl Default for StepStyles {
    /// Items rise out of the ground when activated and sink back when pending.
    fn default() -> Self {
        Self {
            completed: StateStyle::new(0.3, Ease::OutCubic)
                .with(Property::Opacity, 0.6)
                .with(Property::TranslateY, 0.0)
                .with(Property::ClipPath, ClipInset::open()),
            active: StateStyle::new(0.8, Ease::OutQuart)
                .with(Property::Opacity, 1.0)
                .with(Property::TranslateY, 0.0)
                .with(Property::ClipPath, ClipInset::open()),
            pending: StateStyle::new(0.3, Ease::OutCubic)
                .with(Property::Opacity, 0.0)
                .with(Property::TranslateY, 100.0)
                .with(Property::ClipPath, ClipInset::closed_from_top()),
        }
    }
}

impl StepStyles {
    pub fn for_state(&self, state: StepState) -> &StateStyle {
        match state {
            StepState::Completed => &self.completed,
            StepState::Active => &self.active,
            StepState::Pending => &self.pending,
        }
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        self.completed.validate("completed")?;
        self.active.validate("active")?;
        self.pending.validate("pending")
    }
}

/// Styles for the per-step progress markers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarkerStyles {
    pub visible: StateStyle,
    pub hidden: StateStyle,
}

impl Default for MarkerStyles {
    fn default() -> Self {
        Self {
            visible: StateStyle::new(0.4, Ease::OutCubic)
                .with(Property::Opacity, 1.0)
                .with(Property::Scale, 1.0),
            hidden: StateStyle::new(0.0, Ease::Linear)
                .with(Property::Opacity, 0.0)
                .with(Property::Scale, 0.8),
        }
    }
}

impl MarkerStyles {
    pub fn validate(&self) -> ScrublineResult<()> {
        self.visible.validate("marker visible")?;
        self.hidden.validate("marker hidden")
    }
}

/// Drives the per-item visuals of a step sequence from selector snapshots.
///
/// Only state changes start tweens, so calling [`StepTrack::update`] every frame with the same
/// progress is free. Progress at exactly zero snaps instead of tweening.
#[derive(Clone, Debug)]
pub struct StepTrack {
    targets: Vec<TargetId>,
    markers: Vec<TargetId>,
    styles: StepStyles,
    marker_styles: MarkerStyles,
    shown: Vec<Option<StepState>>,
    markers_shown: Vec<Option<bool>>,
}

impl StepTrack {
    pub fn new(
        targets: Vec<TargetId>,
        markers: Vec<TargetId>,
        styles: StepStyles,
        marker_styles: MarkerStyles,
    ) -> ScrublineResult<Self> {
        if targets.is_empty() {
            return Err(ScrublineError::validation(
                "step track needs at least one target",
            ));
        }
        if !markers.is_empty() && markers.len() != targets.len() {
            return Err(ScrublineError::validation(format!(
                "step track has {} targets but {} markers",
                targets.len(),
                markers.len()
            )));
        }
        styles.validate()?;
        marker_styles.validate()?;
        let shown = vec![None; targets.len()];
        let markers_shown = vec![None; markers.len()];
        Ok(Self {
            targets,
            markers,
            styles,
            marker_styles,
            shown,
            markers_shown,
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Every target this track writes to.
    pub fn all_targets(&self) -> impl Iterator<Item = &TargetId> {
        self.targets.iter().chain(self.markers.iter())
    }

    /// States last pushed to the tween set, `None` before the first update.
    pub fn shown(&self) -> &[Option<StepState>] {
        &self.shown
    }

    pub fn update(&mut self, progress: Progress, tweens: &mut TweenSet) -> Option<StepSnapshot> {
        let n = self.targets.len();
        let snapshot = StepSnapshot::at(progress, n)?;
        let snap = progress.is_start();

        for (i, target) in self.targets.iter().enumerate() {
            let state = snapshot.states[i];
            if self.shown[i] == Some(state) {
                continue;
            }
            self.styles.for_state(state).write(target, tweens, snap);
            self.shown[i] = Some(state);
        }

        for (i, marker) in self.markers.iter().enumerate() {
            let visible = marker_visible(progress, i, n);
            if self.markers_shown[i] == Some(visible) {
                continue;
            }
            let style = if visible {
                &self.marker_styles.visible
            } else {
                &self.marker_styles.hidden
            };
            style.write(marker, tweens, snap);
            self.markers_shown[i] = Some(visible);
        }

        Some(snapshot)
    }

    /// Snap every item to pending and every marker to hidden.
    pub fn reset(&mut self, tweens: &mut TweenSet) {
        for target in &self.targets {
            self.styles.pending.write(target, tweens, true);
        }
        for marker in &self.markers {
            self.marker_styles.hidden.write(marker, tweens, true);
        }
        self.shown.iter_mut().for_each(|s| *s = Some(StepState::Pending));
        self.markers_shown.iter_mut().for_each(|s| *s = Some(false));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/steps.rs"]
mod tests;
