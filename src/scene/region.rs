use std::collections::BTreeSet;

use crate::animation::binding::BindingTable;
use crate::animation::timeline::Timeline;
use crate::animation::value::Property;
use crate::eval::steps::{MarkerStyles, StepStyles, StepTrack};
use crate::foundation::core::TargetId;
use crate::foundation::error::{ScrublineError, ScrublineResult};
use crate::scene::clip::{ClipSpec, ToggleActions};
use crate::scroll::source::EdgeEvent;
use crate::scroll::trigger::{Observed, TriggerRegion};

/// A step-indexed sequence driven by a region's progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepSetSpec {
    pub targets: Vec<TargetId>,
    #[serde(default)]
    pub markers: Vec<TargetId>,
    #[serde(default)]
    pub styles: StepStyles,
    #[serde(default)]
    pub marker_styles: MarkerStyles,
}

impl StepSetSpec {
    pub fn new(targets: impl IntoIterator<Item = impl Into<TargetId>>) -> Self {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            markers: Vec::new(),
            styles: StepStyles::default(),
            marker_styles: MarkerStyles::default(),
        }
    }

    pub fn markers(mut self, markers: impl IntoIterator<Item = impl Into<TargetId>>) -> Self {
        self.markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn styles(mut self, styles: StepStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Every target this step set writes to: items first, then markers.
    pub fn all_targets(&self) -> impl Iterator<Item = &TargetId> {
        self.targets.iter().chain(self.markers.iter())
    }

    pub(crate) fn to_track(&self) -> ScrublineResult<StepTrack> {
        StepTrack::new(
            self.targets.clone(),
            self.markers.clone(),
            self.styles.clone(),
            self.marker_styles.clone(),
        )
    }
}

/// Everything needed to mount one animated region.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionSpec {
    pub id: String,
    pub trigger: TriggerRegion,
    #[serde(default)]
    pub element: Observed,
    #[serde(default)]
    pub bindings: BindingTable,
    /// Catch-up lag for displayed progress; 0 follows scroll exactly.
    #[serde(default)]
    pub scrub_secs: f64,
    /// Step sets driven by the same progress, each with its own styles.
    #[serde(default)]
    pub steps: Vec<StepSetSpec>,
    /// Edges that snap every step set back to its pending state.
    #[serde(default)]
    pub reset_steps_on: Vec<EdgeEvent>,
    /// Timelines played by edge crossings.
    #[serde(default)]
    pub clips: Vec<ClipSpec>,
}

impl RegionSpec {
    pub fn new(id: impl Into<String>, trigger: TriggerRegion) -> Self {
        Self {
            id: id.into(),
            trigger,
            element: Observed::Document,
            bindings: BindingTable::default(),
            scrub_secs: 0.0,
            steps: Vec::new(),
            reset_steps_on: Vec::new(),
            clips: Vec::new(),
        }
    }

    pub fn element(mut self, top: f64, height: f64) -> Self {
        self.element = Observed::Element { top, height };
        self
    }

    pub fn bindings(mut self, bindings: BindingTable) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn scrub(mut self, lag_secs: f64) -> Self {
        self.scrub_secs = lag_secs;
        self
    }

    /// Add a step set.
    pub fn steps(mut self, steps: StepSetSpec) -> Self {
        self.steps.push(steps);
        self
    }

    pub fn reset_steps_on(mut self, edges: impl IntoIterator<Item = EdgeEvent>) -> Self {
        self.reset_steps_on = edges.into_iter().collect();
        self
    }

    /// Add a timeline that edge crossings play according to `actions`.
    pub fn clip(mut self, timeline: Timeline, actions: ToggleActions) -> Self {
        self.clips.push(ClipSpec::new(timeline, actions));
        self
    }

    /// Every target written by this region, each once.
    pub fn targets(&self) -> Vec<TargetId> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        let from_steps = self.steps.iter().flat_map(|s| s.all_targets());
        let from_clips = self
            .clips
            .iter()
            .flat_map(|c| c.timeline.channels().map(|(t, _)| t));
        for t in self
            .bindings
            .targets()
            .into_iter()
            .chain(from_steps)
            .chain(from_clips)
        {
            if seen.insert(t.clone()) {
                out.push(t.clone());
            }
        }
        out
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        if self.id.trim().is_empty() {
            return Err(ScrublineError::validation("region id must be non-empty"));
        }
        if !self.scrub_secs.is_finite() || self.scrub_secs < 0.0 {
            return Err(ScrublineError::in_region(
                &self.id,
                "scrub_secs must be finite and >= 0",
            ));
        }
        if let Observed::Element { top, height } = self.element
            && !(top.is_finite() && height.is_finite() && height >= 0.0)
        {
            return Err(ScrublineError::in_region(
                &self.id,
                "element box must be finite with non-negative height",
            ));
        }
        let mut channels: BTreeSet<(&TargetId, Property)> = self.bindings.channels().collect();
        for clip in &self.clips {
            for ch in clip.timeline.channels() {
                if !channels.insert(ch) {
                    return Err(ScrublineError::in_region(
                        &self.id,
                        format_args!("{}.{} is driven by more than one clip or binding", ch.0, ch.1),
                    ));
                }
            }
        }
        let mut step_targets: BTreeSet<&TargetId> = BTreeSet::new();
        for steps in &self.steps {
            steps.to_track()?;
            for t in steps.all_targets() {
                if !step_targets.insert(t) {
                    return Err(ScrublineError::in_region(
                        &self.id,
                        format_args!("target '{t}' belongs to more than one step set"),
                    ));
                }
                if channels.iter().any(|(c, _)| *c == t) {
                    return Err(ScrublineError::in_region(
                        &self.id,
                        format_args!(
                            "target '{t}' is driven by both a step set and a binding or clip"
                        ),
                    ));
                }
            }
        }
        if !self.reset_steps_on.is_empty() && self.steps.is_empty() {
            return Err(ScrublineError::in_region(
                &self.id,
                "reset_steps_on requires a step set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/region.rs"]
mod tests;
