use crate::animation::binding::{Binding, BindingTable, ProgressRange};
use crate::animation::ease::Ease;
use crate::animation::value::{Property, Value};
use crate::eval::diff::StyleFrame;
use crate::eval::engine;
use crate::foundation::core::{Progress, TargetId};
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Where a step starts relative to the steps already on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// When the previous step ends.
    After,
    /// `secs` before the previous step ends (never before zero).
    Overlap(f64),
    /// At an absolute time.
    At(f64),
    /// Together with the previously placed step.
    WithPrevious,
}

/// One timed tween on a [`Timeline`].
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep {
    pub target: TargetId,
    pub property: Property,
    pub from: Value,
    pub to: Value,
    pub duration_secs: f64,
    pub ease: Ease,
}

impl TimelineStep {
    pub fn new(
        target: impl Into<TargetId>,
        property: Property,
        from: impl Into<Value>,
        to: impl Into<Value>,
        duration_secs: f64,
    ) -> Self {
        Self {
            target: target.into(),
            property,
            from: from.into(),
            to: to.into(),
            duration_secs,
            ease: Ease::Linear,
        }
    }

    /// Keep `property` at `value` for `duration_secs`.
    pub fn hold(
        target: impl Into<TargetId>,
        property: Property,
        value: impl Into<Value>,
        duration_secs: f64,
    ) -> Self {
        let value = value.into();
        Self::new(target, property, value, value, duration_secs)
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// A named instant on a timeline, reported once when playback reaches it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cue {
    pub name: String,
    pub at_secs: f64,
}

#[derive(Clone, Debug)]
struct Placed {
    step: TimelineStep,
    start: f64,
}

/// Builder for [`Timeline`].
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    placed: Vec<Placed>,
    cues: Vec<Cue>,
    cursor: f64,
    last_start: f64,
}

impl TimelineBuilder {
    fn start_of(&self, position: Position) -> f64 {
        match position {
            Position::After => self.cursor,
            Position::Overlap(secs) => (self.cursor - secs).max(0.0),
            Position::At(secs) => secs.max(0.0),
            Position::WithPrevious => self.last_start,
        }
    }

    pub fn push(mut self, step: TimelineStep, position: Position) -> Self {
        let start = self.start_of(position);
        self.last_start = start;
        self.cursor = self.cursor.max(start + step.duration_secs.max(0.0));
        self.placed.push(Placed { step, start });
        self
    }

    /// Place several property tweens as one: the first with `position`, the rest alongside it.
    pub fn push_all(
        mut self,
        steps: impl IntoIterator<Item = TimelineStep>,
        mut position: Position,
    ) -> Self {
        for step in steps {
            self = self.push(step, position);
            position = Position::WithPrevious;
        }
        self
    }

    /// Add one copy of `template` per target, each starting `each_secs` after the previous.
    ///
    /// The group is placed with `position`.
    pub fn stagger<I, T>(
        mut self,
        targets: I,
        template: &TimelineStep,
        each_secs: f64,
        position: Position,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        let mut targets = targets.into_iter();
        let Some(first) = targets.next() else {
            return self;
        };
        self = self.push(
            TimelineStep {
                target: first.into(),
                ..template.clone()
            },
            position,
        );
        let group_start = self.last_start;
        for (i, t) in targets.enumerate() {
            let at = group_start + each_secs.max(0.0) * (i + 1) as f64;
            self = self.push(
                TimelineStep {
                    target: t.into(),
                    ..template.clone()
                },
                Position::At(at),
            );
        }
        self
    }

    /// Like [`Self::stagger`], but every target gets all of `templates` started together.
    pub fn stagger_all<I, T>(
        mut self,
        targets: I,
        templates: &[TimelineStep],
        each_secs: f64,
        position: Position,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        let retarget = |target: &TargetId| {
            templates
                .iter()
                .map(|s| TimelineStep {
                    target: target.clone(),
                    ..s.clone()
                })
                .collect::<Vec<_>>()
        };
        let mut targets = targets.into_iter().map(Into::into);
        let Some(first) = targets.next() else {
            return self;
        };
        self = self.push_all(retarget(&first), position);
        let group_start = self.last_start;
        for (i, t) in targets.enumerate() {
            let at = group_start + each_secs.max(0.0) * (i + 1) as f64;
            self = self.push_all(retarget(&t), Position::At(at));
        }
        self
    }

    /// Add a cue named `name`. Cues take no time, so the steps after them are placed as if the
    /// cue were absent.
    pub fn call(mut self, name: impl Into<String>, position: Position) -> Self {
        let at_secs = self.start_of(position);
        self.last_start = at_secs;
        self.cues.push(Cue {
            name: name.into(),
            at_secs,
        });
        self
    }

    pub fn build(mut self) -> ScrublineResult<Timeline> {
        let duration = self.cursor;
        if !(duration.is_finite() && duration > 0.0) {
            return Err(ScrublineError::animation(
                "timeline needs a positive total duration",
            ));
        }
        let mut bindings = Vec::with_capacity(self.placed.len());
        for Placed { step, start } in self.placed {
            if step.duration_secs <= 0.0 {
                return Err(ScrublineError::animation(format!(
                    "timeline step on {}.{} needs a positive duration",
                    step.target, step.property
                )));
            }
            let range = ProgressRange {
                start: start / duration,
                end: ((start + step.duration_secs) / duration).min(1.0),
            };
            bindings.push(Binding {
                target: step.target,
                property: step.property,
                from: step.from,
                to: step.to,
                ease: step.ease,
                range,
            });
        }
        if let Some(late) = self.cues.iter().find(|c| c.at_secs > duration) {
            return Err(ScrublineError::animation(format!(
                "cue '{}' at {}s lies past the timeline end ({duration}s)",
                late.name, late.at_secs
            )));
        }
        self.cues.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Ok(Timeline {
            table: BindingTable::new(bindings)?,
            duration_secs: duration,
            cues: self.cues,
        })
    }
}

/// Fixed sequence of overlapping tweens sampled by elapsed time.
///
/// Compiled to a [`BindingTable`] over normalized time, so sampling shares the clamping and
/// boundary rules of scroll bindings.
#[derive(Clone, Debug)]
pub struct Timeline {
    table: BindingTable,
    duration_secs: f64,
    cues: Vec<Cue>,
}

/// Serialized form: bindings over normalized time plus the real length.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct TimelineDoc {
    duration_secs: f64,
    bindings: BindingTable,
    #[serde(default)]
    cues: Vec<Cue>,
}

impl TimelineDoc {
    fn into_timeline(self) -> ScrublineResult<Timeline> {
        let d = self.duration_secs;
        if !(d.is_finite() && d > 0.0) {
            return Err(ScrublineError::animation(
                "timeline duration_secs must be finite and > 0",
            ));
        }
        let mut cues = self.cues;
        if let Some(bad) = cues
            .iter()
            .find(|c| !(c.at_secs.is_finite() && (0.0..=d).contains(&c.at_secs)))
        {
            return Err(ScrublineError::animation(format!(
                "cue '{}' must lie within [0, {d}]",
                bad.name
            )));
        }
        cues.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Ok(Timeline {
            table: self.bindings,
            duration_secs: d,
            cues,
        })
    }
}

impl serde::Serialize for Timeline {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let doc = TimelineDoc {
            duration_secs: self.duration_secs,
            bindings: self.table.clone(),
            cues: self.cues.clone(),
        };
        serde::Serialize::serialize(&doc, s)
    }
}

impl<'de> serde::Deserialize<'de> for Timeline {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        <TimelineDoc as serde::Deserialize>::deserialize(d)?
            .into_timeline()
            .map_err(serde::de::Error::custom)
    }
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::default()
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn progress_at(&self, elapsed_secs: f64) -> Progress {
        Progress::ratio(elapsed_secs, self.duration_secs)
    }

    pub fn sample(&self, elapsed_secs: f64) -> StyleFrame {
        engine::apply(self.progress_at(elapsed_secs), &self.table)
    }

    pub fn is_complete(&self, elapsed_secs: f64) -> bool {
        elapsed_secs >= self.duration_secs
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.table
    }

    /// Cues in time order.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn channels(&self) -> impl Iterator<Item = (&TargetId, Property)> {
        self.table.channels()
    }

    /// Stop writing every channel for which `keep` returns false. Cues are kept.
    pub fn retain_channels(&mut self, keep: impl FnMut(&TargetId, Property) -> bool) {
        self.table.retain_channels(keep);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
