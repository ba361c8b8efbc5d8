use std::collections::{BTreeMap, BTreeSet};

use crate::animation::value::{Property, Value};
use crate::foundation::core::TargetId;

/// Desired visual state: one value per `(target, property)`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct StyleFrame {
    #[serde(serialize_with = "serialize_entries")]
    values: BTreeMap<(TargetId, Property), Value>,
}

fn serialize_entries<S>(
    values: &BTreeMap<(TargetId, Property), Value>,
    s: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq as _;
    let mut seq = s.serialize_seq(Some(values.len()))?;
    for ((target, property), value) in values {
        seq.serialize_element(&StyleWrite {
            target: target.clone(),
            property: *property,
            value: *value,
        })?;
    }
    seq.end()
}

impl StyleFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, target: TargetId, property: Property, value: Value) {
        self.values.insert((target, property), value);
    }

    pub fn get(&self, target: &TargetId, property: Property) -> Option<Value> {
        self.values.get(&(target.clone(), property)).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TargetId, Property, Value)> {
        self.values.iter().map(|((t, p), v)| (t, *p, *v))
    }

    /// Overlay `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: StyleFrame) {
        self.values.extend(other.values);
    }

    /// Drop every entry for `target`.
    pub fn remove_target(&mut self, target: &TargetId) {
        self.values.retain(|(t, _), _| t != target);
    }

    /// Keep only entries whose target satisfies `keep`.
    pub fn retain_targets(&mut self, mut keep: impl FnMut(&TargetId) -> bool) {
        self.values.retain(|(t, _), _| keep(t));
    }

    /// Writes needed to move a target currently showing `applied` to `self`.
    ///
    /// Entries absent from `self` are left alone: targets keep their last written value.
    pub fn diff(&self, applied: &StyleFrame) -> StyleDiff {
        let writes = self
            .values
            .iter()
            .filter(|(k, v)| applied.values.get(*k) != Some(*v))
            .map(|((target, property), value)| StyleWrite {
                target: target.clone(),
                property: *property,
                value: *value,
            })
            .collect();
        StyleDiff { writes }
    }
}

/// One property write.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StyleWrite {
    pub target: TargetId,
    pub property: Property,
    pub value: Value,
}

/// Ordered writes for one frame. Handed to a [`RenderTarget`] in a single call.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct StyleDiff {
    writes: Vec<StyleWrite>,
}

impl StyleDiff {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn writes(&self) -> &[StyleWrite] {
        &self.writes
    }

    /// Keep only writes whose target satisfies `keep`.
    pub fn retain_targets(&mut self, mut keep: impl FnMut(&TargetId) -> bool) {
        self.writes.retain(|w| keep(&w.target));
    }
}

/// Presentation surface that owns the visual elements.
pub trait RenderTarget {
    /// Whether `target` currently exists. Writes to missing targets are dropped.
    fn contains(&self, target: &TargetId) -> bool;

    /// Apply every write of one frame.
    fn apply(&mut self, diff: &StyleDiff);
}

/// In-memory [`RenderTarget`] that records current state and the commit history.
#[derive(Clone, Debug, Default)]
pub struct MemoryTarget {
    known: Option<BTreeSet<TargetId>>,
    state: StyleFrame,
    commits: Vec<StyleDiff>,
}

impl MemoryTarget {
    /// Accept writes for any target.
    pub fn open() -> Self {
        Self::default()
    }

    /// Accept writes only for the listed targets.
    pub fn with_targets<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        Self {
            known: Some(targets.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn insert_target(&mut self, target: impl Into<TargetId>) {
        if let Some(known) = self.known.as_mut() {
            known.insert(target.into());
        }
    }

    pub fn remove_target(&mut self, target: &TargetId) {
        if let Some(known) = self.known.as_mut() {
            known.remove(target);
        }
        self.state.remove_target(target);
    }

    pub fn state(&self) -> &StyleFrame {
        &self.state
    }

    pub fn value(&self, target: impl Into<TargetId>, property: Property) -> Option<Value> {
        self.state.get(&target.into(), property)
    }

    pub fn commits(&self) -> &[StyleDiff] {
        &self.commits
    }

    /// Total writes ever applied to `target`.
    pub fn writes_to(&self, target: &TargetId) -> usize {
        self.commits
            .iter()
            .flat_map(|c| c.writes())
            .filter(|w| &w.target == target)
            .count()
    }
}

impl RenderTarget for MemoryTarget {
    fn contains(&self, target: &TargetId) -> bool {
        self.known.as_ref().is_none_or(|k| k.contains(target))
    }

    fn apply(&mut self, diff: &StyleDiff) {
        for w in diff.writes() {
            self.state.set(w.target.clone(), w.property, w.value);
        }
        self.commits.push(diff.clone());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/diff.rs"]
mod tests;
