use crate::animation::ease::Ease;
use crate::animation::value::{Lerp, Property, Value};
use crate::foundation::core::{Progress, TargetId};
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Sub-range `[start, end]` of region progress over which a binding animates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressRange {
    pub start: f64,
    pub end: f64,
}

impl Default for ProgressRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl ProgressRange {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    pub fn new(start: f64, end: f64) -> ScrublineResult<Self> {
        let r = Self { start, end };
        r.validate()?;
        Ok(r)
    }

    pub fn validate(self) -> ScrublineResult<()> {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(ScrublineError::validation("progress range must be finite"));
        }
        if self.start < 0.0 || self.end > 1.0 {
            return Err(ScrublineError::validation(format!(
                "progress range [{}, {}] must lie inside [0, 1]",
                self.start, self.end
            )));
        }
        if self.start >= self.end {
            return Err(ScrublineError::validation(format!(
                "progress range start {} must be < end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    pub fn contains(self, p: f64) -> bool {
        self.start <= p && p <= self.end
    }

    /// Half-open overlap test; ranges that only touch do not overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Position of `p` inside this range, clamped to `[0, 1]`.
    pub fn local_t(self, p: f64) -> f64 {
        if p <= self.start {
            return 0.0;
        }
        if p >= self.end {
            return 1.0;
        }
        ((p - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// One declarative rule: over `range`, `property` of `target` moves from `from` to `to`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Binding {
    pub target: TargetId,
    pub property: Property,
    pub from: Value,
    pub to: Value,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub range: ProgressRange,
}

impl Binding {
    /// Linear binding over the full progress range.
    pub fn new(
        target: impl Into<TargetId>,
        property: Property,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Self {
            target: target.into(),
            property,
            from: from.into(),
            to: to.into(),
            ease: Ease::Linear,
            range: ProgressRange::FULL,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Restrict the binding to `[start, end]`. Checked when the table is built.
    pub fn range(mut self, start: f64, end: f64) -> Self {
        self.range = ProgressRange { start, end };
        self
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        self.range.validate().map_err(|e| {
            ScrublineError::validation(format!("binding {}.{}: {e}", self.target, self.property))
        })?;
        let want = self.property.kind();
        if self.from.kind() != want || self.to.kind() != want {
            return Err(ScrublineError::validation(format!(
                "binding {}.{} expects {:?} values, got {:?} -> {:?}",
                self.target,
                self.property,
                want,
                self.from.kind(),
                self.to.kind()
            )));
        }
        if !(self.from.is_finite() && self.to.is_finite()) {
            return Err(ScrublineError::validation(format!(
                "binding {}.{} has non-finite endpoints",
                self.target, self.property
            )));
        }
        Ok(())
    }

    /// Value at region progress `p`, clamped to the boundary values outside `range`.
    pub fn sample(&self, p: Progress) -> Value {
        let t = self.range.local_t(p.get());
        Value::lerp(&self.from, &self.to, self.ease.apply(t))
    }
}

/// All bindings for one `(target, property)` pair, ordered by range start.
#[derive(Clone, Debug)]
struct Channel {
    target: TargetId,
    property: Property,
    members: Vec<usize>,
}

/// Immutable, validated set of bindings.
///
/// Several bindings may drive the same `(target, property)` pair as long as their ranges do not
/// overlap. At progress `p` the governing binding is the last one whose range starts at or before
/// `p` (the first one before any range has started); its clamped sample is the channel value.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Binding>", into = "Vec<Binding>")]
pub struct BindingTable {
    bindings: Vec<Binding>,
    channels: Vec<Channel>,
}

impl BindingTable {
    pub fn builder() -> BindingTableBuilder {
        BindingTableBuilder::default()
    }

    pub fn new(bindings: Vec<Binding>) -> ScrublineResult<Self> {
        for b in &bindings {
            b.validate()?;
        }

        let channels = group_channels(&bindings);
        for c in &channels {
            for w in c.members.windows(2) {
                let (a, b) = (&bindings[w[0]], &bindings[w[1]]);
                if a.range.overlaps(b.range) {
                    return Err(ScrublineError::validation(format!(
                        "bindings on {}.{} overlap: [{}, {}] and [{}, {}]",
                        c.target,
                        c.property,
                        a.range.start,
                        a.range.end,
                        b.range.start,
                        b.range.end
                    )));
                }
            }
        }

        Ok(Self { bindings, channels })
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// Distinct targets referenced by this table, in first-declaration order.
    pub fn targets(&self) -> Vec<&TargetId> {
        let mut out: Vec<&TargetId> = Vec::new();
        for c in &self.channels {
            if !out.contains(&&c.target) {
                out.push(&c.target);
            }
        }
        out
    }

    /// Every `(target, property)` pair this table drives.
    pub fn channels(&self) -> impl Iterator<Item = (&TargetId, Property)> {
        self.channels.iter().map(|c| (&c.target, c.property))
    }

    /// Drop every channel for which `keep` returns false.
    pub fn retain_channels(&mut self, mut keep: impl FnMut(&TargetId, Property) -> bool) {
        self.bindings.retain(|b| keep(&b.target, b.property));
        self.channels = group_channels(&self.bindings);
    }

    /// Governing binding of every channel at `p`.
    pub(crate) fn governing(&self, p: Progress) -> impl Iterator<Item = &Binding> + '_ {
        let pv = p.get();
        self.channels.iter().filter_map(move |c| {
            let idx = c
                .members
                .partition_point(|&m| self.bindings[m].range.start <= pv);
            let pick = if idx == 0 { 0 } else { idx - 1 };
            c.members.get(pick).map(|&m| &self.bindings[m])
        })
    }
}

fn group_channels(bindings: &[Binding]) -> Vec<Channel> {
    let mut channels: Vec<Channel> = Vec::new();
    for (i, b) in bindings.iter().enumerate() {
        match channels
            .iter_mut()
            .find(|c| c.target == b.target && c.property == b.property)
        {
            Some(c) => c.members.push(i),
            None => channels.push(Channel {
                target: b.target.clone(),
                property: b.property,
                members: vec![i],
            }),
        }
    }
    for c in &mut channels {
        c.members.sort_by(|&a, &b| {
            bindings[a]
                .range
                .start
                .total_cmp(&bindings[b].range.start)
        });
    }
    channels
}

impl TryFrom<Vec<Binding>> for BindingTable {
    type Error = ScrublineError;

    fn try_from(bindings: Vec<Binding>) -> Result<Self, Self::Error> {
        Self::new(bindings)
    }
}

impl From<BindingTable> for Vec<Binding> {
    fn from(t: BindingTable) -> Self {
        t.bindings
    }
}

/// Builder for [`BindingTable`].
#[derive(Debug, Default)]
pub struct BindingTableBuilder {
    bindings: Vec<Binding>,
}

impl BindingTableBuilder {
    pub fn bind(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn extend(mut self, bindings: impl IntoIterator<Item = Binding>) -> Self {
        self.bindings.extend(bindings);
        self
    }

    /// Validate and freeze the table.
    pub fn build(self) -> ScrublineResult<BindingTable> {
        BindingTable::new(self.bindings)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/binding.rs"]
mod tests;
