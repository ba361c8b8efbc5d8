use crate::foundation::core::{Progress, Vec2};
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// `min(floor(p * n), n - 1)`, or `None` for an empty sequence.
///
/// Exact step boundaries (`p == k / n`) select step `k`.
pub fn active_index(progress: Progress, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let i = (progress.get() * n as f64).floor() as usize;
    Some(i.min(n - 1))
}

/// Visual state of one step relative to the active index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    /// Before the active step: dimmed but visible.
    Completed,
    /// Fully emphasized.
    Active,
    /// After the active step: hidden.
    Pending,
}

impl StepState {
    pub fn of(index: usize, active: usize) -> Self {
        use std::cmp::Ordering;
        match index.cmp(&active) {
            Ordering::Less => Self::Completed,
            Ordering::Equal => Self::Active,
            Ordering::Greater => Self::Pending,
        }
    }
}

/// One author-supplied item of a step sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepItem<T> {
    pub index: usize,
    pub content: T,
    /// Placement angle on a circular layout, in degrees (`-90` is the top).
    pub angle_deg: f64,
}

impl<T> StepItem<T> {
    /// Point on a circle of `radius` centered at the origin.
    pub fn position(&self, radius: f64) -> Vec2 {
        let rad = self.angle_deg.to_radians();
        Vec2::new(rad.cos() * radius, rad.sin() * radius)
    }
}

/// Result of selecting at one progress value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StepSnapshot {
    pub active: usize,
    pub states: Vec<StepState>,
}

impl StepSnapshot {
    pub fn at(progress: Progress, n: usize) -> Option<Self> {
        let active = active_index(progress, n)?;
        let states = (0..n).map(|i| StepState::of(i, active)).collect();
        Some(Self { active, states })
    }
}

/// Fixed, ordered, non-empty collection of steps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepSequence<T> {
    items: Vec<StepItem<T>>,
}

impl<T> StepSequence<T> {
    /// Build from `(content, angle_deg)` pairs; indices follow input order.
    pub fn new(items: impl IntoIterator<Item = (T, f64)>) -> ScrublineResult<Self> {
        let items: Vec<StepItem<T>> = items
            .into_iter()
            .enumerate()
            .map(|(index, (content, angle_deg))| StepItem {
                index,
                content,
                angle_deg,
            })
            .collect();
        if items.is_empty() {
            return Err(ScrublineError::validation(
                "step sequence needs at least one item",
            ));
        }
        Ok(Self { items })
    }

    /// Items spread evenly around a circle, starting at the top and going clockwise.
    pub fn evenly_spaced(contents: impl IntoIterator<Item = T>) -> ScrublineResult<Self> {
        let contents: Vec<T> = contents.into_iter().collect();
        let step = 360.0 / contents.len().max(1) as f64;
        Self::new(
            contents
                .into_iter()
                .enumerate()
                .map(|(i, c)| (c, -90.0 + step * i as f64)),
        )
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[StepItem<T>] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&StepItem<T>> {
        self.items.get(index)
    }

    pub fn active_index(&self, progress: Progress) -> usize {
        active_index(progress, self.items.len()).unwrap_or(0)
    }

    pub fn select(&self, progress: Progress) -> StepSnapshot {
        StepSnapshot::at(progress, self.items.len()).unwrap_or(StepSnapshot {
            active: 0,
            states: Vec::new(),
        })
    }

    pub fn active(&self, progress: Progress) -> Option<&StepItem<T>> {
        self.items.get(self.active_index(progress))
    }

    pub fn marker_visible(&self, progress: Progress, index: usize) -> bool {
        marker_visible(progress, index, self.items.len())
    }
}

/// Marker `index` of `n` shows once progress is a tenth of a step past the step's start.
pub fn marker_visible(progress: Progress, index: usize, n: usize) -> bool {
    if n == 0 || index >= n {
        return false;
    }
    let step = 1.0 / n as f64;
    progress.get() >= index as f64 * step + step * 0.1
}

#[cfg(test)]
#[path = "../../tests/unit/eval/selector.rs"]
mod tests;
