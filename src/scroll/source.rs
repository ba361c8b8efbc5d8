use smallvec::SmallVec;

use crate::foundation::core::{Direction, Progress, ScrollMetrics};
use crate::scroll::trigger::{ElementBox, Observed, ResolvedRegion, TriggerRegion, Zone};

/// Boundary crossing reported at most once per crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeEvent {
    /// Crossed the start edge scrolling forward.
    Enter,
    /// Crossed the end edge scrolling forward.
    Leave,
    /// Crossed the end edge scrolling backward.
    EnterBack,
    /// Crossed the start edge scrolling backward.
    LeaveBack,
}

/// Per-region lifecycle phase.
///
/// `BelowTrigger -> Entering -> ActiveInRange -> PastTrigger`, reversible by scrolling back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    BelowTrigger,
    /// Inside the region on the tick that crossed into it.
    Entering,
    ActiveInRange,
    PastTrigger,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ProgressState {
    pub value: Progress,
    pub direction: Direction,
    pub phase: Phase,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressUpdate {
    pub state: ProgressState,
    pub edges: SmallVec<[EdgeEvent; 2]>,
}

/// Turns scroll metrics into progress and edge events for one trigger region.
#[derive(Clone, Debug)]
pub struct ProgressSource {
    region: TriggerRegion,
    observed: Observed,
    last_offset: Option<f64>,
    zone: Zone,
    state: ProgressState,
}

impl ProgressSource {
    pub fn new(region: TriggerRegion, observed: Observed) -> Self {
        Self {
            region,
            observed,
            last_offset: None,
            zone: Zone::Below,
            state: ProgressState {
                value: Progress::START,
                direction: Direction::Forward,
                phase: Phase::BelowTrigger,
            },
        }
    }

    pub fn region(&self) -> &TriggerRegion {
        &self.region
    }

    /// Move the observed element after a relayout. Edge state is kept.
    pub fn set_element(&mut self, element: ElementBox) {
        self.observed = Observed::Element {
            top: element.top,
            height: element.height,
        };
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn resolve(&self, metrics: &ScrollMetrics) -> ResolvedRegion {
        self.region.resolve(
            self.observed.element_box(metrics),
            metrics.viewport_height,
        )
    }

    /// Recompute progress for `metrics`.
    ///
    /// Re-observing an offset in the same zone never reports an edge.
    pub fn update(&mut self, metrics: &ScrollMetrics) -> ProgressUpdate {
        let resolved = self.resolve(metrics);
        let offset = metrics.offset;

        let direction = match self.last_offset {
            Some(prev) if offset > prev => Direction::Forward,
            Some(prev) if offset < prev => Direction::Backward,
            _ => self.state.direction,
        };
        self.last_offset = Some(offset);

        let zone = resolved.zone(offset);
        let edges = crossings(self.zone, zone);
        self.zone = zone;

        let phase = match zone {
            Zone::Below => Phase::BelowTrigger,
            Zone::Past => Phase::PastTrigger,
            Zone::Inside => {
                if edges
                    .iter()
                    .any(|e| matches!(e, EdgeEvent::Enter | EdgeEvent::EnterBack))
                {
                    Phase::Entering
                } else {
                    Phase::ActiveInRange
                }
            }
        };

        self.state = ProgressState {
            value: resolved.progress(offset),
            direction,
            phase,
        };
        ProgressUpdate {
            state: self.state,
            edges,
        }
    }
}

/// Edge events for a zone transition. Jumping over the whole region reports both edges.
fn crossings(from: Zone, to: Zone) -> SmallVec<[EdgeEvent; 2]> {
    let mut out = SmallVec::new();
    match (from, to) {
        (Zone::Below, Zone::Inside) => out.push(EdgeEvent::Enter),
        (Zone::Below, Zone::Past) => {
            out.push(EdgeEvent::Enter);
            out.push(EdgeEvent::Leave);
        }
        (Zone::Inside, Zone::Past) => out.push(EdgeEvent::Leave),
        (Zone::Past, Zone::Inside) => out.push(EdgeEvent::EnterBack),
        (Zone::Past, Zone::Below) => {
            out.push(EdgeEvent::EnterBack);
            out.push(EdgeEvent::LeaveBack);
        }
        (Zone::Inside, Zone::Below) => out.push(EdgeEvent::LeaveBack),
        _ => {}
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/source.rs"]
mod tests;
