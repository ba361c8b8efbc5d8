use smallvec::SmallVec;

use crate::scene::signal::ReadySignal;

/// Delays between landing phases, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingTuning {
    pub phase1_delay_secs: f64,
    pub phase2_delay_secs: f64,
    pub ready_delay_secs: f64,
}

impl Default for LandingTuning {
    fn default() -> Self {
        Self {
            phase1_delay_secs: 0.5,
            phase2_delay_secs: 2.0,
            ready_delay_secs: 1.0,
        }
    }
}

impl LandingTuning {
    pub fn validate(&self) -> crate::ScrublineResult<()> {
        for (name, v) in [
            ("phase1_delay_secs", self.phase1_delay_secs),
            ("phase2_delay_secs", self.phase2_delay_secs),
            ("ready_delay_secs", self.ready_delay_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(crate::ScrublineError::config(format!(
                    "landing.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingEvent {
    Phase(u8),
    Ready,
}

/// Fixed intro sequence: phase 1, phase 2, then the one-shot ready broadcast.
///
/// Runs to completion once started; each event is emitted exactly once even when a single
/// `advance` spans several delays.
#[derive(Debug)]
pub struct LandingSequence {
    deadlines: [(f64, LandingEvent); 3],
    elapsed: f64,
    next: usize,
    phase: u8,
    ready: ReadySignal,
}

impl LandingSequence {
    pub fn new(tuning: LandingTuning) -> Self {
        Self::with_signal(tuning, ReadySignal::new())
    }

    pub fn with_signal(tuning: LandingTuning, ready: ReadySignal) -> Self {
        let t1 = tuning.phase1_delay_secs;
        let t2 = t1 + tuning.phase2_delay_secs;
        let t3 = t2 + tuning.ready_delay_secs;
        Self {
            deadlines: [
                (t1, LandingEvent::Phase(1)),
                (t2, LandingEvent::Phase(2)),
                (t3, LandingEvent::Ready),
            ],
            elapsed: 0.0,
            next: 0,
            phase: 0,
            ready,
        }
    }

    pub fn ready_signal(&self) -> &ReadySignal {
        &self.ready
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    /// Current landing phase: 0 before phase 1, then 1 or 2.
    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.next == self.deadlines.len()
    }

    pub fn advance(&mut self, dt_secs: f64) -> SmallVec<[LandingEvent; 3]> {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed += dt_secs;
        }
        let mut out = SmallVec::new();
        while let Some(&(at, event)) = self.deadlines.get(self.next) {
            if self.elapsed < at {
                break;
            }
            self.next += 1;
            match event {
                LandingEvent::Phase(n) => {
                    self.phase = n;
                    tracing::debug!(phase = n, "landing phase");
                }
                LandingEvent::Ready => self.ready.fire(),
            }
            out.push(event);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/landing.rs"]
mod tests;
