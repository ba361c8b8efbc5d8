use crate::foundation::core::Progress;

/// Smooths displayed progress toward raw scroll progress.
///
/// With `lag_secs > 0` the displayed value closes about 98% of the gap within `lag_secs`;
/// with `lag_secs == 0` it follows raw progress exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scrub {
    lag_secs: f64,
    shown: Option<f64>,
}

impl Scrub {
    const SETTLE_EPSILON: f64 = 1e-4;

    pub fn new(lag_secs: f64) -> Self {
        Self {
            lag_secs: if lag_secs.is_finite() {
                lag_secs.max(0.0)
            } else {
                0.0
            },
            shown: None,
        }
    }

    pub fn immediate() -> Self {
        Self::new(0.0)
    }

    pub fn lag_secs(&self) -> f64 {
        self.lag_secs
    }

    /// Advance by `dt_secs` toward `raw` and return the displayed progress.
    pub fn advance(&mut self, raw: Progress, dt_secs: f64) -> Progress {
        let target = raw.get();
        let next = match self.shown {
            None => target,
            Some(_) if self.lag_secs == 0.0 => target,
            Some(cur) => {
                let dt = if dt_secs.is_finite() { dt_secs.max(0.0) } else { 0.0 };
                let alpha = 1.0 - (-4.0 * dt / self.lag_secs).exp();
                let v = cur + (target - cur) * alpha;
                if (target - v).abs() < Self::SETTLE_EPSILON {
                    target
                } else {
                    v
                }
            }
        };
        self.shown = Some(next);
        Progress::new(next)
    }

    /// Jump straight to `p`.
    pub fn snap(&mut self, p: Progress) {
        self.shown = Some(p.get());
    }

    pub fn shown(&self) -> Option<Progress> {
        self.shown.map(Progress::new)
    }

    pub fn is_settled(&self, raw: Progress) -> bool {
        self.shown == Some(raw.get())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/scrub.rs"]
mod tests;
