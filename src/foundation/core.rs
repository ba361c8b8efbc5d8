use std::fmt;

pub use kurbo::Vec2;

/// Normalized progress through a trigger region, always inside `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Progress at the start edge of a region.
    pub const START: Self = Self(0.0);
    /// Progress at the end edge of a region.
    pub const END: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`. `NaN` maps to `0`.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self::START;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// `num / den` clamped into `[0, 1]`.
    ///
    /// A non-positive denominator degenerates to a step at zero: `1` when `num >= 0`, else `0`.
    pub fn ratio(num: f64, den: f64) -> Self {
        if den <= 0.0 {
            return if num >= 0.0 { Self::END } else { Self::START };
        }
        Self::new(num / den)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_start(self) -> bool {
        self.0 == 0.0
    }

    pub fn is_end(self) -> bool {
        self.0 == 1.0
    }
}

impl From<f64> for Progress {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<Progress> for f64 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Scroll direction relative to the previous observation.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Scroll geometry reported by the hosting page on every scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset in pixels.
    pub offset: f64,
    /// Full document height in pixels.
    pub document_height: f64,
    /// Visible viewport height in pixels.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(offset: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            offset,
            document_height,
            viewport_height,
        }
    }

    /// Largest reachable scroll offset.
    pub fn max_offset(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    /// Same geometry scrolled to `offset`.
    pub fn at(self, offset: f64) -> Self {
        Self { offset, ..self }
    }
}

/// Name of a presentation element that receives style writes.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
