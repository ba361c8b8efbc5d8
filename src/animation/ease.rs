use std::fmt;
use std::str::FromStr;

use crate::foundation::error::ScrublineError;

/// Easing functions used to map normalized animation progress.
///
/// Serialized by name using the motion-design vocabulary the scene files are authored in
/// (`"linear"`, `"power2.out"`, `"back.out(1.7)"`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in (`power1.in`).
    InQuad,
    /// Quadratic ease-out (`power1.out`).
    OutQuad,
    /// Quadratic ease-in/out (`power1.inOut`).
    InOutQuad,
    /// Cubic ease-in (`power2.in`).
    InCubic,
    /// Cubic ease-out (`power2.out`).
    OutCubic,
    /// Cubic ease-in/out (`power2.inOut`).
    InOutCubic,
    /// Quartic ease-out (`power3.out`).
    OutQuart,
    /// Quartic ease-in/out (`power3.inOut`).
    InOutQuart,
    /// Ease-out that overshoots the target before settling (`back.out(s)`).
    BackOut {
        /// Overshoot amount; `1.70158` is the conventional default.
        overshoot: f64,
    },
}

impl Ease {
    pub const BACK_OUT_DEFAULT: f64 = 1.70158;

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    ///
    /// Endpoints are exact: `apply(0) == 0` and `apply(1) == 1` for every variant.
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::BackOut { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
        }
    }

    /// Whether intermediate values may leave `[0, 1]`.
    pub fn overshoots(self) -> bool {
        matches!(self, Self::BackOut { overshoot } if overshoot > 0.0)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::InQuad => f.write_str("power1.in"),
            Self::OutQuad => f.write_str("power1.out"),
            Self::InOutQuad => f.write_str("power1.inOut"),
            Self::InCubic => f.write_str("power2.in"),
            Self::OutCubic => f.write_str("power2.out"),
            Self::InOutCubic => f.write_str("power2.inOut"),
            Self::OutQuart => f.write_str("power3.out"),
            Self::InOutQuart => f.write_str("power3.inOut"),
            Self::BackOut { overshoot } => write!(f, "back.out({overshoot})"),
        }
    }
}

impl FromStr for Ease {
    type Err = ScrublineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let ease = match s {
            "linear" | "none" => Self::Linear,
            "power1.in" | "quad.in" => Self::InQuad,
            "power1.out" | "quad.out" => Self::OutQuad,
            "power1.inOut" | "quad.inOut" => Self::InOutQuad,
            "power2.in" | "cubic.in" => Self::InCubic,
            "power2.out" | "cubic.out" => Self::OutCubic,
            "power2.inOut" | "cubic.inOut" => Self::InOutCubic,
            "power3.out" | "quart.out" => Self::OutQuart,
            "power3.inOut" | "quart.inOut" => Self::InOutQuart,
            "back.out" => Self::BackOut {
                overshoot: Self::BACK_OUT_DEFAULT,
            },
            _ => {
                let Some(arg) = s
                    .strip_prefix("back.out(")
                    .and_then(|rest| rest.strip_suffix(')'))
                else {
                    return Err(ScrublineError::validation(format!("unknown ease '{s}'")));
                };
                let overshoot: f64 = arg.trim().parse().map_err(|_| {
                    ScrublineError::validation(format!("invalid back.out overshoot '{arg}'"))
                })?;
                if !overshoot.is_finite() {
                    return Err(ScrublineError::validation(
                        "back.out overshoot must be finite",
                    ));
                }
                Self::BackOut { overshoot }
            }
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = ScrublineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ease> for String {
    fn from(e: Ease) -> Self {
        e.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
