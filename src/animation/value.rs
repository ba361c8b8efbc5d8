use std::fmt;

use crate::foundation::core::Vec2;

pub trait Lerp: Sized {
    /// Interpolate from `a` to `b`. `t == 0` must return `a` and `t == 1` must return `b` exactly.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Weighted form keeps both endpoints bit-exact.
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(f64::lerp(&a.x, &b.x, t), f64::lerp(&a.y, &b.y, t))
    }
}

/// `clip-path: inset(top right bottom left)` with every side in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipInset {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ClipInset {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Fully revealed.
    pub fn open() -> Self {
        Self::default()
    }

    /// Hidden by clipping away everything from the bottom edge up.
    pub fn closed_from_bottom() -> Self {
        Self::new(0.0, 0.0, 100.0, 0.0)
    }

    /// Hidden by clipping away everything from the top edge down.
    pub fn closed_from_top() -> Self {
        Self::new(100.0, 0.0, 0.0, 0.0)
    }
}

impl Lerp for ClipInset {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            top: f64::lerp(&a.top, &b.top, t),
            right: f64::lerp(&a.right, &b.right, t),
            bottom: f64::lerp(&a.bottom, &b.bottom, t),
            left: f64::lerp(&a.left, &b.left, t),
        }
    }
}

impl fmt::Display for ClipInset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "inset({}% {}% {}% {}%)",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    Vec2,
    Inset,
}

/// A concrete value for one visual property.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Vec2(Vec2),
    Inset(ClipInset),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Vec2(_) => ValueKind::Vec2,
            Self::Inset(_) => ValueKind::Inset,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Vec2(v) => v.is_finite(),
            Self::Inset(c) => [c.top, c.right, c.bottom, c.left]
                .iter()
                .all(|v| v.is_finite()),
        }
    }
}

impl Lerp for Value {
    /// Mismatched kinds hold `a` until `t` reaches `1`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(f64::lerp(a, b, t)),
            (Self::Vec2(a), Self::Vec2(b)) => Self::Vec2(Vec2::lerp(*a, *b, t)),
            (Self::Inset(a), Self::Inset(b)) => Self::Inset(ClipInset::lerp(a, b, t)),
            _ => {
                if t >= 1.0 {
                    *b
                } else {
                    *a
                }
            }
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<ClipInset> for Value {
    fn from(v: ClipInset) -> Self {
        Self::Inset(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Vec2(v) => write!(f, "({}, {})", v.x, v.y),
            Self::Inset(c) => write!(f, "{c}"),
        }
    }
}

/// Visual property a binding or tween writes to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
    /// Depth offset along the view axis.
    TranslateZ,
    Translate,
    Scale,
    /// Rotation in degrees.
    Rotation,
    /// Rotation around the vertical axis in degrees.
    RotationY,
    ClipPath,
    StrokeDashOffset,
    /// Width as a fraction of the container.
    WidthFraction,
    /// Height as a fraction of the content's natural height.
    HeightFraction,
    EmissiveIntensity,
    /// Gaussian blur radius in pixels.
    Blur,
    /// Stacking order. Written as a float; hosts round it.
    ZIndex,
}

impl Property {
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Translate => ValueKind::Vec2,
            Self::ClipPath => ValueKind::Inset,
            _ => ValueKind::Scalar,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Opacity => "opacity",
            Self::TranslateX => "translate_x",
            Self::TranslateY => "translate_y",
            Self::TranslateZ => "translate_z",
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::RotationY => "rotation_y",
            Self::ClipPath => "clip_path",
            Self::StrokeDashOffset => "stroke_dash_offset",
            Self::WidthFraction => "width_fraction",
            Self::HeightFraction => "height_fraction",
            Self::EmissiveIntensity => "emissive_intensity",
            Self::Blur => "blur",
            Self::ZIndex => "z_index",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
