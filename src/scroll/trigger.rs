use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{Progress, ScrollMetrics};
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// A point along an element's or the viewport's vertical extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
    /// Percent of the extent from the top edge.
    Percent(f64),
    /// Pixels from the top edge.
    Pixels(f64),
}

impl Anchor {
    /// Distance from the top edge for an extent of `extent` pixels.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => extent * 0.5,
            Self::Bottom => extent,
            Self::Percent(p) => extent * p / 100.0,
            Self::Pixels(px) => px,
        }
    }
}

impl FromStr for Anchor {
    type Err = ScrublineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_num = |n: &str| -> ScrublineResult<f64> {
            let v: f64 = n
                .parse()
                .map_err(|_| ScrublineError::trigger(format!("invalid anchor '{s}'")))?;
            if !v.is_finite() {
                return Err(ScrublineError::trigger(format!("invalid anchor '{s}'")));
            }
            Ok(v)
        };
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => {
                if let Some(n) = s.strip_suffix('%') {
                    Ok(Self::Percent(parse_num(n)?))
                } else if let Some(n) = s.strip_suffix("px") {
                    Ok(Self::Pixels(parse_num(n)?))
                } else {
                    Err(ScrublineError::trigger(format!("invalid anchor '{s}'")))
                }
            }
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Center => f.write_str("center"),
            Self::Bottom => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// "When `element` anchor meets `viewport` anchor", written as `"top bottom"`, `"top 20%"`, ...
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Edge {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl Edge {
    pub fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this edge is crossed.
    pub fn offset(self, element: ElementBox, viewport_height: f64) -> f64 {
        element.top + self.element.resolve(element.height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for Edge {
    type Err = ScrublineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(el), Some(vp), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ScrublineError::trigger(format!(
                "edge '{s}' must be '<element-anchor> <viewport-anchor>'"
            )));
        };
        Ok(Self {
            element: el.parse()?,
            viewport: vp.parse()?,
        })
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

impl TryFrom<String> for Edge {
    type Error = ScrublineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Edge> for String {
    fn from(e: Edge) -> Self {
        e.to_string()
    }
}

/// Vertical placement of the observed element in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Which element a region observes.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observed {
    /// The whole document; its box is derived from the scroll metrics.
    #[default]
    Document,
    Element {
        top: f64,
        height: f64,
    },
}

impl Observed {
    pub fn element_box(self, metrics: &ScrollMetrics) -> ElementBox {
        match self {
            Self::Document => ElementBox::new(0.0, metrics.document_height),
            Self::Element { top, height } => ElementBox::new(top, height),
        }
    }
}

/// Scroll window over which progress runs from 0 to 1. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerRegion {
    pub start: Edge,
    pub end: Edge,
}

impl TriggerRegion {
    pub fn new(start: Edge, end: Edge) -> Self {
        Self { start, end }
    }

    /// Parse both edges, e.g. `TriggerRegion::parse("top 20%", "bottom bottom")`.
    pub fn parse(start: &str, end: &str) -> ScrublineResult<Self> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// Whole scrollable document: `offset / (document_height - viewport_height)` when paired
    /// with [`Observed::Document`].
    pub fn document() -> Self {
        Self {
            start: Edge::new(Anchor::Top, Anchor::Top),
            end: Edge::new(Anchor::Bottom, Anchor::Bottom),
        }
    }

    pub fn resolve(&self, element: ElementBox, viewport_height: f64) -> ResolvedRegion {
        ResolvedRegion {
            start: self.start.offset(element, viewport_height),
            end: self.end.offset(element, viewport_height),
        }
    }
}

/// Where an offset lies relative to a resolved region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Below,
    Inside,
    Past,
}

/// Trigger region in absolute scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedRegion {
    pub start: f64,
    pub end: f64,
}

impl ResolvedRegion {
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    /// `clamp((offset - start) / (end - start), 0, 1)`; degenerate regions step at `start`.
    pub fn progress(&self, offset: f64) -> Progress {
        if self.is_degenerate() {
            return if offset >= self.start {
                Progress::END
            } else {
                Progress::START
            };
        }
        Progress::ratio(offset - self.start, self.end - self.start)
    }

    /// Inclusive on both edges; degenerate regions have no inside.
    pub fn zone(&self, offset: f64) -> Zone {
        if offset < self.start {
            Zone::Below
        } else if self.is_degenerate() || offset > self.end {
            Zone::Past
        } else {
            Zone::Inside
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
