use std::fmt;
use std::str::FromStr;

use crate::animation::timeline::Timeline;
use crate::eval::diff::StyleFrame;
use crate::foundation::error::ScrublineError;
use crate::scroll::source::EdgeEvent;

/// What an edge crossing does to a region's clip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClipAction {
    #[default]
    None,
    /// Run forward from the current position.
    Play,
    Pause,
    /// Continue in the last direction played.
    Resume,
    /// Run backward from the current position.
    Reverse,
    /// Jump to the start and stop.
    Reset,
    /// Jump to the start and run forward.
    Restart,
    /// Jump to the end and stop.
    Complete,
}

impl FromStr for ClipAction {
    type Err = ScrublineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => Self::None,
            "play" => Self::Play,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "reverse" => Self::Reverse,
            "reset" => Self::Reset,
            "restart" => Self::Restart,
            "complete" => Self::Complete,
            _ => {
                return Err(ScrublineError::trigger(format!(
                    "unknown clip action '{s}'"
                )));
            }
        })
    }
}

impl fmt::Display for ClipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Reverse => "reverse",
            Self::Reset => "reset",
            Self::Restart => "restart",
            Self::Complete => "complete",
        })
    }
}

/// One [`ClipAction`] per edge, written `"<enter> <leave> <enter-back> <leave-back>"`
/// (`"play none none reverse"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToggleActions {
    pub on_enter: ClipAction,
    pub on_leave: ClipAction,
    pub on_enter_back: ClipAction,
    pub on_leave_back: ClipAction,
}

impl ToggleActions {
    /// Play on enter, reverse when scrolled back above the start.
    pub const PLAY_REVERSE: Self = Self {
        on_enter: ClipAction::Play,
        on_leave: ClipAction::None,
        on_enter_back: ClipAction::None,
        on_leave_back: ClipAction::Reverse,
    };

    pub fn for_edge(&self, edge: EdgeEvent) -> ClipAction {
        match edge {
            EdgeEvent::Enter => self.on_enter,
            EdgeEvent::Leave => self.on_leave,
            EdgeEvent::EnterBack => self.on_enter_back,
            EdgeEvent::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = ScrublineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [enter, leave, enter_back, leave_back] = parts[..] else {
            return Err(ScrublineError::trigger(format!(
                "toggle actions '{s}' must name four actions"
            )));
        };
        Ok(Self {
            on_enter: enter.parse()?,
            on_leave: leave.parse()?,
            on_enter_back: enter_back.parse()?,
            on_leave_back: leave_back.parse()?,
        })
    }
}

impl fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.on_enter, self.on_leave, self.on_enter_back, self.on_leave_back
        )
    }
}

impl TryFrom<String> for ToggleActions {
    type Error = ScrublineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ToggleActions> for String {
    fn from(t: ToggleActions) -> Self {
        t.to_string()
    }
}

/// A timeline owned by a region and played by its edge crossings instead of its progress.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClipSpec {
    pub timeline: Timeline,
    pub actions: ToggleActions,
}

impl ClipSpec {
    pub fn new(timeline: Timeline, actions: ToggleActions) -> Self {
        Self { timeline, actions }
    }
}

/// Playback state of one mounted clip.
///
/// The clip always writes its timeline at the current position, so before the first edge it
/// shows the timeline's starting values.
#[derive(Clone, Debug)]
pub struct ClipPlayer {
    spec: ClipSpec,
    position_secs: f64,
    rate: f64,
    last_rate: f64,
}

impl ClipPlayer {
    pub fn new(spec: ClipSpec) -> Self {
        Self {
            spec,
            position_secs: 0.0,
            rate: 0.0,
            last_rate: 1.0,
        }
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn is_playing(&self) -> bool {
        self.rate != 0.0
    }

    pub fn on_edge(&mut self, edge: EdgeEvent) {
        let duration = self.spec.timeline.duration_secs();
        match self.spec.actions.for_edge(edge) {
            ClipAction::None => {}
            ClipAction::Play => self.run(1.0),
            ClipAction::Pause => self.rate = 0.0,
            ClipAction::Resume => self.run(self.last_rate),
            ClipAction::Reverse => self.run(-1.0),
            ClipAction::Reset => {
                self.position_secs = 0.0;
                self.rate = 0.0;
            }
            ClipAction::Restart => {
                self.position_secs = 0.0;
                self.run(1.0);
            }
            ClipAction::Complete => {
                self.position_secs = duration;
                self.rate = 0.0;
            }
        }
    }

    fn run(&mut self, rate: f64) {
        self.rate = rate;
        self.last_rate = rate;
        self.stop_at_bounds();
    }

    fn stop_at_bounds(&mut self) {
        let duration = self.spec.timeline.duration_secs();
        if (self.rate > 0.0 && self.position_secs >= duration)
            || (self.rate < 0.0 && self.position_secs <= 0.0)
        {
            self.rate = 0.0;
        }
    }

    pub fn advance(&mut self, dt_secs: f64) {
        if self.rate == 0.0 {
            return;
        }
        let duration = self.spec.timeline.duration_secs();
        self.position_secs = (self.position_secs + self.rate * dt_secs).clamp(0.0, duration);
        self.stop_at_bounds();
    }

    pub fn sample_into(&self, out: &mut StyleFrame) {
        out.merge(self.spec.timeline.sample(self.position_secs));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/clip.rs"]
mod tests;
