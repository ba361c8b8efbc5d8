#![forbid(unsafe_code)]

pub mod animation;
pub mod eval;
pub mod foundation;
pub mod model;
pub mod presets;
pub mod scene;
pub mod scroll;
pub mod ui;

pub use animation::binding::{Binding, BindingTable, ProgressRange};
pub use animation::ease::Ease;
pub use animation::timeline::{Cue, Position, Timeline, TimelineStep};
pub use animation::tween::TweenSet;
pub use animation::value::{ClipInset, Property, Value};
pub use eval::diff::{MemoryTarget, RenderTarget, StyleDiff, StyleFrame, StyleWrite};
pub use eval::selector::{StepSequence, StepSnapshot, StepState};
pub use eval::steps::{MarkerStyles, StepStyles, StepTrack};
pub use foundation::core::{Direction, Progress, ScrollMetrics, TargetId};
pub use foundation::error::{ScrublineError, ScrublineResult};
pub use model::choreo::{FrameTick, ModelChoreography, ModelPose, ModelTuning};
pub use model::health::{ModelHealth, ModelViewer};
pub use scene::clip::{ClipAction, ClipSpec, ToggleActions};
pub use scene::config::{SceneConfig, Tuning};
pub use scene::landing::{LandingEvent, LandingSequence, LandingTuning};
pub use scene::region::{RegionSpec, StepSetSpec};
pub use scene::scroll_scene::{EdgeNotice, FrameReport, Playback, RegionHandle, ScrollScene};
pub use scene::signal::{ReadySignal, Signal, Subscription};
pub use scroll::source::{EdgeEvent, Phase, ProgressSource, ProgressState};
pub use scroll::trigger::{ElementBox, Observed, TriggerRegion};
