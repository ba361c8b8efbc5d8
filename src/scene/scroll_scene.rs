use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use crate::animation::binding::BindingTable;
use crate::animation::timeline::Timeline;
use crate::animation::tween::TweenSet;
use crate::animation::value::Property;
use crate::eval::diff::{RenderTarget, StyleDiff, StyleFrame};
use crate::eval::engine;
use crate::eval::steps::StepTrack;
use crate::foundation::core::{Progress, ScrollMetrics, TargetId};
use crate::foundation::error::{ScrublineError, ScrublineResult};
use crate::scene::clip::ClipPlayer;
use crate::scene::region::RegionSpec;
use crate::scene::signal::{Signal, Subscription};
use crate::scroll::scrub::Scrub;
use crate::scroll::source::{EdgeEvent, Phase, ProgressSource, ProgressState};
use crate::scroll::trigger::ElementBox;

/// An edge crossing, delivered to the region's edge listeners after the frame is applied.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EdgeNotice {
    pub region: String,
    pub edge: EdgeEvent,
    pub state: ProgressState,
}

/// What one `on_scroll`/`on_frame` call did.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameReport {
    pub edges: Vec<EdgeNotice>,
    /// Names of played timeline cues reached during this call, in order.
    pub cues: Vec<String>,
    pub diff: StyleDiff,
}

struct MountedRegion {
    key: u64,
    id: String,
    source: ProgressSource,
    scrub: Scrub,
    shown: Progress,
    bindings: BindingTable,
    steps: Vec<StepTrack>,
    reset_steps_on: Vec<EdgeEvent>,
    /// Set by a reset edge; steps stay pending while the offset is outside the region.
    steps_parked: bool,
    clips: Vec<ClipPlayer>,
    targets: Vec<TargetId>,
    edges: Signal<EdgeNotice>,
}

struct RunningTimeline {
    key: u64,
    timeline: Timeline,
    elapsed: f64,
    next_cue: usize,
}

#[derive(Default)]
struct SceneInner {
    next_key: u64,
    next_playback: u64,
    regions: Vec<MountedRegion>,
    timelines: Vec<RunningTimeline>,
    tweens: TweenSet,
    applied: StyleFrame,
    metrics: Option<ScrollMetrics>,
}

impl SceneInner {
    fn owner_of(&self, target: &TargetId) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| r.targets.contains(target))
            .map(|r| r.id.as_str())
    }

    fn unmount(&mut self, key: u64) {
        let Some(idx) = self.regions.iter().position(|r| r.key == key) else {
            return;
        };
        let region = self.regions.remove(idx);
        for t in &region.targets {
            self.tweens.cancel_target(t);
            self.applied.remove_target(t);
        }
        for running in &mut self.timelines {
            running
                .timeline
                .retain_channels(|t, _| !region.targets.contains(t));
        }
        tracing::debug!(region = %region.id, targets = region.targets.len(), "unmounted");
    }

    fn cancel_playback(&mut self, key: u64) {
        self.timelines.retain(|r| r.key != key);
    }
}

/// Drives every mounted scroll region from scroll and frame events.
///
/// Each call computes the desired style of all mounted regions, diffs it against what was last
/// written, and hands the whole diff to the [`RenderTarget`] in one `apply` call. Edge listeners
/// run after that, outside of any internal borrow, so they may mount or unmount regions.
#[derive(Clone, Default)]
pub struct ScrollScene {
    inner: Rc<RefCell<SceneInner>>,
}

impl std::fmt::Debug for ScrollScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollScene")
            .field(
                "regions",
                &inner.regions.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            )
            .field("tweens_in_flight", &inner.tweens.in_flight())
            .finish()
    }
}

impl ScrollScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `spec` and start driving it. Nothing is registered when this fails.
    pub fn mount(&self, spec: RegionSpec) -> ScrublineResult<RegionHandle> {
        spec.validate()?;
        let steps = spec
            .steps
            .iter()
            .map(|s| s.to_track())
            .collect::<ScrublineResult<Vec<_>>>()?;
        let targets = spec.targets();

        let mut inner = self.inner.borrow_mut();
        if inner.regions.iter().any(|r| r.id == spec.id) {
            return Err(ScrublineError::validation(format!(
                "region '{}' is already mounted",
                spec.id
            )));
        }
        for t in &targets {
            if let Some(owner) = inner.owner_of(t) {
                return Err(ScrublineError::validation(format!(
                    "target '{t}' of region '{}' is already driven by region '{owner}'",
                    spec.id
                )));
            }
        }

        let key = inner.next_key;
        inner.next_key += 1;
        let edges = Signal::new();
        inner.regions.push(MountedRegion {
            key,
            id: spec.id.clone(),
            source: ProgressSource::new(spec.trigger, spec.element),
            scrub: Scrub::new(spec.scrub_secs),
            shown: Progress::START,
            bindings: spec.bindings,
            steps,
            reset_steps_on: spec.reset_steps_on,
            steps_parked: false,
            clips: spec.clips.into_iter().map(ClipPlayer::new).collect(),
            targets,
            edges: edges.clone(),
        });
        tracing::debug!(region = %spec.id, "mounted");

        Ok(RegionHandle {
            scene: Rc::downgrade(&self.inner),
            key,
            id: spec.id,
            edges,
        })
    }

    /// Mount every region of a scene document, in order.
    pub fn mount_all(
        &self,
        specs: impl IntoIterator<Item = RegionSpec>,
    ) -> ScrublineResult<Vec<RegionHandle>> {
        specs.into_iter().map(|s| self.mount(s)).collect()
    }

    /// Play a time-based timeline; its values are written on every following frame until it ends.
    ///
    /// The new timeline takes over every `(target, property)` it animates: older timelines stop
    /// writing those pairs. Dropping the returned [`Playback`] cancels it unless it was detached.
    pub fn play(&self, timeline: Timeline) -> Playback {
        let mut inner = self.inner.borrow_mut();
        let taken: BTreeSet<(TargetId, Property)> = timeline
            .channels()
            .map(|(t, p)| (t.clone(), p))
            .collect();
        for older in &mut inner.timelines {
            older
                .timeline
                .retain_channels(|t, p| !taken.contains(&(t.clone(), p)));
        }
        let key = inner.next_playback;
        inner.next_playback += 1;
        tracing::debug!(
            playback = key,
            channels = taken.len(),
            secs = timeline.duration_secs(),
            "play"
        );
        inner.timelines.push(RunningTimeline {
            key,
            timeline,
            elapsed: 0.0,
            next_cue: 0,
        });
        Playback {
            scene: Rc::downgrade(&self.inner),
            key,
            detached: false,
        }
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.inner.borrow().regions.iter().any(|r| r.id == id)
    }

    pub fn mounted_ids(&self) -> Vec<String> {
        self.inner
            .borrow()
            .regions
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }

    /// Raw progress state of a mounted region.
    pub fn state_of(&self, id: &str) -> Option<ProgressState> {
        self.inner
            .borrow()
            .regions
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.source.state())
    }

    /// Progress actually used for sampling, after scrub smoothing.
    pub fn progress_of(&self, id: &str) -> Option<Progress> {
        self.inner
            .borrow()
            .regions
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.shown)
    }

    /// Move a region's observed element after a relayout. Takes effect on the next event.
    pub fn set_element_box(&self, id: &str, element: ElementBox) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.regions.iter_mut().find(|r| r.id == id) {
            Some(r) => {
                r.source.set_element(element);
                true
            }
            None => false,
        }
    }

    /// Values last handed to the render target.
    pub fn applied(&self) -> StyleFrame {
        self.inner.borrow().applied.clone()
    }

    pub fn is_idle(&self) -> bool {
        let inner = self.inner.borrow();
        inner.tweens.is_idle()
            && inner.timelines.is_empty()
            && inner
                .regions
                .iter()
                .all(|r| r.clips.iter().all(|c| !c.is_playing()))
    }

    /// A scroll event: recompute every region at the new offset.
    pub fn on_scroll(
        &self,
        metrics: ScrollMetrics,
        target: &mut dyn RenderTarget,
    ) -> FrameReport {
        self.inner.borrow_mut().metrics = Some(metrics);
        self.tick(0.0, target)
    }

    /// A display frame: advance scrub smoothing, tweens and timelines by `dt_secs`.
    pub fn on_frame(&self, dt_secs: f64, target: &mut dyn RenderTarget) -> FrameReport {
        let dt = if dt_secs.is_finite() {
            dt_secs.max(0.0)
        } else {
            0.0
        };
        self.tick(dt, target)
    }

    #[tracing::instrument(level = "trace", skip(self, target))]
    fn tick(&self, dt: f64, target: &mut dyn RenderTarget) -> FrameReport {
        let mut notices: Vec<(u64, Signal<EdgeNotice>, EdgeNotice)> = Vec::new();
        let mut cues: Vec<String> = Vec::new();

        let mut diff = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            let mut frame = StyleFrame::new();

            // Regions have no position until the first scroll event.
            if let Some(metrics) = inner.metrics {
                for region in &mut inner.regions {
                    let update = region.source.update(&metrics);
                    for &edge in &update.edges {
                        tracing::debug!(region = %region.id, ?edge, progress = %update.state.value, "edge");
                        if region.reset_steps_on.contains(&edge) && !region.steps.is_empty() {
                            for steps in &mut region.steps {
                                steps.reset(&mut inner.tweens);
                            }
                            region.steps_parked = true;
                        }
                        for clip in &mut region.clips {
                            clip.on_edge(edge);
                        }
                        notices.push((
                            region.key,
                            region.edges.clone(),
                            EdgeNotice {
                                region: region.id.clone(),
                                edge,
                                state: update.state,
                            },
                        ));
                    }

                    if matches!(
                        region.source.state().phase,
                        Phase::Entering | Phase::ActiveInRange
                    ) {
                        region.steps_parked = false;
                    }

                    let raw = region.source.state().value;
                    region.shown = region.scrub.advance(raw, dt);
                    engine::apply_into(region.shown, &region.bindings, &mut frame);
                    if !region.steps_parked {
                        for steps in &mut region.steps {
                            steps.update(region.shown, &mut inner.tweens);
                        }
                    }
                    for clip in &mut region.clips {
                        clip.advance(dt);
                        clip.sample_into(&mut frame);
                    }
                }
            }

            for running in &mut inner.timelines {
                running.elapsed += dt;
                frame.merge(running.timeline.sample(running.elapsed));
                let due = running.timeline.cues()[running.next_cue..]
                    .iter()
                    .take_while(|c| c.at_secs <= running.elapsed);
                for cue in due {
                    cues.push(cue.name.clone());
                    running.next_cue += 1;
                }
            }
            inner
                .timelines
                .retain(|r| !r.timeline.is_complete(r.elapsed));

            inner.tweens.advance(dt);
            frame.merge(inner.tweens.snapshot());

            // A target that disappeared lost whatever was written to it.
            inner.applied.retain_targets(|t| target.contains(t));
            frame.diff(&inner.applied)
        };

        diff.retain_targets(|t| target.contains(t));
        if !diff.is_empty() {
            target.apply(&diff);
            let mut inner = self.inner.borrow_mut();
            for w in diff.writes() {
                inner.applied.set(w.target.clone(), w.property, w.value);
            }
        }

        for (key, signal, notice) in &notices {
            let still_mounted = self.inner.borrow().regions.iter().any(|r| r.key == *key);
            if still_mounted {
                signal.emit(notice);
            }
        }

        FrameReport {
            edges: notices.into_iter().map(|(_, _, n)| n).collect(),
            cues,
            diff,
        }
    }
}

/// A playing timeline. Dropping it (or calling [`Playback::cancel`]) stops its writes; targets
/// keep the last values written. [`Playback::detach`] lets it run to the end.
#[must_use = "dropping a Playback cancels the timeline; call detach() to let it finish"]
pub struct Playback {
    scene: Weak<RefCell<SceneInner>>,
    key: u64,
    detached: bool,
}

impl Playback {
    /// Whether the timeline is still running.
    pub fn is_playing(&self) -> bool {
        self.scene
            .upgrade()
            .is_some_and(|s| s.borrow().timelines.iter().any(|r| r.key == self.key))
    }

    pub fn cancel(self) {}

    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        if let Some(scene) = self.scene.upgrade() {
            scene.borrow_mut().cancel_playback(self.key);
        }
    }
}

impl std::fmt::Debug for Playback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playback")
            .field("key", &self.key)
            .field("detached", &self.detached)
            .finish()
    }
}

/// Keeps a region mounted. Dropping it (or calling [`RegionHandle::unmount`]) detaches the
/// region, cancels its tweens, and stops all writes to its targets.
#[must_use = "dropping a RegionHandle unmounts the region"]
pub struct RegionHandle {
    scene: Weak<RefCell<SceneInner>>,
    key: u64,
    id: String,
    edges: Signal<EdgeNotice>,
}

impl RegionHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Listen for edge crossings of this region.
    pub fn on_edge(&self, listener: impl FnMut(&EdgeNotice) + 'static) -> Subscription {
        self.edges.subscribe(listener)
    }

    pub fn unmount(self) {}
}

impl Drop for RegionHandle {
    fn drop(&mut self) {
        if let Some(scene) = self.scene.upgrade() {
            scene.borrow_mut().unmount(self.key);
        }
    }
}

impl std::fmt::Debug for RegionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionHandle")
            .field("id", &self.id)
            .finish()
    }
}

/// Settled style of a region at progress `p`: bindings plus step states with no transition.
///
/// Clips depend on which edges were crossed, not on progress, so they are left out.
pub fn sample_region(spec: &RegionSpec, p: Progress) -> ScrublineResult<StyleFrame> {
    spec.validate()?;
    let mut frame = engine::apply(p, &spec.bindings);
    let mut tweens = TweenSet::new();
    for steps in &spec.steps {
        steps.to_track()?.update(p, &mut tweens);
    }
    frame.merge(tweens.snapshot());
    Ok(frame)
}

/// Targets named by `specs` that `target` does not contain.
pub fn missing_targets<'a>(
    specs: impl IntoIterator<Item = &'a RegionSpec>,
    target: &dyn RenderTarget,
) -> BTreeSet<TargetId> {
    specs
        .into_iter()
        .flat_map(|s| s.targets())
        .filter(|t| !target.contains(t))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scroll_scene.rs"]
mod tests;
