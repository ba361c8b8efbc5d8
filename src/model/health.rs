use crate::foundation::core::Progress;
use crate::model::choreo::{FrameTick, ModelChoreography, ModelPose, ModelTuning};

/// Availability of the decorative model.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum ModelHealth {
    #[default]
    Loading,
    Ready,
    /// The asset could not be loaded. Terminal.
    Failed(String),
    /// The graphics context is gone; may come back.
    ContextLost,
}

/// Model choreography gated by asset and graphics-context health.
///
/// Failures only hide the model; they never surface as errors to the rest of the page.
#[derive(Clone, Debug)]
pub struct ModelViewer {
    health: ModelHealth,
    choreo: ModelChoreography,
}

impl ModelViewer {
    pub fn new(tuning: ModelTuning) -> Self {
        Self {
            health: ModelHealth::Loading,
            choreo: ModelChoreography::new(tuning),
        }
    }

    pub fn asset_url(&self) -> &str {
        &self.choreo.tuning().asset_url
    }

    pub fn health(&self) -> &ModelHealth {
        &self.health
    }

    pub fn is_visible(&self) -> bool {
        self.health == ModelHealth::Ready
    }

    pub fn asset_loaded(&mut self) {
        if self.health == ModelHealth::Loading {
            self.health = ModelHealth::Ready;
        }
    }

    pub fn asset_failed(&mut self, reason: impl Into<String>) {
        if matches!(self.health, ModelHealth::Failed(_)) {
            return;
        }
        let reason = reason.into();
        tracing::warn!(asset = self.asset_url(), %reason, "model asset failed; hiding model");
        self.health = ModelHealth::Failed(reason);
    }

    pub fn context_lost(&mut self) {
        if self.health == ModelHealth::Ready {
            tracing::warn!("graphics context lost");
            self.health = ModelHealth::ContextLost;
        }
    }

    pub fn context_restored(&mut self) {
        if self.health == ModelHealth::ContextLost {
            tracing::debug!("graphics context restored");
            self.health = ModelHealth::Ready;
        }
    }

    /// Pose for this frame, or `None` while the model is not shown.
    pub fn tick(
        &mut self,
        tick: FrameTick,
        page_progress: Progress,
        landing_phase: u8,
    ) -> Option<ModelPose> {
        if !self.is_visible() {
            return None;
        }
        self.choreo.tick(tick, page_progress, landing_phase)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/health.rs"]
mod tests;
