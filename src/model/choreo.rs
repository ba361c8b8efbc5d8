use std::f64::consts::PI;

use crate::animation::ease::Ease;
use crate::animation::value::Property;
use crate::eval::diff::StyleFrame;
use crate::foundation::core::{Progress, TargetId};
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Constants of the decorative model's motion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelTuning {
    /// Location of the model asset, resolved by the host.
    pub asset_url: String,
    pub base_scale: f64,
    pub base_y: f64,
    /// Page progress after which the model starts rising out of view.
    pub rise_start: f64,
    pub rise_units: f64,
    /// Radians per second at page progress 0.
    pub base_rotation_speed: f64,
    /// Extra rotation speed per unit of page progress, as a fraction of the base speed.
    pub scroll_speed_gain: f64,
    pub entrance_delay_secs: f64,
    pub entrance_secs: f64,
    /// Height above `base_y` the entrance drops from.
    pub entrance_drop: f64,
    pub emissive_base: f64,
    pub emissive_amplitude: f64,
    /// Angular frequency of the shine pulse, in radians per second.
    pub shine_frequency: f64,
}

impl Default for ModelTuning {
    fn default() -> Self {
        Self {
            asset_url: "/models/prisma.glb".to_owned(),
            base_scale: 3.8,
            base_y: 0.0,
            rise_start: 0.9,
            rise_units: 6.0,
            base_rotation_speed: 0.3 * PI,
            scroll_speed_gain: 1.5,
            entrance_delay_secs: 0.5,
            entrance_secs: 2.0,
            entrance_drop: 5.0,
            emissive_base: 0.15,
            emissive_amplitude: 0.3,
            shine_frequency: 2.0,
        }
    }
}

impl ModelTuning {
    pub fn validate(&self) -> ScrublineResult<()> {
        let fields = [
            ("base_scale", self.base_scale),
            ("base_y", self.base_y),
            ("rise_start", self.rise_start),
            ("rise_units", self.rise_units),
            ("base_rotation_speed", self.base_rotation_speed),
            ("scroll_speed_gain", self.scroll_speed_gain),
            ("entrance_delay_secs", self.entrance_delay_secs),
            ("entrance_secs", self.entrance_secs),
            ("entrance_drop", self.entrance_drop),
            ("emissive_base", self.emissive_base),
            ("emissive_amplitude", self.emissive_amplitude),
            ("shine_frequency", self.shine_frequency),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScrublineError::config(format!("model.{name} must be finite")));
        }
        if self.asset_url.trim().is_empty() {
            return Err(ScrublineError::config("model.asset_url must not be blank"));
        }
        if !(0.0..1.0).contains(&self.rise_start) {
            return Err(ScrublineError::config("model.rise_start must be in [0, 1)"));
        }
        if self.entrance_secs <= 0.0 {
            return Err(ScrublineError::config("model.entrance_secs must be > 0"));
        }
        Ok(())
    }
}

/// Render clock for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTick {
    /// Seconds since the viewer started.
    pub elapsed: f64,
    /// Seconds since the previous frame.
    pub delta: f64,
}

impl FrameTick {
    pub fn new(elapsed: f64, delta: f64) -> Self {
        Self { elapsed, delta }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ModelPose {
    pub y: f64,
    /// Accumulated spin in radians.
    pub rotation_y: f64,
    pub scale: f64,
    pub emissive: f64,
}

impl ModelPose {
    /// Pose as style writes on `target`. Rotation is written in degrees.
    pub fn to_frame(&self, target: &TargetId) -> StyleFrame {
        let mut f = StyleFrame::new();
        f.set(target.clone(), Property::TranslateY, self.y.into());
        f.set(
            target.clone(),
            Property::RotationY,
            self.rotation_y.to_degrees().into(),
        );
        f.set(target.clone(), Property::Scale, self.scale.into());
        f.set(
            target.clone(),
            Property::EmissiveIntensity,
            self.emissive.into(),
        );
        f
    }
}

/// Per-frame pose of the landing model from page progress and the landing phase.
#[derive(Clone, Debug)]
pub struct ModelChoreography {
    tuning: ModelTuning,
    rotation_y: f64,
}

impl ModelChoreography {
    pub fn new(tuning: ModelTuning) -> Self {
        Self {
            tuning,
            rotation_y: 0.0,
        }
    }

    pub fn tuning(&self) -> &ModelTuning {
        &self.tuning
    }

    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    /// Advance one frame. Returns `None` while the model is hidden (landing phase 0); rotation
    /// only accumulates while visible.
    pub fn tick(
        &mut self,
        tick: FrameTick,
        page_progress: Progress,
        landing_phase: u8,
    ) -> Option<ModelPose> {
        if landing_phase == 0 {
            return None;
        }
        let t = &self.tuning;
        let p = page_progress.get();
        let delta = if tick.delta.is_finite() {
            tick.delta.max(0.0)
        } else {
            0.0
        };

        let speed = t.base_rotation_speed * (1.0 + p * t.scroll_speed_gain);
        self.rotation_y += speed * delta;

        let rise = if p > t.rise_start {
            (p - t.rise_start) / (1.0 - t.rise_start) * t.rise_units
        } else {
            0.0
        };
        let mut y = t.base_y + rise;
        let mut scale = t.base_scale;

        if landing_phase == 1 {
            // `apply` clamps t, so scale holds at 0 until the entrance delay has passed.
            let e = Ease::OutCubic.apply((tick.elapsed - t.entrance_delay_secs) / t.entrance_secs);
            let start_y = t.base_y + t.entrance_drop;
            y = start_y + (t.base_y - start_y) * e;
            scale = t.base_scale * e;
        }

        let shine = ((tick.elapsed * t.shine_frequency).sin() + 1.0) / 2.0;
        Some(ModelPose {
            y,
            rotation_y: self.rotation_y,
            scale,
            emissive: t.emissive_base + shine * t.emissive_amplitude,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/choreo.rs"]
mod tests;
