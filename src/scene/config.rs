use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ScrublineError, ScrublineResult};
use crate::model::choreo::ModelTuning;
use crate::scene::landing::LandingTuning;
use crate::scene::region::RegionSpec;

/// Time constants for everything that is not scroll driven.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub landing: LandingTuning,
    /// Seconds per revealed character in the form wizard's question text.
    pub typing_interval_secs: f64,
    pub model: ModelTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            landing: LandingTuning::default(),
            typing_interval_secs: 0.05,
            model: ModelTuning::default(),
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> ScrublineResult<()> {
        self.landing.validate()?;
        if !self.typing_interval_secs.is_finite() || self.typing_interval_secs <= 0.0 {
            return Err(ScrublineError::config(
                "typing_interval_secs must be finite and > 0",
            ));
        }
        self.model.validate()
    }
}

/// JSON scene document: animated regions plus tuning.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(default)]
    pub regions: Vec<RegionSpec>,
}

impl SceneConfig {
    /// Parse and validate a scene from a JSON reader.
    #[tracing::instrument(skip(r))]
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrublineResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ScrublineError::config(format!("parse scene JSON: {e}")))?;
        cfg.validate()?;
        tracing::debug!(regions = cfg.regions.len(), "scene loaded");
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ScrublineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| ScrublineError::io(path, e))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> ScrublineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScrublineError::serde(e.to_string()))
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        self.tuning.validate()?;
        let mut ids = BTreeSet::new();
        for r in &self.regions {
            r.validate()?;
            if !ids.insert(r.id.as_str()) {
                return Err(ScrublineError::validation(format!(
                    "duplicate region id '{}'",
                    r.id
                )));
            }
        }
        Ok(())
    }

    pub fn region(&self, id: &str) -> Option<&RegionSpec> {
        self.regions.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
