use std::path::PathBuf;

/// Result alias used throughout scrubline.
pub type ScrublineResult<T> = Result<T, ScrublineError>;

/// Everything that can go wrong while building or loading a scene.
///
/// Runtime events never produce errors: missing targets are skipped and form input problems are
/// reported as values.
#[derive(thiserror::Error, Debug)]
pub enum ScrublineError {
    /// A region, binding, step set or widget was declared with inconsistent data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A trigger edge or anchor string could not be understood.
    #[error("trigger error: {0}")]
    Trigger(String),

    /// A timeline could not be compiled.
    #[error("animation error: {0}")]
    Animation(String),

    /// Scene document or tuning constants rejected.
    #[error("config error: {0}")]
    Config(String),

    #[error("read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrublineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Validation failure attributed to the region `id`.
    pub fn in_region(id: &str, msg: impl std::fmt::Display) -> Self {
        Self::Validation(format!("region '{id}': {msg}"))
    }

    pub fn trigger(msg: impl Into<String>) -> Self {
        Self::Trigger(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the problem lies in declared scene data rather than in IO or encoding.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Trigger(_) | Self::Animation(_) | Self::Config(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
