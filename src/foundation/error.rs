/// Crate-wide result alias.
pub type IntroResult<T> = Result<T, IntroError>;

/// Errors surfaced by scene setup, media loading, playback and rendering.
#[derive(thiserror::Error, Debug)]
pub enum IntroError {
    /// Invalid configuration, viewport or argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// The video resource never became playable.
    #[error("load error: {0}")]
    Load(String),

    /// Playback was refused or requested from the wrong state.
    #[error("playback error: {0}")]
    Playback(String),

    /// A frame could not be produced.
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem failure while reading sources or writing frames.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntroError {
    /// Build an [`IntroError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`IntroError::Load`].
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build an [`IntroError::Playback`].
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build an [`IntroError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// `true` for the two terminal kinds a page ever reports: the video never loaded, or
    /// playback could not start.
    pub fn is_playback_failure(&self) -> bool {
        matches!(self, Self::Load(_) | Self::Playback(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
