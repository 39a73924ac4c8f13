/// Result alias carrying the core [`GreetingError`].
pub type Result<T> = std::result::Result<T, GreetingError>;

/// Audio facility failures. None of these are fatal; callers log them and
/// carry on without sound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[error("audio output blocked by the platform")]
    Blocked,
    #[error("audio node error: {0}")]
    Node(String),
}

/// Reasons a wish submission is turned away before any state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WishError {
    #[error("wish text is empty")]
    Empty,
    #[error("a wish is already being submitted")]
    Busy,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid<T: Into<String>>(msg: T) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum GreetingError {
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error(transparent)]
    Wish(#[from] WishError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
