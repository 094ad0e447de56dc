pub type VidforgeResult<T> = Result<T, VidforgeError>;

#[derive(thiserror::Error, Debug)]
pub enum VidforgeError {
    /// Aggregated validation failure. The message text is surfaced verbatim
    /// to callers, so no category prefix is added.
    #[error("{0}")]
    Validation(String),

    /// Element transformation failure. Message is the caller-facing text.
    #[error("{0}")]
    Processing(String),

    #[error(transparent)]
    Params(#[from] crate::params::ParamError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VidforgeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }
}
