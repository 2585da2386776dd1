use thiserror::Error;

/// Failures raised while configuring or restoring a generator.
///
/// Generation itself never fails: once a generator holds a valid state every
/// draw and hierarchy move is total.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RngError {
    /// Malformed seed, index or variate parameter supplied by the caller.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A state supplied after construction (`seed`, `restore`) is out of range.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl RngError {
    pub(crate) fn configuration<S: Into<String>>(reason: S) -> Self {
        Self::Configuration(reason.into())
    }

    pub(crate) fn invalid_state<S: Into<String>>(reason: S) -> Self {
        Self::InvalidState(reason.into())
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::Configuration(reason) | Self::InvalidState(reason) => reason,
        }
    }
}
