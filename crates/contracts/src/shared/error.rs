use thiserror::Error;

/// Failures the gallery and the selector surface to the user.
///
/// Every variant is terminal for the current user action: nothing retries automatically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GalleryError {
    /// Network or browser API unreachable
    #[error("transport failure: {0}")]
    Transport(String),

    /// The ERP answered but refused the operation (`success: false` or an error payload)
    #[error("{0}")]
    Rejected(String),

    /// Required client-side context is missing (token, contact, selection)
    #[error("{0}")]
    MissingContext(String),

    /// Response body could not be decoded
    #[error("decode failure: {0}")]
    Decode(String),
}

impl GalleryError {
    /// Text shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            GalleryError::Transport(_) | GalleryError::Decode(_) => {
                "Error de conexión.".to_string()
            }
            GalleryError::Rejected(message) | GalleryError::MissingContext(message) => {
                message.clone()
            }
        }
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(e: serde_json::Error) -> Self {
        GalleryError::Decode(e.to_string())
    }
}
