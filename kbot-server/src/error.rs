use hyper::StatusCode;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, KbotError>;

#[derive(Error, Debug)]
pub enum KbotError {
    #[error("unable to complete operation: {0}")]
    Other(#[from] anyhow::Error),

    #[error("failed to process request due to a server error: {0}")]
    ServerError(#[from] hyper::Error),

    #[error("failed serialize / deserialize value: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("failed to load the spell correction model: {0}")]
    CorrectionError(#[from] corrector::CorrectorError),
}

impl KbotError {
    /// The status code the error is reported to the client with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SerializationError(_) => StatusCode::BAD_REQUEST,
            Self::Other(_) | Self::ServerError(_) | Self::CorrectionError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}
