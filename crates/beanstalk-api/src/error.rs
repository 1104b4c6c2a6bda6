//! API client errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Beanstalk API rejected the credentials")]
    Unauthorized,

    #[error("Beanstalk API responded with 500 Internal Server Error")]
    InternalServerError,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Beanstalk API responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<ApiError> for beanstalk_core::Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => beanstalk_core::Error::Unauthorized,
            ApiError::InternalServerError => beanstalk_core::Error::RemoteInternal,
            ApiError::Request(message) => beanstalk_core::Error::ClientTransport(message),
            ApiError::Status { status, body } => beanstalk_core::Error::Api {
                status,
                message: body,
            },
            ApiError::Parse(message) => {
                beanstalk_core::Error::Internal(format!("unexpected API response: {}", message))
            }
            ApiError::Url(e) => beanstalk_core::Error::Internal(e.to_string()),
        }
    }
}
