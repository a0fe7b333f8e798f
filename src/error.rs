use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixel_adjust::PipelineError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No image file provided.")]
    MissingImage,

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("Processing timed out after {0} seconds")]
    Timeout(u64),

    #[error("Could not encode image: {0}")]
    Encode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CodecError> for ApiError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Decode(msg) => ApiError::Decode(msg),
            CodecError::Encode(msg) => ApiError::Encode(msg),
            CodecError::Pipeline(e) => ApiError::Pipeline(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImage
            | ApiError::Multipart(_)
            | ApiError::Decode(_)
            | ApiError::Pipeline(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Encode(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
