use crate::{IntoResponse, Response, StatusCode, ThisError};

/// Why a body, query string or state extractor rejected the request.
///
/// Each variant maps to the status noted on it.
#[derive(ThisError, Debug)]
pub enum PayloadError {
    /// 400
    #[error("request body is empty")]
    Empty,

    /// 500
    #[error("request body has been used")]
    Used,

    /// 400
    #[error("failed to read the request body")]
    Read,

    /// 415
    #[error("unsupported media type, `{}` is required", .0)]
    ContentTypeMismatch(mime::Mime),

    /// 400
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),

    /// 400
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// 400
    #[error(transparent)]
    UrlDecode(#[from] serde_urlencoded::de::Error),

    /// 500
    #[error("missing state type `{}`", .0)]
    State(&'static str),
}

impl PayloadError {
    /// The status code of this rejection.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::ContentTypeMismatch(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Used | Self::State(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for PayloadError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Rejections short-circuit with their response.
impl From<PayloadError> for crate::Error {
    fn from(e: PayloadError) -> Self {
        e.into_error()
    }
}
