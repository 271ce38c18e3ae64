use std::borrow::Cow;

use http::header::{HeaderValue, CONTENT_LENGTH};

use crate::{response::typed, Bytes, Error, OutgoingBody, Response, Result, StatusCode};

/// Conversion of an action's output into a [`Response`].
pub trait IntoResponse: Sized {
    /// Converts `self` into a response.
    #[must_use]
    fn into_response(self) -> Response;

    /// Converts `self` into a short-circuit [`Error::Responder`].
    ///
    /// Returned from an action, it stops the dispatch and the response is sent as-is.
    fn into_error(self) -> Error {
        Error::Responder(Box::new(self.into_response()))
    }
}

/// A body whose length is known up front.
fn sized(body: Bytes, mime: &mime::Mime) -> Response {
    let len = body.len();
    let mut resp = typed(body, mime);
    resp.headers_mut().insert(CONTENT_LENGTH, HeaderValue::from(len));
    resp
}

fn with_status(status: StatusCode, mut resp: Response) -> Response {
    *resp.status_mut() = status;
    resp
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for OutgoingBody {
    fn into_response(self) -> Response {
        Response::new(self)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::Responder(resp) => *resp,
            Self::Boxed(e) => {
                with_status(StatusCode::INTERNAL_SERVER_ERROR, e.to_string().into_response())
            }
        }
    }

    fn into_error(self) -> Error {
        self
    }
}

impl IntoResponse for std::io::Error {
    fn into_response(self) -> Response {
        Error::from(self).into_response()
    }
}

impl IntoResponse for std::convert::Infallible {
    fn into_response(self) -> Response {
        match self {}
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        sized(self.into(), &mime::TEXT_PLAIN_UTF_8)
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        sized(Bytes::from_static(self.as_bytes()), &mime::TEXT_PLAIN_UTF_8)
    }
}

impl IntoResponse for Bytes {
    fn into_response(self) -> Response {
        sized(self, &mime::APPLICATION_OCTET_STREAM)
    }
}

impl IntoResponse for &'static [u8] {
    fn into_response(self) -> Response {
        Bytes::from_static(self).into_response()
    }
}

impl IntoResponse for Vec<u8> {
    fn into_response(self) -> Response {
        Bytes::from(self).into_response()
    }
}

impl IntoResponse for Cow<'static, str> {
    fn into_response(self) -> Response {
        match self {
            Cow::Borrowed(s) => s.into_response(),
            Cow::Owned(s) => s.into_response(),
        }
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        with_status(self, Response::new(OutgoingBody::Empty))
    }
}

impl IntoResponse for () {
    fn into_response(self) -> Response {
        Response::new(OutgoingBody::Empty)
    }
}

/// `None` is `404 Not Found`.
impl<T> IntoResponse for Option<T>
where
    T: IntoResponse,
{
    fn into_response(self) -> Response {
        self.map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            IntoResponse::into_response,
        )
    }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: IntoResponse,
{
    fn into_response(self) -> Response {
        match self {
            Ok(t) => t.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

impl<T> IntoResponse for (StatusCode, T)
where
    T: IntoResponse,
{
    fn into_response(self) -> Response {
        with_status(self.0, self.1.into_response())
    }
}
