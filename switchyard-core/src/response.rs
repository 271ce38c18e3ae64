use http_body_util::Full;

use crate::{header, Bytes, IntoResponse, OutgoingBody, Response, StatusCode};

/// Constructors and accessors for [`Response`].
pub trait ResponseExt: private::Sealed + Sized {
    /// The `Content-Length` header.
    fn content_length(&self) -> Option<u64>;

    /// The `Content-Type` header.
    fn content_type(&self) -> Option<mime::Mime>;

    /// Parses a header value.
    fn header<K, T>(&self, key: K) -> Option<T>
    where
        K: header::AsHeaderName,
        T: std::str::FromStr;

    /// Whether the status is `2xx`.
    fn ok(&self) -> bool;

    /// `200 OK` with no body.
    #[must_use]
    fn empty() -> Response {
        Response::new(OutgoingBody::Empty)
    }

    /// A `text/plain; charset=utf-8` response.
    fn text<B>(body: B) -> Response
    where
        B: Into<Full<Bytes>>,
    {
        typed(body.into(), &mime::TEXT_PLAIN_UTF_8)
    }

    /// An `application/json` response.
    ///
    /// # Errors
    ///
    /// Fails when `body` cannot be serialized.
    fn json<T>(body: T) -> Result<Response, crate::types::PayloadError>
    where
        T: serde::Serialize,
    {
        let buf = serde_json::to_vec(&body)?;
        Ok(typed(buf, &mime::APPLICATION_JSON))
    }

    /// `302 Found` to `url`.
    ///
    /// A `url` that is not a valid header value gives `500 Internal Server Error`.
    fn redirect<T>(url: T) -> Response
    where
        T: AsRef<str>,
    {
        redirect(url.as_ref(), StatusCode::FOUND)
    }

    /// `303 See Other` to `url`, the usual answer to a form submission.
    fn see_other<T>(url: T) -> Response
    where
        T: AsRef<str>,
    {
        redirect(url.as_ref(), StatusCode::SEE_OTHER)
    }

    /// `307 Temporary Redirect` to `url`.
    fn temporary<T>(url: T) -> Response
    where
        T: AsRef<str>,
    {
        redirect(url.as_ref(), StatusCode::TEMPORARY_REDIRECT)
    }

    /// `308 Permanent Redirect` to `url`.
    fn permanent<T>(url: T) -> Response
    where
        T: AsRef<str>,
    {
        redirect(url.as_ref(), StatusCode::PERMANENT_REDIRECT)
    }
}

pub(crate) fn typed<B>(body: B, mime: &mime::Mime) -> Response
where
    B: Into<OutgoingBody>,
{
    let mut resp = Response::new(body.into());
    if let Ok(value) = header::HeaderValue::from_str(mime.as_ref()) {
        resp.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    resp
}

fn redirect(url: &str, status: StatusCode) -> Response {
    let Ok(location) = header::HeaderValue::try_from(url) else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let mut resp = Response::empty();
    *resp.status_mut() = status;
    resp.headers_mut().insert(header::LOCATION, location);
    resp
}

impl ResponseExt for Response {
    fn content_length(&self) -> Option<u64> {
        self.header(header::CONTENT_LENGTH)
    }

    fn content_type(&self) -> Option<mime::Mime> {
        self.header(header::CONTENT_TYPE)
    }

    fn header<K, T>(&self, key: K) -> Option<T>
    where
        K: header::AsHeaderName,
        T: std::str::FromStr,
    {
        self.headers().get(key)?.to_str().ok()?.parse().ok()
    }

    fn ok(&self) -> bool {
        self.status().is_success()
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Response {}
}
