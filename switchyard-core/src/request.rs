use std::{net::SocketAddr, str::FromStr, sync::Arc};

use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

use crate::{
    async_trait, header,
    types::{ParamsError, PathDeserializer, PayloadError, RouteInfo},
    Bytes, IncomingBody, Request,
};

/// Accessors for the parts of a [`Request`] an action reads: the URI, headers, body,
/// shared state and the parameters of the matched route.
#[async_trait]
pub trait RequestExt: private::Sealed + Sized {
    /// The URI path.
    fn path(&self) -> &str;

    /// The raw query string, without the `?`.
    fn query_string(&self) -> Option<&str>;

    /// Decodes the query string; a missing one decodes as empty.
    ///
    /// # Errors
    ///
    /// [`PayloadError::UrlDecode`] when the query does not fit `T`.
    fn query<T>(&self) -> Result<T, PayloadError>
    where
        T: DeserializeOwned;

    /// Parses a header value, `None` when it is missing or does not parse.
    fn header<K, T>(&self, key: K) -> Option<T>
    where
        K: header::AsHeaderName,
        T: FromStr;

    /// The `Content-Length` header.
    fn content_length(&self) -> Option<u64>;

    /// The `Content-Type` header.
    fn content_type(&self) -> Option<mime::Mime>;

    /// Takes the body, leaving [`IncomingBody::used`] behind.
    ///
    /// # Errors
    ///
    /// [`PayloadError::Empty`] without a body, [`PayloadError::Used`] on a second read.
    fn incoming(&mut self) -> Result<IncomingBody, PayloadError>;

    /// Reads the whole body.
    async fn bytes(&mut self) -> Result<Bytes, PayloadError>;

    /// Reads the whole body as UTF-8.
    async fn text(&mut self) -> Result<String, PayloadError>;

    /// Reads the whole body as JSON; requires a JSON `Content-Type`.
    async fn json<T>(&mut self) -> Result<T, PayloadError>
    where
        T: DeserializeOwned;

    /// A clone of the state of type `T`.
    fn state<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static;

    /// Stores state of type `T`, returning the previous one.
    fn set_state<T>(&mut self, t: T) -> Option<T>
    where
        T: Clone + Send + Sync + 'static;

    /// Deserializes the route parameters into `T`.
    ///
    /// A scalar binds to the only parameter, tuples bind in order and structs bind by name.
    ///
    /// # Errors
    ///
    /// [`ParamsError::Empty`] outside a matched route, [`ParamsError::Parse`] otherwise.
    fn params<T>(&self) -> Result<T, ParamsError>
    where
        T: DeserializeOwned;

    /// Parses the route parameter called `name`.
    ///
    /// # Errors
    ///
    /// [`ParamsError::SingleParse`] when it is missing or does not parse.
    fn param<T>(&self, name: &str) -> Result<T, ParamsError>
    where
        T: FromStr,
        T::Err: std::fmt::Display;

    /// The matched route, attached by the route compiler.
    fn route_info(&self) -> Option<&Arc<RouteInfo>>;

    /// The peer address, attached by the server.
    fn remote_addr(&self) -> Option<&SocketAddr>;
}

#[async_trait]
impl RequestExt for Request {
    fn path(&self) -> &str {
        self.uri().path()
    }

    fn query_string(&self) -> Option<&str> {
        self.uri().query()
    }

    fn query<T>(&self) -> Result<T, PayloadError>
    where
        T: DeserializeOwned,
    {
        let raw = self.query_string().unwrap_or_default();
        Ok(serde_urlencoded::from_str(raw)?)
    }

    fn header<K, T>(&self, key: K) -> Option<T>
    where
        K: header::AsHeaderName,
        T: FromStr,
    {
        self.headers().get(key)?.to_str().ok()?.parse().ok()
    }

    fn content_length(&self) -> Option<u64> {
        self.header(header::CONTENT_LENGTH)
    }

    fn content_type(&self) -> Option<mime::Mime> {
        self.header(header::CONTENT_TYPE)
    }

    fn incoming(&mut self) -> Result<IncomingBody, PayloadError> {
        match std::mem::replace(self.body_mut(), IncomingBody::used()) {
            IncomingBody::Empty => Err(PayloadError::Empty),
            IncomingBody::Incoming(None) => Err(PayloadError::Used),
            body => Ok(body),
        }
    }

    async fn bytes(&mut self) -> Result<Bytes, PayloadError> {
        let collected = self
            .incoming()?
            .collect()
            .await
            .map_err(|_| PayloadError::Read)?;
        Ok(collected.to_bytes())
    }

    async fn text(&mut self) -> Result<String, PayloadError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8(bytes.into())?)
    }

    async fn json<T>(&mut self) -> Result<T, PayloadError>
    where
        T: DeserializeOwned,
    {
        let is_json = self
            .content_type()
            .is_some_and(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON));
        if !is_json {
            return Err(PayloadError::ContentTypeMismatch(mime::APPLICATION_JSON));
        }
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn state<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions().get::<T>().cloned()
    }

    fn set_state<T>(&mut self, t: T) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions_mut().insert(t)
    }

    fn params<T>(&self) -> Result<T, ParamsError>
    where
        T: DeserializeOwned,
    {
        let route = self.route_info().ok_or(ParamsError::Empty)?;
        Ok(T::deserialize(PathDeserializer::new(&route.params))?)
    }

    fn param<T>(&self, name: &str) -> Result<T, ParamsError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let route = self.route_info().ok_or(ParamsError::Empty)?;
        route.params.find(name)
    }

    fn route_info(&self) -> Option<&Arc<RouteInfo>> {
        self.extensions().get()
    }

    fn remote_addr(&self) -> Option<&SocketAddr> {
        self.extensions().get()
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Request {}
}
