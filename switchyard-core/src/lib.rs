//! Requests, responses, errors and handlers shared by the [`Switchyard`] crates.
//!
//! An action is a [`Handler`] from [`Request`] to `Result<impl IntoResponse>`. Returning
//! [`Error::Responder`] short-circuits it with a ready response.
//!
//! [`Switchyard`]: https://docs.rs/switchyard/latest/switchyard

#![forbid(unsafe_code)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![doc(test(
    no_crate_inject,
    attr(
        deny(warnings, rust_2018_idioms),
        allow(dead_code, unused_assignments, unused_variables)
    )
))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

/// An HTTP request as actions see it.
pub type Request<T = IncomingBody> = http::Request<T>;
/// An HTTP response as actions produce it.
pub type Response<T = OutgoingBody> = http::Response<T>;
/// `Result` defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
/// Any thread-safe error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[macro_use]
pub(crate) mod macros;

pub mod handler;

#[doc(inline)]
pub use crate::handler::{BoxHandler, FnExt, Handler, HandlerExt, IntoHandler, Next, Transform};

pub mod types;

mod body;
mod error;
mod from_request;
mod into_response;
mod request;
mod response;

pub use body::{IncomingBody, OutgoingBody};
pub use error::Error;
pub use from_request::FromRequest;
pub use into_response::IntoResponse;
pub use request::RequestExt;
pub use response::ResponseExt;

pub use async_trait::async_trait;
pub use bytes::Bytes;
pub use http::{header, uri::Uri, Method, StatusCode};
pub use hyper::body::Incoming;
pub use std::future::Future;
pub use thiserror::Error as ThisError;

mod tuples {
    use super::{async_trait, FnExt, FromRequest, Future, IntoResponse, Request, Result};

    async fn extract<T: FromRequest>(req: &mut Request) -> Result<T> {
        T::extract(req).await.map_err(IntoResponse::into_error)
    }

    tuple_impls!(A B C D E F G H I J K L);
}
