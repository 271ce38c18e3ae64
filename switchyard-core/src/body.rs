use std::{
    pin::Pin,
    task::{ready, Context, Poll},
};

use http_body_util::Full;
use hyper::body::{Body, Frame, Incoming, SizeHint};

use crate::{Bytes, Error, Result};

type PolledFrame = Poll<Option<Result<Frame<Bytes>>>>;

/// The body of a [`Request`][crate::Request].
///
/// Bodies read off a connection are taken on first read, after which the request
/// holds [`IncomingBody::used`].
#[derive(Debug, Default)]
pub enum IncomingBody {
    /// No body.
    #[default]
    Empty,
    /// A body built in-process, as tests and internal redispatch do.
    Full(Full<Bytes>),
    /// A body streamed from the connection; `None` once consumed.
    Incoming(Option<Incoming>),
}

impl IncomingBody {
    /// Wraps a connection body.
    #[must_use]
    pub const fn new(inner: Option<Incoming>) -> Self {
        Self::Incoming(inner)
    }

    /// The placeholder left behind once the connection body has been taken.
    #[must_use]
    pub const fn used() -> Self {
        Self::Incoming(None)
    }
}

impl Body for IncomingBody {
    type Data = Bytes;
    type Error = Error;

    fn poll_frame(self: Pin<&mut Self>, cx: &mut Context<'_>) -> PolledFrame {
        let slot = match self.get_mut() {
            Self::Empty | Self::Incoming(None) => return Poll::Ready(None),
            Self::Full(full) => return poll_full(full, cx),
            Self::Incoming(slot) => slot,
        };
        let Some(inner) = slot.as_mut() else {
            return Poll::Ready(None);
        };
        match ready!(Pin::new(inner).poll_frame(cx)) {
            Some(frame) => Poll::Ready(Some(frame.map_err(Error::from))),
            None => {
                *slot = None;
                Poll::Ready(None)
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Empty | Self::Incoming(None) => true,
            Self::Full(full) => full.is_end_stream(),
            Self::Incoming(Some(inner)) => inner.is_end_stream(),
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            Self::Empty | Self::Incoming(None) => SizeHint::with_exact(0),
            Self::Full(full) => full.size_hint(),
            Self::Incoming(Some(inner)) => inner.size_hint(),
        }
    }
}

/// The body of a [`Response`][crate::Response]: nothing, or a single buffered chunk.
#[derive(Debug, Default)]
pub enum OutgoingBody {
    /// No body.
    #[default]
    Empty,
    /// A buffered body.
    Full(Full<Bytes>),
}

impl OutgoingBody {
    /// The length of the body, when it is known without reading it.
    #[must_use]
    pub fn exact_len(&self) -> Option<u64> {
        self.size_hint().exact()
    }
}

impl Body for OutgoingBody {
    type Data = Bytes;
    type Error = Error;

    fn poll_frame(self: Pin<&mut Self>, cx: &mut Context<'_>) -> PolledFrame {
        match self.get_mut() {
            Self::Empty => Poll::Ready(None),
            Self::Full(full) => poll_full(full, cx),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Full(full) => full.is_end_stream(),
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            Self::Empty => SizeHint::with_exact(0),
            Self::Full(full) => full.size_hint(),
        }
    }
}

fn poll_full(full: &mut Full<Bytes>, cx: &mut Context<'_>) -> PolledFrame {
    Pin::new(full).poll_frame(cx).map_err(Error::from)
}

impl From<Incoming> for IncomingBody {
    fn from(incoming: Incoming) -> Self {
        Self::new(Some(incoming))
    }
}

impl From<Full<Bytes>> for OutgoingBody {
    fn from(full: Full<Bytes>) -> Self {
        Self::Full(full)
    }
}

impl From<()> for OutgoingBody {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

/// Buffered conversions shared by both bodies.
macro_rules! buffered {
    ($($body:ident),*) => {
        $(
            impl From<Bytes> for $body {
                fn from(bytes: Bytes) -> Self {
                    Self::Full(Full::new(bytes))
                }
            }

            impl From<Vec<u8>> for $body {
                fn from(buf: Vec<u8>) -> Self {
                    Bytes::from(buf).into()
                }
            }

            impl From<String> for $body {
                fn from(s: String) -> Self {
                    Bytes::from(s).into()
                }
            }

            impl From<&'static str> for $body {
                fn from(s: &'static str) -> Self {
                    Bytes::from_static(s.as_bytes()).into()
                }
            }
        )*
    };
}

buffered!(IncomingBody, OutgoingBody);
