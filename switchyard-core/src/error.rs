use std::error::Error as StdError;

use crate::{BoxError, IntoResponse, Response, ThisError};

/// The error type of every handler and action.
///
/// The two variants are the two ways an action can fail: it gave up with a response it
/// wants sent ([`Error::Responder`]), or something went wrong ([`Error::Boxed`]).
#[derive(ThisError, Debug)]
pub enum Error {
    /// A response to send instead of the action's output.
    ///
    /// The route compiler treats it as a short circuit, not a failure.
    #[error("short-circuited with {}", .0.status())]
    Responder(Box<Response>),
    /// Any other failure, rendered as `500 Internal Server Error`.
    #[error(transparent)]
    Boxed(BoxError),
}

impl Error {
    /// Wraps any error as [`Error::Boxed`].
    pub fn boxed<T>(t: T) -> Self
    where
        T: StdError + Send + Sync + 'static,
    {
        Self::Boxed(Box::new(t))
    }

    /// Builds a short circuit from anything that can be converted into a [`Response`].
    pub fn responder<T>(t: T) -> Self
    where
        T: IntoResponse,
    {
        t.into_error()
    }

    /// Whether this is a short circuit.
    #[inline]
    #[must_use]
    pub const fn is_responder(&self) -> bool {
        matches!(self, Self::Responder(_))
    }

    /// Whether the boxed error is a `T`.
    #[must_use]
    pub fn is<T>(&self) -> bool
    where
        T: StdError + 'static,
    {
        self.downcast_ref::<T>().is_some()
    }

    /// Takes the boxed error out as a `T`.
    ///
    /// # Errors
    ///
    /// Gives `self` back when it is a short circuit or holds another error type.
    pub fn downcast<T>(self) -> Result<T, Self>
    where
        T: StdError + 'static,
    {
        match self {
            Self::Boxed(e) => e.downcast::<T>().map(|e| *e).map_err(Self::Boxed),
            Self::Responder(_) => Err(self),
        }
    }

    /// Borrows the boxed error as a `T`.
    #[must_use]
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: StdError + 'static,
    {
        match self {
            Self::Boxed(e) => e.downcast_ref::<T>(),
            Self::Responder(_) => None,
        }
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(e: std::convert::Infallible) -> Self {
        match e {}
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Self::boxed(e)
    }
}

impl From<hyper::Error> for Error {
    fn from(e: hyper::Error) -> Self {
        Self::boxed(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::boxed(e)
    }
}

impl From<BoxError> for Error {
    fn from(e: BoxError) -> Self {
        Self::Boxed(e)
    }
}
