use std::marker::PhantomData;

use crate::{async_trait, Handler, Request, Result};

/// A function whose arguments are all [`FromRequest`][crate::FromRequest] extractors.
///
/// Implemented for functions of up to twelve arguments. Arguments are extracted in
/// declaration order and the first rejection is returned as the error, before the
/// function body runs.
#[async_trait]
pub trait FnExt<E>: Send + Sync + 'static {
    /// What the function resolves to.
    type Output;

    /// Extracts the arguments from `req` and calls the function.
    async fn call(&self, req: Request) -> Self::Output;
}

/// An extractor function adapted into a [`Handler<Request>`].
#[derive(Debug)]
pub struct Extractors<H, E, O> {
    f: H,
    _args: PhantomData<fn(E) -> O>,
}

impl<H: Clone, E, O> Clone for Extractors<H, E, O> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _args: PhantomData,
        }
    }
}

#[async_trait]
impl<H, E, O> Handler<Request> for Extractors<H, E, O>
where
    E: 'static,
    H: FnExt<E, Output = Result<O>> + Clone,
    O: Send + 'static,
{
    type Output = Result<O>;

    async fn call(&self, req: Request) -> Self::Output {
        FnExt::call(&self.f, req).await
    }
}

/// Conversion of an extractor function into a [`Handler`].
pub trait IntoHandler<E> {
    /// The resulting handler.
    type Handler: Handler<Request>;

    /// Adapts `self`.
    #[must_use]
    fn into_handler(self) -> Self::Handler;
}

impl<H, E, O> IntoHandler<E> for H
where
    E: 'static,
    H: FnExt<E, Output = Result<O>> + Clone,
    O: Send + 'static,
{
    type Handler = Extractors<H, E, O>;

    fn into_handler(self) -> Self::Handler {
        Extractors {
            f: self,
            _args: PhantomData,
        }
    }
}
