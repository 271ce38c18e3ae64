use crate::{async_trait, Handler, Result};

/// What a middleware receives: the input and the handler it wraps.
pub type Next<I, H> = (I, H);

/// A handler wrapped by a middleware function, see [`HandlerExt::around`][super::HandlerExt::around].
#[derive(Debug, Clone)]
pub struct Around<H, F> {
    inner: H,
    middleware: F,
}

impl<H, F> Around<H, F> {
    /// Wraps `inner` with `middleware`.
    pub const fn new(inner: H, middleware: F) -> Self {
        Self { inner, middleware }
    }
}

#[async_trait]
impl<H, F, I, O> Handler<I> for Around<H, F>
where
    I: Send + 'static,
    H: Handler<I, Output = Result<O>> + Clone,
    F: Handler<Next<I, H>, Output = H::Output> + Clone,
    O: 'static,
{
    type Output = H::Output;

    async fn call(&self, input: I) -> Self::Output {
        self.middleware.call((input, self.inner.clone())).await
    }
}

/// A middleware factory: given a handler, builds the handler that wraps it.
///
/// [`State`][crate::types::State] is one; routers apply a transform to every action they hold.
pub trait Transform<H> {
    /// The wrapping handler.
    type Output;

    /// Wraps `h`.
    fn transform(&self, h: H) -> Self::Output;
}
