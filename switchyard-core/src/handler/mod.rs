//! Handlers: the async functions a route dispatches to, and the adapters used to wrap them.

use crate::{async_trait, Future};

mod boxed;
mod extract;
mod middleware;
mod respond;

pub use boxed::BoxHandler;
pub use extract::{Extractors, FnExt, IntoHandler};
pub use middleware::{Around, Next, Transform};
pub use respond::Responding;

/// An async function from an input to an output.
///
/// Routes store their actions as `Handler<Request, Output = Result<Response>>`, boxed.
#[async_trait]
pub trait Handler<Input>: dyn_clone::DynClone + Send + Sync + 'static {
    /// What the call resolves to.
    type Output;

    /// Runs the handler.
    #[must_use]
    async fn call(&self, input: Input) -> Self::Output;
}

#[async_trait]
impl<F, I, Fut, O> Handler<I> for F
where
    I: Send + 'static,
    F: Fn(I) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
    O: 'static,
{
    type Output = Fut::Output;

    async fn call(&self, input: I) -> Self::Output {
        (self)(input).await
    }
}

impl<I, T> HandlerExt<I> for T where T: Handler<I> + ?Sized {}

/// Adapters for composing a [`Handler`] with middleware.
pub trait HandlerExt<I>: Handler<I> {
    /// Erases the handler's type.
    fn boxed(self) -> BoxHandler<I, Self::Output>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Runs `f` with the input and this handler, letting it decide whether and how to call it.
    fn around<F>(self, f: F) -> Around<Self, F>
    where
        Self: Sized,
    {
        Around::new(self, f)
    }

    /// Turns an `Ok` output into a [`Response`][crate::Response].
    fn map_into_response<O>(self) -> Responding<Self, O>
    where
        Self: Sized,
    {
        Responding::new(self)
    }

    /// Wraps this handler with a [`Transform`].
    fn with<T>(self, t: T) -> T::Output
    where
        T: Transform<Self>,
        Self: Sized,
    {
        t.transform(self)
    }
}
