use crate::{async_trait, Handler, Request, Response, Result};

/// A type-erased [`Handler`], by default the shape every route action takes.
pub type BoxHandler<I = Request, O = Result<Response>> = Box<dyn Handler<I, Output = O>>;

impl<I: 'static, O: 'static> Clone for BoxHandler<I, O> {
    fn clone(&self) -> Self {
        dyn_clone::clone_box(&**self)
    }
}

#[async_trait]
impl<I, O> Handler<I> for BoxHandler<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    type Output = O;

    async fn call(&self, input: I) -> O {
        (**self).call(input).await
    }
}
