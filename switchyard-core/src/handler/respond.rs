use std::marker::PhantomData;

use crate::{async_trait, Handler, IntoResponse, Response, Result};

/// A handler whose `Ok` output is converted with [`IntoResponse`].
#[derive(Debug)]
pub struct Responding<H, O> {
    inner: H,
    _output: PhantomData<fn(O)>,
}

impl<H, O> Responding<H, O> {
    /// Wraps `inner`.
    pub const fn new(inner: H) -> Self {
        Self {
            inner,
            _output: PhantomData,
        }
    }
}

impl<H: Clone, O> Clone for Responding<H, O> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

#[async_trait]
impl<H, I, O> Handler<I> for Responding<H, O>
where
    I: Send + 'static,
    H: Handler<I, Output = Result<O>> + Clone,
    O: IntoResponse + Send + 'static,
{
    type Output = Result<Response>;

    async fn call(&self, input: I) -> Self::Output {
        let output = self.inner.call(input).await?;
        Ok(output.into_response())
    }
}
