use std::any::type_name;

use crate::{
    async_trait, handler::Transform, types::PayloadError, FromRequest, Handler, IntoResponse,
    Request, RequestExt, Response, Result,
};

/// Application state shared by every action of a router.
///
/// As a [`Transform`], `State::new(value)` stores a clone of `value` in each request's
/// extensions before the wrapped action runs. As an extractor, `State<T>` reads it back.
///
/// ```
/// # use switchyard_core::{types::State, Result};
/// #[derive(Clone)]
/// struct Db(&'static str);
///
/// async fn name(State(db): State<Db>) -> Result<&'static str> {
///     Ok(db.0)
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct State<T>(pub T);

wrapper!(State);

#[async_trait]
impl<T> FromRequest for State<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Error = PayloadError;

    async fn extract(req: &mut Request) -> Result<Self, Self::Error> {
        match req.state::<T>() {
            Some(value) => Ok(Self(value)),
            None => Err(PayloadError::State(type_name::<T>())),
        }
    }
}

impl<H, T> Transform<H> for State<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = Stateful<H, T>;

    fn transform(&self, inner: H) -> Self::Output {
        Stateful {
            inner,
            state: self.0.clone(),
        }
    }
}

/// An action that runs with a [`State`] attached to its request.
#[derive(Clone, Debug)]
pub struct Stateful<H, T> {
    inner: H,
    state: T,
}

#[async_trait]
impl<H, O, T> Handler<Request> for Stateful<H, T>
where
    O: IntoResponse + Send + 'static,
    H: Handler<Request, Output = Result<O>> + Clone,
    T: Clone + Send + Sync + 'static,
{
    type Output = Result<Response>;

    async fn call(&self, mut req: Request) -> Self::Output {
        req.set_state(self.state.clone());
        let output = self.inner.call(req).await?;
        Ok(output.into_response())
    }
}
