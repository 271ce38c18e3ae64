use crate::{async_trait, IntoResponse, Request};

/// A value an action can take as an argument, built from the [`Request`].
///
/// Handler arguments are resolved through this trait, in declaration order.
#[async_trait]
pub trait FromRequest: Sized {
    /// The rejection, sent as the response when extraction fails.
    type Error: IntoResponse;

    /// Builds the value, or rejects the request with a response.
    async fn extract(req: &mut Request) -> Result<Self, Self::Error>;
}

/// Never rejects; `None` when `T` would.
#[async_trait]
impl<T> FromRequest for Option<T>
where
    T: FromRequest + Send + 'static,
{
    type Error = std::convert::Infallible;

    async fn extract(req: &mut Request) -> Result<Self, Self::Error> {
        Ok(T::extract(req).await.ok())
    }
}

/// Never rejects; hands `T`'s rejection to the action instead.
#[async_trait]
impl<T> FromRequest for Result<T, T::Error>
where
    T: FromRequest + Send + 'static,
    T::Error: Send + 'static,
{
    type Error = std::convert::Infallible;

    async fn extract(req: &mut Request) -> Result<Self, Self::Error> {
        Ok(T::extract(req).await)
    }
}
