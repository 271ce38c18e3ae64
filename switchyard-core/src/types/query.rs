use serde::de::DeserializeOwned;

use crate::{async_trait, types::PayloadError, FromRequest, Request, RequestExt};

/// The query string of the request URI, decoded into `T`.
///
/// A missing query string decodes as an empty one, so a struct of `Option` fields
/// always extracts.
#[derive(Clone, Debug, Default)]
pub struct Query<T = ()>(pub T);

wrapper!(Query);

#[async_trait]
impl<T> FromRequest for Query<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Error = PayloadError;

    async fn extract(req: &mut Request) -> Result<Self, Self::Error> {
        req.query().map(Self)
    }
}
