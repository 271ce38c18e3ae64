use serde::{de::DeserializeOwned, Serialize};

use crate::{
    async_trait, types::PayloadError, FromRequest, IntoResponse, Request, RequestExt, Response,
    ResponseExt,
};

/// A JSON request body as an extractor, or a JSON response body as a return value.
#[derive(Clone, Debug, Default)]
pub struct Json<T = ()>(pub T);

wrapper!(Json);

#[async_trait]
impl<T> FromRequest for Json<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Error = PayloadError;

    async fn extract(req: &mut Request) -> Result<Self, Self::Error> {
        req.json().await.map(Self)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Response::json(self.0).into_response()
    }
}
