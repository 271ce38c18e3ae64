mod de;

use std::{fmt::Display, str::FromStr};

use serde::de::DeserializeOwned;

use crate::{
    async_trait, Error, FromRequest, IntoResponse, Request, RequestExt, Response, StatusCode,
    ThisError,
};

pub(crate) use de::PathDeserializer;

/// The parameters captured by the matched route.
///
/// As an extractor, `Params<T>` deserializes them into `T`; see [`RequestExt::params`].
/// Without a type argument it holds the raw `(name, value)` pairs in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<T = Vec<(String, String)>>(pub T);

wrapper!(Params);

impl<'a> From<Vec<(&'a str, &'a str)>> for Params {
    fn from(pairs: Vec<(&'a str, &'a str)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Params {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .collect(),
        )
    }
}

impl Params {
    /// Parses the parameter called `name`.
    ///
    /// # Errors
    ///
    /// [`ParamsError::SingleParse`] when it is missing or does not parse.
    pub fn find<T>(&self, name: &str) -> Result<T, ParamsError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some((_, value)) = self.iter().find(|(n, _)| n == name) else {
            return Err(ParamsError::SingleParse(format!("missing `{name}` param")));
        };
        value
            .parse()
            .map_err(|e: T::Err| ParamsError::SingleParse(format!("`{name}`: {e}")))
    }

    /// Drops the params which did not capture anything, e.g. an unmatched optional segment.
    #[must_use]
    pub fn without_empty(mut self) -> Self {
        self.0.retain(|(_, value)| !value.is_empty());
        self
    }
}

#[async_trait]
impl<T> FromRequest for Params<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Error = ParamsError;

    async fn extract(req: &mut Request) -> Result<Self, Self::Error> {
        req.params().map(Params)
    }
}

/// Why route parameters could not be bound.
#[derive(ThisError, Debug)]
pub enum ParamsError {
    /// A named parameter is missing or does not parse. `400`
    #[error("{}", .0)]
    SingleParse(String),
    /// The parameters do not deserialize into the requested type. `400`
    #[error(transparent)]
    Parse(#[from] serde::de::value::Error),
    /// The request was not dispatched through a route. `500`
    #[error("params is empty")]
    Empty,
}

impl IntoResponse for ParamsError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Empty => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SingleParse(_) | Self::Parse(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

/// Rejections short-circuit with their response.
impl From<ParamsError> for Error {
    fn from(e: ParamsError) -> Self {
        e.into_error()
    }
}
