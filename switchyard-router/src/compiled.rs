use std::sync::Arc;

use switchyard_core::{types::RouteInfo, IntoResponse, Method, Response, Uri};

/// How the action of a route finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The action returned a response.
    Completed,
    /// The action answered early with an [`Error::Responder`][switchyard_core::Error::Responder].
    ShortCircuited,
}

/// The result of dispatching a matched route.
#[derive(Debug)]
pub struct CompiledRoute {
    pub(crate) route: Arc<RouteInfo>,
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) outcome: Outcome,
    pub(crate) response: Response,
}

impl CompiledRoute {
    /// The matched route with its bound parameters.
    #[must_use]
    pub fn route(&self) -> &Arc<RouteInfo> {
        &self.route
    }

    /// The method of the request.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// The URI of the request.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// How the action finished.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns `true` if the action answered early.
    #[must_use]
    pub fn is_short_circuited(&self) -> bool {
        self.outcome == Outcome::ShortCircuited
    }

    /// The produced response.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }
}

impl IntoResponse for CompiledRoute {
    fn into_response(self) -> Response {
        self.response
    }
}
