use std::sync::Arc;

use crate::{async_trait, types::Params, FromRequest, Request, RequestExt, StatusCode};

/// The route a request was dispatched through.
///
/// The route compiler attaches it to the request as `Arc<RouteInfo>`, with the
/// parameters that did not capture anything already dropped.
#[derive(Clone, Debug)]
pub struct RouteInfo {
    /// Unique among the routes of a collection.
    pub id: usize,
    /// The pattern as registered, e.g. `/users/:id/:slug?`.
    pub pattern: String,
    /// Captured parameters in pattern order, percent-decoded.
    pub params: Params,
}

#[async_trait]
impl FromRequest for Arc<RouteInfo> {
    type Error = StatusCode;

    async fn extract(req: &mut Request) -> Result<Self, Self::Error> {
        req.route_info()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
