use std::sync::Arc;

use switchyard_core::{
    types::{Params, RouteInfo},
    header::{HeaderValue, CONTENT_LENGTH},
    Error, Method, Request, Response, Result,
};
use tracing::debug;

use crate::{Action, CompiledRoute, Outcome};

/// Dispatches a matched [`Action`] and wraps its result into a [`CompiledRoute`].
#[derive(Debug)]
pub struct RouteCompiler<'a> {
    action: &'a Action,
    route: RouteInfo,
    request: Request,
}

impl<'a> RouteCompiler<'a> {
    /// Creates a compiler for the action matched by `route`.
    #[must_use]
    pub const fn new(action: &'a Action, route: RouteInfo, request: Request) -> Self {
        Self {
            action,
            route,
            request,
        }
    }

    /// The matched parameters, without those whose value is empty.
    ///
    /// An optional segment that did not match leaves an empty value behind; such
    /// parameters are never bound to the action.
    #[must_use]
    pub fn parameters_without_empty(&self) -> Params {
        self.route.params.clone().without_empty()
    }

    /// Returns `true` if the matched action is a controller method.
    #[must_use]
    pub const fn is_controller_action(&self) -> bool {
        self.action.is_controller()
    }

    /// Binds the parameters, runs the action and collects its response.
    ///
    /// An [`Error::Responder`] returned by the action is folded into the compiled route as
    /// [`Outcome::ShortCircuited`]. Responses to `HEAD` requests keep their status and headers,
    /// `Content-Length` included, but lose their body.
    ///
    /// # Errors
    ///
    /// Any other error returned by the action.
    pub async fn compile(self) -> Result<CompiledRoute> {
        let params = self.parameters_without_empty();
        let Self {
            action,
            route,
            mut request,
        } = self;

        let route = Arc::new(RouteInfo { params, ..route });
        request.extensions_mut().insert(route.clone());

        let method = request.method().clone();
        let uri = request.uri().clone();

        if let Some(c) = action.controller() {
            debug!(controller = c.controller(), action = c.method(), "dispatching");
        }

        let (outcome, mut response) = match action.call(request).await {
            Ok(response) => (Outcome::Completed, response),
            Err(Error::Responder(response)) => (Outcome::ShortCircuited, *response),
            Err(e) => return Err(e),
        };
        debug!(%method, %uri, status = %response.status(), ?outcome, "route compiled");

        if method == Method::HEAD {
            strip_body(&mut response);
        }

        Ok(CompiledRoute {
            route,
            method,
            uri,
            outcome,
            response,
        })
    }
}

/// Drops the body, recording its length first so `HEAD` reports what `GET` would send.
fn strip_body(response: &mut Response) {
    let body = std::mem::take(response.body_mut());
    if let Some(len) = body.exact_len() {
        response
            .headers_mut()
            .entry(CONTENT_LENGTH)
            .or_insert_with(|| HeaderValue::from(len));
    }
}
