use std::{convert::Infallible, future::Future, pin::Pin, sync::Arc};

use tracing::{debug, trace};

use crate::{
    header::{self, HeaderValue},
    Incoming, IncomingBody, IntoResponse, Method, Request, Response, RouteCollection,
    RouteCompiler, StatusCode,
};

/// Handles the HTTP [`Request`] and returns the HTTP [`Response`].
#[derive(Debug)]
pub struct Responder<A> {
    routes: Arc<RouteCollection>,
    addr: Option<A>,
}

impl<A> Clone for Responder<A>
where
    A: Clone,
{
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            addr: self.addr.clone(),
        }
    }
}

impl<A> Responder<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// A responder for one connection, tagging its requests with `addr`.
    #[must_use]
    pub const fn new(routes: Arc<RouteCollection>, addr: Option<A>) -> Self {
        Self { routes, addr }
    }

    /// Dispatches one request through the route collection.
    ///
    /// An unknown path answers `404`, a path registered under other verbs answers `405` with
    /// the `Allow` header, and an error escaping the action is rendered through
    /// [`IntoResponse`].
    pub async fn serve(
        mut req: Request,
        routes: Arc<RouteCollection>,
        addr: Option<A>,
    ) -> Response {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let Some((action, route)) = routes.find(&method, &path) else {
            return Self::unmatched(&routes, &method, &path);
        };

        if let Some(addr) = addr {
            req.extensions_mut().insert(addr);
        }

        match RouteCompiler::new(action, route, req).compile().await {
            Ok(compiled) => compiled.into_response(),
            Err(e) => {
                debug!(%method, path = %path, "action failed: {e}");
                e.into_response()
            }
        }
    }

    fn unmatched(routes: &RouteCollection, method: &Method, path: &str) -> Response {
        let allowed = routes.allowed(path);
        if allowed.is_empty() {
            trace!(%method, path, "no route matched");
            return StatusCode::NOT_FOUND.into_response();
        }

        trace!(%method, path, ?allowed, "method not allowed");
        let mut resp = StatusCode::METHOD_NOT_ALLOWED.into_response();
        let allow = allowed
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if let Ok(allow) = HeaderValue::from_str(&allow) {
            resp.headers_mut().insert(header::ALLOW, allow);
        }
        resp
    }
}

impl<A> hyper::service::Service<Request<Incoming>> for Responder<A>
where
    A: Clone + Send + Sync + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let routes = self.routes.clone();
        let addr = self.addr.clone();
        Box::pin(async move { Ok(Self::serve(req.map(IncomingBody::from), routes, addr).await) })
    }
}

#[cfg(test)]
#[allow(clippy::unused_async)]
mod tests {
    use std::sync::Arc;

    use http_body_util::BodyExt;

    use super::Responder;
    use crate::{
        header, Error, IntoResponse, Method, Request, RequestExt, Response, ResponseExt, Result,
        RouteCollection, Router, StatusCode,
    };

    fn request(method: Method, uri: &str) -> anyhow::Result<Request> {
        Ok(Request::builder()
            .method(method)
            .uri(uri)
            .body(Default::default())?)
    }

    #[tokio::test]
    async fn serve() -> anyhow::Result<()> {
        async fn index(req: Request) -> Result<String> {
            Ok(format!("index {}", req.remote_addr().map_or(0, |a| a.port())))
        }

        async fn create(_: Request) -> Result<Response> {
            Err((StatusCode::CONFLICT, "exists").into_error())
        }

        async fn failed(_: Request) -> Result<&'static str> {
            Err(Error::boxed(std::io::Error::other("database is down")))
        }

        let routes = Arc::new(RouteCollection::from(
            Router::new()
                .get("/", index)
                .post("/items", create)
                .put("/items", failed),
        ));
        let addr = Some(std::net::SocketAddr::from(([127, 0, 0, 1], 8080)));

        let resp = Responder::serve(request(Method::GET, "/")?, routes.clone(), addr).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.into_body().collect().await?.to_bytes(), "index 8080");

        let resp = Responder::serve(request(Method::HEAD, "/")?, routes.clone(), addr).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.content_length(), Some(10));
        assert!(resp.into_body().collect().await?.to_bytes().is_empty());

        let resp = Responder::serve(request(Method::POST, "/items")?, routes.clone(), addr).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(resp.into_body().collect().await?.to_bytes(), "exists");

        let resp = Responder::serve(request(Method::PUT, "/items")?, routes.clone(), addr).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.into_body().collect().await?.to_bytes(), "database is down");

        let resp = Responder::serve(request(Method::DELETE, "/items")?, routes.clone(), addr).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[header::ALLOW], "POST, PUT");

        let resp = Responder::serve(request(Method::GET, "/missing")?, routes, addr).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn redirect() -> anyhow::Result<()> {
        async fn old(_: Request) -> Result<&'static str> {
            Err(Response::permanent("/new").into_error())
        }

        let routes = Arc::new(RouteCollection::from(Router::new().get("/old", old)));
        let resp =
            Responder::<()>::serve(request(Method::GET, "/old")?, routes, None).await;
        assert_eq!(resp.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(resp.headers()[header::LOCATION], "/new");

        Ok(())
    }
}
