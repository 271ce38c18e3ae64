use switchyard_core::{
    BoxHandler, Handler, HandlerExt, Method, Next, Request, Response, Result, Transform,
};

use crate::{IntoAction, Resources, Route};

/// The verbs registered by [`Router::any`] and [`Route::any`].
pub const VERBS: [Method; 7] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

macro_rules! export_verb {
    ($name:ident $verb:ty) => {
        #[doc = concat!(" Adds an action with a path and HTTP `", stringify!($verb), "` verb pair.")]
        #[must_use]
        pub fn $name<S, A>(self, path: S, action: A) -> Self
        where
            S: AsRef<str>,
            A: IntoAction,
        {
            self.route(path, Route::new().$name(action))
        }
    };
}

/// A routes collection, built up before serving.
#[derive(Clone, Debug, Default)]
pub struct Router {
    pub(crate) routes: Option<Vec<(String, Route)>>,
}

impl Router {
    /// A router without routes.
    #[must_use]
    pub fn new() -> Self {
        Self { routes: None }
    }

    fn push<S>(routes: &mut Vec<(String, Route)>, path: S, route: Route)
    where
        S: AsRef<str>,
    {
        let path = path.as_ref();
        match routes
            .iter_mut()
            .find_map(|(p, r)| if p == path { Some(r) } else { None })
        {
            Some(r) => {
                *r = route
                    .into_iter()
                    .fold(r.clone(), |or, (method, action)| or.push(method, action));
            }
            None => routes.push((path.to_string(), route)),
        }
    }

    /// Registers a prebuilt [`Route`], merging it with one already at `path`.
    ///
    /// Registering the same path again merges the verbs.
    #[must_use]
    pub fn route<S>(mut self, path: S, route: Route) -> Self
    where
        S: AsRef<str>,
    {
        Self::push(
            self.routes.get_or_insert_with(Vec::new),
            path.as_ref().trim_start_matches('/'),
            route,
        );
        self
    }

    /// Mounts resourceful routes under `path`.
    #[must_use]
    pub fn resources<S>(self, path: S, resource: Resources) -> Self
    where
        S: AsRef<str>,
    {
        Self::mount(self, path.as_ref(), resource)
    }

    /// Mounts every route of `router` under the `path` prefix.
    #[must_use]
    pub fn nest<S>(self, path: S, router: Self) -> Self
    where
        S: AsRef<str>,
    {
        Self::mount(self, path.as_ref(), router.routes.unwrap_or_default())
    }

    fn mount<I>(self, prefix: &str, routes: I) -> Self
    where
        I: IntoIterator<Item = (String, Route)>,
    {
        let mut prefix = prefix.to_string();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }

        routes.into_iter().fold(self, |router, (sp, route)| {
            let mut path = prefix.clone() + &sp;
            if sp.is_empty() {
                path = path.trim_end_matches('/').to_string();
            }
            router.route(path, route)
        })
    }

    /// Adds an action with a path and the HTTP `GET` verb, answering `HEAD` too.
    #[must_use]
    pub fn get<S, A>(self, path: S, action: A) -> Self
    where
        S: AsRef<str>,
        A: IntoAction,
    {
        self.route(path, Route::new().get(action))
    }

    repeat!(
        export_verb
        post POST
        put PUT
        patch PATCH
        delete DELETE
        head HEAD
        options OPTIONS
    );

    /// Adds an action with a path and every verb in [`VERBS`].
    #[must_use]
    pub fn any<S, A>(self, path: S, action: A) -> Self
    where
        S: AsRef<str>,
        A: IntoAction,
    {
        self.route(path, Route::new().any(action))
    }

    /// Rewrites the handler of every action, keeping controller actions tagged.
    #[must_use]
    pub fn map_handler<F>(self, f: F) -> Self
    where
        F: Fn(BoxHandler) -> BoxHandler,
    {
        Self {
            routes: self.routes.map(|routes| {
                routes
                    .into_iter()
                    .map(|(path, route)| (path, route.map_handler(&f)))
                    .collect()
            }),
        }
    }

    /// Wraps every action registered so far with a [`Transform`].
    #[must_use]
    pub fn with<T>(self, t: T) -> Self
    where
        T: Transform<BoxHandler>,
        T::Output: Handler<Request, Output = Result<Response>>,
    {
        self.map_handler(|handler| t.transform(handler).boxed())
    }

    /// Wraps every action registered so far with an `around` middleware function.
    #[must_use]
    pub fn with_handler<F>(self, f: F) -> Self
    where
        F: Handler<Next<Request, BoxHandler>, Output = Result<Response>> + Clone,
    {
        self.map_handler(|handler| handler.around(f.clone()).boxed())
    }
}

#[cfg(test)]
#[allow(clippy::unused_async)]
mod tests {
    use std::sync::Arc;

    use http_body_util::BodyExt;
    use switchyard_core::{
        BoxHandler, Handler, IntoResponse, Method, Next, Request, RequestExt, Response, Result,
        StatusCode,
    };

    use crate::{action, get, Controller, Resources, Route, RouteCollection, Router};

    fn paths(router: &Router) -> Vec<(&str, Vec<&Method>)> {
        router
            .routes
            .iter()
            .flatten()
            .map(|(p, r)| (p.as_str(), r.methods().collect()))
            .collect()
    }

    #[test]
    fn registration() {
        async fn index(_: Request) -> Result<&'static str> {
            Ok("index")
        }

        let router = Router::new()
            .get("/", index)
            .post("/posts", index)
            .get("posts", index)
            .route("/posts", get(index).delete(index))
            .options("posts/:id", index);

        assert_eq!(
            paths(&router),
            vec![
                ("", vec![&Method::GET, &Method::HEAD]),
                (
                    "posts",
                    vec![&Method::POST, &Method::GET, &Method::HEAD, &Method::DELETE]
                ),
                ("posts/:id", vec![&Method::OPTIONS]),
            ]
        );
    }

    #[test]
    fn nest_and_resources() {
        async fn index(_: Request) -> Result<&'static str> {
            Ok("index")
        }

        let users = Resources::default()
            .named("user")
            .index(index)
            .show(index)
            .edit(index);

        let router = Router::new()
            .nest("api", Router::new().get("/", index).resources("users", users))
            .nest("/empty/", Router::new());

        assert_eq!(
            paths(&router)
                .into_iter()
                .map(|(p, _)| p)
                .collect::<Vec<_>>(),
            vec!["api", "api/users", "api/users/:user_id", "api/users/:user_id/edit"]
        );
    }

    #[tokio::test]
    async fn middleware_wraps_every_action() -> anyhow::Result<()> {
        async fn index(_: Request) -> Result<&'static str> {
            Ok("index")
        }

        async fn guard((req, handler): Next<Request, BoxHandler>) -> Result<Response> {
            if req.query_string() == Some("deny") {
                return Ok(StatusCode::UNAUTHORIZED.into_response());
            }
            handler.call(req).await
        }

        struct Pages;

        impl Controller for Pages {}

        impl Pages {
            async fn about(self: Arc<Self>, _: Request) -> Result<&'static str> {
                Ok("about")
            }
        }

        let router = Router::new()
            .get("/", index)
            .get("/about", action(Arc::new(Pages), "about", Pages::about))
            .with_handler(guard);
        let routes = RouteCollection::from(router);

        let (about, _) = routes
            .find(&Method::GET, "/about")
            .ok_or_else(|| anyhow::anyhow!("missing /about"))?;
        assert!(about.is_controller());

        let req = Request::builder().uri("/about?deny").body(Default::default())?;
        assert_eq!(about.call(req).await?.status(), StatusCode::UNAUTHORIZED);

        let (index, _) = routes
            .find(&Method::HEAD, "/")
            .ok_or_else(|| anyhow::anyhow!("missing HEAD /"))?;
        let resp = index.call(Request::default()).await?;
        assert_eq!(resp.into_body().collect().await?.to_bytes(), "index");

        Ok(())
    }

    #[test]
    fn route_helpers() {
        async fn index(_: Request) -> Result<&'static str> {
            Ok("index")
        }

        let route: Route = vec![(Method::PUT, crate::IntoAction::into_action(index))]
            .into_iter()
            .collect();
        assert_eq!(route.methods().collect::<Vec<_>>(), vec![&Method::PUT]);
    }
}
