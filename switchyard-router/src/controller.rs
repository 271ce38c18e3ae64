//! Controller

use std::{any::type_name, fmt, future::Future, sync::Arc};

use switchyard_core::{
    async_trait, BoxHandler, Handler, HandlerExt, IntoResponse, Next, Request, Response, Result,
};
use tracing::trace;

use crate::Action;

/// A shared instance whose methods serve as route actions.
///
/// Every action bound with [`action`] runs through [`Controller::call_action`], so a
/// controller can wrap all of its methods in one place: authorization, per-controller
/// logging, or answering early with [`Error::Responder`][switchyard_core::Error::Responder].
///
/// ```
/// use std::sync::Arc;
/// use switchyard_core::{Request, Result};
/// use switchyard_router::{action, Controller, Router};
///
/// struct Users;
///
/// impl Controller for Users {}
///
/// impl Users {
///     async fn index(self: Arc<Self>, _: Request) -> Result<&'static str> {
///         Ok("users")
///     }
/// }
///
/// let users = Arc::new(Users);
/// let router = Router::new().get("/users", action(users, "index", Users::index));
/// ```
#[async_trait]
pub trait Controller: Send + Sync + 'static {
    /// Runs the named action of this controller.
    ///
    /// The default simply calls the bound method.
    async fn call_action(
        &self,
        name: &'static str,
        next: Next<Request, BoxHandler>,
    ) -> Result<Response> {
        let (req, method) = next;
        trace!(action = name, "calling controller action");
        method.call(req).await
    }
}

/// A method bound on a controller, keeping the names for introspection.
#[derive(Clone)]
pub struct ControllerAction {
    controller: &'static str,
    method: &'static str,
    handler: BoxHandler,
}

impl ControllerAction {
    /// The type name of the controller.
    #[must_use]
    pub const fn controller(&self) -> &'static str {
        self.controller
    }

    /// The name of the bound method.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        self.method
    }

    pub(crate) const fn handler(&self) -> &BoxHandler {
        &self.handler
    }

    pub(crate) fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(BoxHandler) -> BoxHandler,
    {
        Self {
            handler: f(self.handler),
            ..self
        }
    }
}

impl fmt::Debug for ControllerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerAction")
            .field("controller", &self.controller)
            .field("method", &self.method)
            .finish()
    }
}

/// Binds `method` on `controller` as a route action named `name`.
pub fn action<C, F, Fut, O>(controller: Arc<C>, name: &'static str, method: F) -> Action
where
    C: Controller,
    F: Fn(Arc<C>, Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<O>> + Send + 'static,
    O: IntoResponse + Send + 'static,
{
    Action::Controller(ControllerAction {
        controller: type_name::<C>(),
        method: name,
        handler: Dispatch {
            controller,
            name,
            method,
        }
        .boxed(),
    })
}

struct Dispatch<C, F> {
    controller: Arc<C>,
    name: &'static str,
    method: F,
}

impl<C, F> Clone for Dispatch<C, F>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            name: self.name,
            method: self.method.clone(),
        }
    }
}

#[async_trait]
impl<C, F, Fut, O> Handler<Request> for Dispatch<C, F>
where
    C: Controller,
    F: Fn(Arc<C>, Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<O>> + Send + 'static,
    O: IntoResponse + Send + 'static,
{
    type Output = Result<Response>;

    async fn call(&self, req: Request) -> Self::Output {
        let controller = self.controller.clone();
        let method = self.method.clone();
        let bound = move |req: Request| {
            let fut = method(controller.clone(), req);
            async move { fut.await.map(IntoResponse::into_response) }
        };
        self.controller
            .call_action(self.name, (req, bound.boxed()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use http_body_util::BodyExt;
    use switchyard_core::{
        async_trait, header::HeaderValue, BoxHandler, Error, Handler, Next, Request, RequestExt,
        Response, Result, StatusCode,
    };

    use super::{action, Controller};

    #[derive(Default)]
    struct Counter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Controller for Counter {
        async fn call_action(
            &self,
            name: &'static str,
            (req, method): Next<Request, BoxHandler>,
        ) -> Result<Response> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if req.header::<_, String>("x-deny").is_some() {
                return Err(Error::responder(StatusCode::FORBIDDEN));
            }
            let mut resp = method.call(req).await?;
            resp.headers_mut()
                .insert("x-action", HeaderValue::from_static(name));
            Ok(resp)
        }
    }

    impl Counter {
        async fn show(self: Arc<Self>, _: Request) -> Result<String> {
            Ok(format!("calls {}", self.calls.load(Ordering::SeqCst)))
        }
    }

    #[tokio::test]
    async fn dispatches_through_hook() -> anyhow::Result<()> {
        let counter = Arc::new(Counter::default());
        let show = action(counter.clone(), "show", Counter::show);

        assert!(show.is_controller());
        let bound = show.controller().map(|c| (c.controller(), c.method()));
        assert_eq!(bound.map(|b| b.1), Some("show"));
        assert!(bound.is_some_and(|b| b.0.ends_with("Counter")));

        let resp = show.call(Request::default()).await?;
        assert_eq!(resp.headers()["x-action"], "show");
        assert_eq!(resp.into_body().collect().await?.to_bytes(), "calls 1");

        let req = Request::builder()
            .header("x-deny", "1")
            .body(Default::default())?;
        let err = show.call(req).await.err();
        assert!(err.as_ref().is_some_and(Error::is_responder));
        assert_eq!(counter.calls.load(Ordering::SeqCst), 2);

        Ok(())
    }

    #[tokio::test]
    async fn default_hook_calls_method() -> anyhow::Result<()> {
        struct Plain;

        impl Controller for Plain {}

        impl Plain {
            async fn hello(self: Arc<Self>, req: Request) -> Result<String> {
                Ok(format!("hello {}", req.path()))
            }
        }

        let hello = action(Arc::new(Plain), "hello", Plain::hello);
        let req = Request::builder().uri("/plain").body(Default::default())?;
        let resp = hello.call(req).await?;
        assert_eq!(resp.into_body().collect().await?.to_bytes(), "hello /plain");

        Ok(())
    }
}
