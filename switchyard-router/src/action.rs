//! Action

use core::fmt;

use switchyard_core::{BoxHandler, Handler, HandlerExt, IntoResponse, Request, Response, Result};

use crate::ControllerAction;

/// The target of a route: a plain handler or a method bound on a controller.
#[derive(Clone)]
pub enum Action {
    /// A closure or an async function.
    Callable(BoxHandler),
    /// A method bound on a shared controller instance.
    Controller(ControllerAction),
}

impl Action {
    /// Creates a callable action from a handler.
    pub fn callable<H, O>(handler: H) -> Self
    where
        H: Handler<Request, Output = Result<O>> + Clone,
        O: IntoResponse + Send + 'static,
    {
        Self::Callable(handler.map_into_response().boxed())
    }

    /// Returns `true` if the action is a controller method.
    #[must_use]
    pub const fn is_controller(&self) -> bool {
        matches!(self, Self::Controller(_))
    }

    /// The controller action, if any.
    #[must_use]
    pub const fn controller(&self) -> Option<&ControllerAction> {
        match self {
            Self::Controller(c) => Some(c),
            Self::Callable(_) => None,
        }
    }

    /// The handler which runs when the action is called.
    #[must_use]
    pub const fn handler(&self) -> &BoxHandler {
        match self {
            Self::Callable(h) => h,
            Self::Controller(c) => c.handler(),
        }
    }

    /// Maps the inner handler, keeping the kind of the action.
    #[must_use]
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(BoxHandler) -> BoxHandler,
    {
        match self {
            Self::Callable(h) => Self::Callable(f(h)),
            Self::Controller(c) => Self::Controller(c.map(f)),
        }
    }

    /// Invokes the action with the request.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying handler fails with, including
    /// [`Error::Responder`][switchyard_core::Error::Responder] short-circuits.
    pub async fn call(&self, req: Request) -> Result<Response> {
        self.handler().call(req).await
    }
}

impl From<BoxHandler> for Action {
    fn from(handler: BoxHandler) -> Self {
        Self::Callable(handler)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable"),
            Self::Controller(c) => f.debug_tuple("Controller").field(c).finish(),
        }
    }
}

/// Converts a value into an [`Action`].
///
/// Every handler returning `Result<impl IntoResponse>` is a callable action; an [`Action`]
/// converts into itself, so controller actions keep their kind.
pub trait IntoAction {
    /// Performs the conversion.
    fn into_action(self) -> Action;
}

impl<H, O> IntoAction for H
where
    H: Handler<Request, Output = Result<O>> + Clone,
    O: IntoResponse + Send + 'static,
{
    fn into_action(self) -> Action {
        Action::callable(self)
    }
}

impl IntoAction for Action {
    fn into_action(self) -> Action {
        self
    }
}
