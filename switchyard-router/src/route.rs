//! Route

use core::fmt;

use switchyard_core::{
    BoxHandler, Handler, HandlerExt, Method, Next, Request, Response, Result, Transform,
};

use crate::{Action, IntoAction, VERBS};

macro_rules! export_internal_verb {
    ($name:ident $verb:tt) => {
        #[doc = concat!(" Appends an action by the HTTP `", stringify!($verb), "` verb into the route.")]
        #[must_use]
        pub fn $name<A>(self, action: A) -> Self
        where
            A: IntoAction,
        {
            self.on(Method::$verb, action)
        }
    };
}

macro_rules! export_verb {
    ($name:ident $verb:ty) => {
        #[doc = concat!(" Creates a route with an action and HTTP `", stringify!($verb), "` verb pair.")]
        #[must_use]
        pub fn $name<A>(action: A) -> Route
        where
            A: IntoAction,
        {
            Route::new().$name(action)
        }
    };
}

/// A collection of verb-action pairs registered at one path.
#[derive(Clone, Default)]
pub struct Route {
    pub(crate) methods: Vec<(Method, Action)>,
}

impl Route {
    /// A route without actions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            methods: Vec::new(),
        }
    }

    /// Appends a HTTP verb and action pair into the route.
    ///
    /// A later action for the same verb replaces the earlier one.
    #[must_use]
    pub fn push(mut self, method: Method, action: Action) -> Self {
        match self
            .methods
            .iter_mut()
            .find(|(m, _)| m == method)
            .map(|(_, e)| e)
        {
            Some(a) => *a = action,
            None => self.methods.push((method, action)),
        }

        self
    }

    /// Appends an action by the specified HTTP verb into the route.
    #[must_use]
    pub fn on<A>(self, method: Method, action: A) -> Self
    where
        A: IntoAction,
    {
        self.push(method, action.into_action())
    }

    /// Appends an action by the `GET` verb, answering `HEAD` requests too.
    #[must_use]
    pub fn get<A>(self, action: A) -> Self
    where
        A: IntoAction,
    {
        let action = action.into_action();
        self.push(Method::GET, action.clone())
            .push(Method::HEAD, action)
    }

    /// Appends an action by every verb in [`VERBS`] into the route.
    #[must_use]
    pub fn any<A>(self, action: A) -> Self
    where
        A: IntoAction,
    {
        let action = action.into_action();
        VERBS
            .into_iter()
            .fold(self, |route, method| route.push(method, action.clone()))
    }

    repeat!(
        export_internal_verb
        post POST
        put PUT
        patch PATCH
        delete DELETE
        head HEAD
        options OPTIONS
    );

    /// The verbs registered on the route.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().map(|(m, _)| m)
    }

    /// Rewrites the handler of every action, keeping controller actions tagged.
    #[must_use]
    pub fn map_handler<F>(self, f: F) -> Self
    where
        F: Fn(BoxHandler) -> BoxHandler,
    {
        self.into_iter()
            .map(|(method, action)| (method, action.map(&f)))
            .collect()
    }

    /// Wraps every action with a [`Transform`].
    #[must_use]
    pub fn with<T>(self, t: T) -> Self
    where
        T: Transform<BoxHandler>,
        T::Output: Handler<Request, Output = Result<Response>>,
    {
        self.map_handler(|handler| t.transform(handler).boxed())
    }

    /// Adds a middleware for the route.
    #[must_use]
    pub fn with_handler<H>(self, f: H) -> Self
    where
        H: Handler<Next<Request, BoxHandler>, Output = Result<Response>> + Clone,
    {
        self.map_handler(|handler| handler.around(f.clone()).boxed())
    }
}

impl IntoIterator for Route {
    type Item = (Method, Action);

    type IntoIter = std::vec::IntoIter<(Method, Action)>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.into_iter()
    }
}

impl FromIterator<(Method, Action)> for Route {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (Method, Action)>,
    {
        iter.into_iter()
            .fold(Self::new(), |route, (method, action)| route.push(method, action))
    }
}

/// Creates a route with an action and HTTP verb pair.
pub fn on<A>(method: Method, action: A) -> Route
where
    A: IntoAction,
{
    Route::new().on(method, action)
}

repeat!(
    export_verb
    get GET
    post POST
    put PUT
    patch PATCH
    delete DELETE
    head HEAD
    options OPTIONS
);

/// Creates a route with an action and every verb in [`VERBS`].
pub fn any<A>(action: A) -> Route
where
    A: IntoAction,
{
    Route::new().any(action)
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods().collect::<Vec<&Method>>())
            .finish()
    }
}
