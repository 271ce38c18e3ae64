//! Resources

use switchyard_core::{
    BoxHandler, Handler, HandlerExt, Method, Next, Request, Response, Result, Transform,
};

use crate::{Action, IntoAction, Route};

/// The path shape of a resourceful action.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Kind {
    /// index | create
    Empty,
    /// new: `new`
    New,
    /// show | update | destroy: `:{name}_id`
    Id,
    /// edit: `:{name}_id/edit`
    Edit,
    Custom(String),
}

/// A resourceful route maps the conventional controller actions onto HTTP verbs and paths.
///
/// | action    | verb        | path                |
/// |-----------|-------------|---------------------|
/// | `index`   | `GET`       | `/`                 |
/// | `new`     | `GET`       | `/new`              |
/// | `create`  | `POST`      | `/`                 |
/// | `show`    | `GET`       | `/:{name}_id`       |
/// | `edit`    | `GET`       | `/:{name}_id/edit`  |
/// | `update`  | `PUT`       | `/:{name}_id`       |
/// | `destroy` | `DELETE`    | `/:{name}_id`       |
#[derive(Clone, Debug, Default)]
pub struct Resources {
    name: String,
    singular: bool,
    routes: Vec<(Kind, Route)>,
}

impl Resources {
    /// Sets the name used for the `:{name}_id` parameter.
    #[must_use]
    pub fn named<S>(mut self, name: S) -> Self
    where
        S: AsRef<str>,
    {
        name.as_ref().clone_into(&mut self.name);
        self
    }

    /// A singular resource: member routes carry no `:{name}_id` segment.
    #[must_use]
    pub const fn singular(mut self) -> Self {
        self.singular = true;
        self
    }

    fn entry(mut self, kind: Kind, route: Route) -> Self {
        match self
            .routes
            .iter_mut()
            .find(|(k, _)| k == &kind)
            .map(|(_, r)| r)
        {
            Some(r) => *r = route.into_iter().fold(r.clone(), |r, (m, a)| r.push(m, a)),
            None => self.routes.push((kind, route)),
        }
        self
    }

    /// Adds a custom route under the resource path.
    #[must_use]
    pub fn route<S>(self, path: S, route: Route) -> Self
    where
        S: AsRef<str>,
    {
        self.entry(Kind::Custom(path.as_ref().to_owned()), route)
    }

    fn on(self, kind: Kind, method: Method, action: Action) -> Self {
        self.entry(kind, Route::new().push(method, action))
    }

    /// `GET` the collection.
    #[must_use]
    pub fn index<A: IntoAction>(self, action: A) -> Self {
        self.entry(Kind::Empty, Route::new().get(action))
    }

    /// Returns an HTML form for creating the resources.
    #[must_use]
    pub fn new<A: IntoAction>(self, action: A) -> Self {
        self.entry(Kind::New, Route::new().get(action))
    }

    /// `POST` to the collection.
    #[must_use]
    pub fn create<A: IntoAction>(self, action: A) -> Self {
        self.on(Kind::Empty, Method::POST, action.into_action())
    }

    /// `GET` one member.
    #[must_use]
    pub fn show<A: IntoAction>(self, action: A) -> Self {
        self.entry(Kind::Id, Route::new().get(action))
    }

    /// Returns an HTML form for editing the resources.
    #[must_use]
    pub fn edit<A: IntoAction>(self, action: A) -> Self {
        self.entry(Kind::Edit, Route::new().get(action))
    }

    /// `PUT` one member.
    #[must_use]
    pub fn update<A: IntoAction>(self, action: A) -> Self {
        self.on(Kind::Id, Method::PUT, action.into_action())
    }

    /// `PATCH` one member.
    #[must_use]
    pub fn update_with_patch<A: IntoAction>(self, action: A) -> Self {
        self.on(Kind::Id, Method::PATCH, action.into_action())
    }

    /// `DELETE` one member.
    #[must_use]
    pub fn destroy<A: IntoAction>(self, action: A) -> Self {
        self.on(Kind::Id, Method::DELETE, action.into_action())
    }

    /// Rewrites the handler of every action, keeping controller actions tagged.
    #[must_use]
    pub fn map_handler<F>(self, f: F) -> Self
    where
        F: Fn(BoxHandler) -> BoxHandler,
    {
        Self {
            routes: self
                .routes
                .into_iter()
                .map(|(kind, route)| (kind, route.map_handler(&f)))
                .collect(),
            ..self
        }
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

    /// Wraps every action with an `around` middleware function.
    #[must_use]
    pub fn with_handler<H>(self, f: H) -> Self
    where
        H: Handler<Next<Request, BoxHandler>, Output = Result<Response>> + Clone,
    {
        self.map_handler(|handler| handler.around(f.clone()).boxed())
    }
}

impl IntoIterator for Resources {
    type Item = (String, Route);

    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        let Self {
            name,
            singular,
            routes,
        } = self;

        routes
            .into_iter()
            .map(|(kind, route)| {
                let path = match kind {
                    Kind::Empty => String::new(),
                    Kind::New => "new".to_string(),
                    Kind::Id if singular => String::new(),
                    Kind::Id => format!(":{name}_id"),
                    Kind::Edit if singular => "edit".to_string(),
                    Kind::Edit => format!(":{name}_id/edit"),
                    Kind::Custom(path) => path,
                };
                (path, route)
            })
            .collect::<Vec<_>>()
            .into_iter()
    }
}
