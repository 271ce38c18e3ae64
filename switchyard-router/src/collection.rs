use std::fmt::{Debug, Formatter, Result};

use path_tree::PathTree;
use percent_encoding::percent_decode_str;
use switchyard_core::{
    types::{Params, RouteInfo},
    Method,
};
use tracing::trace;

use crate::{Action, Route, Router};

/// The frozen routes of a [`Router`].
///
/// Each verb has its own path tree. The trees map a path to the index of the
/// registered `(pattern, action)` pair, which doubles as the route id.
#[derive(Default)]
pub struct RouteCollection {
    routes: Vec<(String, Action)>,
    trees: Vec<(Method, PathTree<usize>)>,
}

impl RouteCollection {
    /// Finds the action registered for the verb and the URI's path.
    ///
    /// Returns the action with the matched route: its id, registered pattern and
    /// percent-decoded parameters. A trailing optional parameter that is absent from
    /// the path is not captured at all.
    #[must_use]
    pub fn find(&self, method: &Method, path: &str) -> Option<(&Action, RouteInfo)> {
        let tree = self.tree(method)?;
        let (&id, matched) = tree.find(path)?;
        let (pattern, action) = self.routes.get(id)?;

        let params = matched
            .params()
            .into_iter()
            .map(|(name, value)| (name.to_string(), decode(value)))
            .collect();
        trace!(%method, path, pattern = %pattern, "route matched");

        Some((
            action,
            RouteInfo {
                id,
                pattern: pattern.clone(),
                params: Params(params),
            },
        ))
    }

    /// The verbs with an action registered for the path.
    #[must_use]
    pub fn allowed(&self, path: &str) -> Vec<Method> {
        self.trees
            .iter()
            .filter(|(_, t)| t.find(path).is_some())
            .map(|(m, _)| m.clone())
            .collect()
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn tree(&self, method: &Method) -> Option<&PathTree<usize>> {
        self.trees.iter().find(|(m, _)| m == method).map(|(_, t)| t)
    }

    fn tree_mut(&mut self, method: &Method) -> &mut PathTree<usize> {
        let pos = match self.trees.iter().position(|(m, _)| m == method) {
            Some(pos) => pos,
            None => {
                self.trees.push((method.clone(), PathTree::new()));
                self.trees.len() - 1
            }
        };
        &mut self.trees[pos].1
    }
}

impl From<Router> for RouteCollection {
    fn from(router: Router) -> Self {
        let mut collection = Self::default();
        let mut shortened = Vec::new();

        for (mut path, Route { methods }) in router.routes.into_iter().flatten() {
            if !path.starts_with('/') {
                path.insert(0, '/');
            }
            for (method, action) in methods {
                let index = collection.routes.len();
                let id = collection.tree_mut(&method).insert(&path, index);
                trace!(%method, pattern = %path, id, "route registered");

                for short in without_optional_tail(&path) {
                    shortened.push((method.clone(), short.to_string(), index));
                }
                collection.routes.push((path.clone(), action));
            }
        }

        // `/greet/:name?` only matches `/greet/`, so the shortened forms answer `/greet`
        // too. An explicitly registered route for the same path wins.
        for (method, short, index) in shortened {
            let tree = collection.tree_mut(&method);
            if tree.find(&short).is_none() {
                let _ = tree.insert(&short, index);
            }
        }

        collection
    }
}

impl Debug for RouteCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("RouteCollection")
            .field("verbs", &self.trees.iter().map(|(m, _)| m).collect::<Vec<_>>())
            .field("patterns", &self.routes.iter().map(|(p, _)| p).collect::<Vec<_>>())
            .finish()
    }
}

/// `/users/:id/:slug?` gives `/users/:id`; every trailing optional segment is peeled off.
fn without_optional_tail(pattern: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = pattern;
    while let Some((head, last)) = rest.rsplit_once('/') {
        if !(last.starts_with(':') && last.ends_with('?')) {
            break;
        }
        out.push(if head.is_empty() { "/" } else { head });
        rest = head;
    }
    out
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
#[allow(clippy::unused_async)]
mod tests {
    use switchyard_core::{Method, Request, Result};

    use super::{without_optional_tail, RouteCollection};
    use crate::Router;

    async fn index(_: Request) -> Result<&'static str> {
        Ok("index")
    }

    #[test]
    fn find() {
        let routes = RouteCollection::from(
            Router::new()
                .get("/", index)
                .get("users/:id", index)
                .post("/users/:id/posts/:slug?", index)
                .get("/files/*", index),
        );

        let (_, route) = routes.find(&Method::GET, "/").expect("root");
        assert_eq!(route.pattern, "/");
        assert!(route.params.is_empty());

        let (_, route) = routes.find(&Method::HEAD, "/users/3").expect("head");
        assert_eq!(route.pattern, "/users/:id");
        assert_eq!(route.params.find::<u8>("id").ok(), Some(3));

        let (_, route) = routes.find(&Method::POST, "/users/3/posts/").expect("optional");
        assert_eq!(route.params.clone().without_empty().len(), 1);

        let (_, route) = routes.find(&Method::GET, "/files/a/b.txt").expect("catch-all");
        assert_eq!(route.params.0.last().map(|(_, v)| v.as_str()), Some("a/b.txt"));

        assert!(routes.find(&Method::PUT, "/users/3").is_none());
        assert!(routes.find(&Method::GET, "/missing").is_none());
    }

    #[test]
    fn optional_tail_without_slash() {
        let routes = RouteCollection::from(
            Router::new()
                .get("/greet/:name?", index)
                .get("/users/:id/:slug?", index),
        );

        let (_, route) = routes.find(&Method::GET, "/greet").expect("bare");
        assert_eq!(route.pattern, "/greet/:name?");
        assert!(route.params.clone().without_empty().is_empty());

        let (_, route) = routes.find(&Method::GET, "/greet/ada").expect("named");
        assert_eq!(route.params.find::<String>("name").ok().as_deref(), Some("ada"));

        let (_, route) = routes.find(&Method::GET, "/users/1").expect("without slug");
        assert_eq!(route.pattern, "/users/:id/:slug?");
        assert_eq!(route.params.find::<u8>("id").ok(), Some(1));

        assert_eq!(routes.allowed("/greet"), vec![Method::GET, Method::HEAD]);
    }

    #[test]
    fn explicit_route_wins_over_shortened() {
        async fn list(_: Request) -> Result<&'static str> {
            Ok("list")
        }

        let routes = RouteCollection::from(
            Router::new()
                .get("/posts/:page?", index)
                .get("/posts", list),
        );

        let (_, route) = routes.find(&Method::GET, "/posts").expect("list");
        assert_eq!(route.pattern, "/posts");
        let (_, route) = routes.find(&Method::GET, "/posts/2").expect("page");
        assert_eq!(route.pattern, "/posts/:page?");
    }

    #[test]
    fn decodes_params() {
        let routes = RouteCollection::from(Router::new().get("/u/:name", index));

        let (_, route) = routes.find(&Method::GET, "/u/john%20doe").expect("encoded");
        assert_eq!(route.params.find::<String>("name").ok().as_deref(), Some("john doe"));

        let (_, route) = routes.find(&Method::GET, "/u/caf%C3%A9").expect("utf-8");
        assert_eq!(route.params.find::<String>("name").ok().as_deref(), Some("café"));
    }

    #[test]
    fn shortened_patterns() {
        assert_eq!(without_optional_tail("/greet/:name?"), vec!["/greet"]);
        assert_eq!(without_optional_tail("/a/:b?/:c?"), vec!["/a/:b?", "/a"]);
        assert_eq!(without_optional_tail("/:page?"), vec!["/"]);
        assert!(without_optional_tail("/users/:id").is_empty());
        assert!(without_optional_tail("/files/*").is_empty());
    }

    #[test]
    fn allowed() {
        let routes = RouteCollection::from(
            Router::new()
                .get("/posts", index)
                .post("/posts", index)
                .delete("/posts/:id", index),
        );

        assert_eq!(
            routes.allowed("/posts"),
            vec![Method::GET, Method::HEAD, Method::POST]
        );
        assert_eq!(routes.allowed("/posts/1"), vec![Method::DELETE]);
        assert!(routes.allowed("/").is_empty());
        assert!(RouteCollection::default().is_empty());
    }
}
