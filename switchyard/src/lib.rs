//! Switchyard
//!
//! A small routing and request-dispatch framework on top of [`hyper`].
//!
//! Routes are registered on a [`Router`] with the verb helpers; every action is either a plain
//! handler or a method bound on a [`Controller`]. On each request the [`Responder`] finds the
//! matched action, and a [`RouteCompiler`] binds the route parameters, runs the action and
//! folds an early [`Error::Responder`] answer back into the response.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use switchyard::{action, serve, Controller, Request, RequestExt, Result, Router};
//! use tokio::net::TcpListener;
//!
//! struct Posts;
//!
//! impl Controller for Posts {}
//!
//! impl Posts {
//!     async fn show(self: Arc<Self>, req: Request) -> Result<String> {
//!         let id: u32 = req.param("id")?;
//!         Ok(format!("post #{id}"))
//!     }
//! }
//!
//! async fn greet(req: Request) -> Result<String> {
//!     let name = req.param::<String>("name").unwrap_or_else(|_| "stranger".into());
//!     Ok(format!("hi {name}"))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     let app = Router::new()
//!         .get("/greet/:name?", greet)
//!         .get("/posts/:id", action(Arc::new(Posts), "show", Posts::show));
//!
//!     serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod responder;
pub use responder::Responder;

mod server;
pub use server::{serve, Accept, Server};

pub use switchyard_core::*;
pub use switchyard_router::*;
