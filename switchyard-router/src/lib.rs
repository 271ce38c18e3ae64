//! Router for Switchyard Web Framework
//!
//! Routes are registered on a [`Router`], frozen into a [`RouteCollection`], and a matched
//! [`Action`] is dispatched through a [`RouteCompiler`] which yields a [`CompiledRoute`].

#![forbid(unsafe_code)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![doc(test(
    no_crate_inject,
    attr(
        deny(warnings, rust_2018_idioms),
        allow(dead_code, unused_assignments, unused_variables)
    )
))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
pub(crate) mod macros;

mod action;
mod collection;
mod compiled;
mod compiler;
mod controller;
mod resources;
mod route;
mod router;

pub use action::{Action, IntoAction};
pub use collection::RouteCollection;
pub use compiled::{CompiledRoute, Outcome};
pub use compiler::RouteCompiler;
pub use controller::{action, Controller, ControllerAction};
pub use resources::Resources;
pub use route::*;
pub use router::{Router, VERBS};
