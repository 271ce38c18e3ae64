//! Extractors: the typed arguments of an action.

mod json;
mod params;
mod payload;
mod query;
mod route_info;
mod state;

pub use json::Json;
pub use params::{Params, ParamsError};
pub(crate) use params::PathDeserializer;
pub use payload::PayloadError;
pub use query::Query;
pub use route_info::RouteInfo;
pub use state::{State, Stateful};
