//! Worker/test lifecycle and wire layer for the GraphQL mock server.
//!
//! A worker parses the schema once and installs baseline default mocks
//! (signed-out viewer, empty JSON for freeform JSON-string scalars); each
//! test then owns a [`MockServer`] that layers its own mocks on top and is
//! [`reset`](MockServer::reset) at teardown so state never leaks across
//! tests.
//!
//! The wire layer speaks standard GraphQL-over-HTTP: a JSON body
//! `{ query, variables, operationName }` in, `{ data }` or `{ errors }`
//! out.

mod defaults;
mod request;
mod server;

pub use defaults::baseline_defaults;
pub use request::{GraphQLError, GraphQLRequest, GraphQLResponse};
pub use server::{MockServer, MockServerConfig};
