//! `evidex-gateway` — HTTP surface of the Functions custom handler.
//!
//! The Functions host owns the blob trigger and forwards each invocation to
//! this server as a POST; a non-2xx reply marks the invocation failed and
//! leaves redelivery to the host.

pub mod envelope;
pub mod server;

pub use envelope::{InvocationRequest, InvocationResponse, INPUT_BINDING};
pub use server::{build_router, start_server, GatewayState, FUNCTION_ROUTE};
