//! Typed access to the board REST API on top of the [`RemoteResource`] port.
//!
//! [`RemoteResource`]: crate::ports::remote_resource::RemoteResource

pub mod question_api;
pub mod routes;
