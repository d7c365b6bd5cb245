//! HTTP adapter for the [`RemoteResource`] port.
//!
//! [`RemoteResource`]: pybo_application::RemoteResource

pub mod client;
pub mod response;
