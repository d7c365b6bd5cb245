//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod confirmation;
pub mod progress;
pub mod remote_resource;
pub mod session;
