//! Persisted credentials for the [`SessionContext`] port.
//!
//! [`SessionContext`]: pybo_application::SessionContext

mod stored;

pub use stored::{SessionFile, StoredSession};
