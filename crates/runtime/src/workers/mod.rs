//! Worker tasks that back the runtime orchestration.
//!
//! Each started session gets its own worker; the runtime talks to it only
//! through the command channel wrapped by [`crate::api::SessionHandle`].

mod session;

pub use session::{Command, Completion, SessionUpdate, SessionWorker};
