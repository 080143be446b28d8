//! Terminal client for the quiz runtime.
//!
//! The binary wires [`client_bootstrap`] (content, persistence, config) to
//! [`TerminalApp`], a line-based frontend that talks to the runtime only
//! through `Runtime` and `SessionHandle`.

pub mod app;
pub mod input;
pub mod logging;
pub mod render;

pub use app::TerminalApp;
