//! Pagecraft application shell
//!
//! Headless stand-in for the builder UI: replays recorded sessions through
//! the core controller, prints page outlines and persists projects.

pub mod cli;
pub mod outline;
pub mod session;

pub use cli::{Args, USAGE};
pub use outline::{OutlineRenderer, outline};
pub use session::{Session, SessionError, SessionReport, SessionRunner, SessionStep};
