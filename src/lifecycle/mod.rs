//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config + secrets → connect node → wallet → model client → Agent
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or trigger → stop accepting → finish in-flight runs → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last, once the agent is fully built

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bootstrap, StartupError};
