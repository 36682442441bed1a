//! Transfer pipeline.
//!
//! # Data Flow
//! ```text
//! user text → Agent::submit
//!     → TransactionPipeline (one per request, stage machine)
//!     → PipelineRun { run_id, stage, result }
//!     → reply() for the user
//! ```
//!
//! # Design Decisions
//! - `Agent` is immutable and shared; runs keep no state between requests
//! - Every failure is recoverable: the agent stays ready for the next request

pub mod agent;
pub mod error;
pub mod orchestrator;
pub mod stage;

pub use agent::{Agent, AgentOptions};
pub use error::{render, FailureKind, PipelineError, PipelineResult};
pub use orchestrator::{PipelineRun, TransactionPipeline};
pub use stage::PipelineStage;
