//! Intent extraction subsystem.
//!
//! # Data Flow
//! ```text
//! user text
//!     → extractor.rs (LLM call, raw reply)
//!     → parser.rs (sentinel check, strict grammar)
//!     → TransactionIntent (validated amount + recipient)
//! ```

pub mod extractor;
pub mod parser;
pub mod types;

pub use extractor::{ExtractionError, IntentExtractor, LlmClient, INVALID_REQUEST_SENTINEL};
pub use parser::parse;
pub use types::{ParseError, TransactionIntent};
