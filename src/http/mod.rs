//! HTTP chat surface.
//!
//! # Data Flow
//! ```text
//! POST /chat {message}
//!     → server.rs (Axum, trace + timeout layers)
//!     → Agent::submit
//!     → ChatResponse {reply, status, tx_hash, failure}
//!
//! GET /health → node block number
//! ```

pub mod server;

pub use server::{AppState, ChatRequest, ChatResponse, HttpServer};
