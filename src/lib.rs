//! Natural-language HBAR transfer agent library.

pub mod blockchain;
pub mod config;
pub mod http;
pub mod intent;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;

pub use config::schema::AgentConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::Agent;
