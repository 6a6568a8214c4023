//! HTTP surface for the reviewer registry.
//!
//! # Responsibility
//! - Bind verbs and paths to reviewer use-cases.
//! - Translate service results and failures into status codes and JSON bodies.
//!
//! # Invariants
//! - Handlers never touch SQL; all persistence goes through `ReviewerService`.
//! - Blocking database work never runs on async worker threads.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{ConfigError, DatabaseTarget, ServerConfig};
pub use error::{ApiError, Operation};
pub use router::create_router;
pub use state::AppState;
