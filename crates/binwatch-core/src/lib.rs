//! Core domain types for the Binwatch client: the shared error type, the
//! session model with its injectable store seam, client configuration, and
//! the image/geo value types exchanged with the backend.

pub mod config;
pub mod error;
pub mod geo;
pub mod image;
pub mod session;

// Re-export common types
pub use config::ClientConfig;
pub use error::{BinwatchError, Result};
pub use session::{MemorySessionStore, Session, SessionKey, SessionStore, UserProfile};
