//! Durable storage implementations for the Binwatch client.

pub mod file_session_store;

pub use crate::file_session_store::FileSessionStore;
