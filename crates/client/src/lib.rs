//! Client access layer for the projboard API.
//!
//! [`ProjectsClient`] wraps the HTTP endpoints and keeps a [`ProjectCache`]
//! in sync with every successful response, so a UI can paint the cached list
//! immediately and replace it once the server answers.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;

pub use cache::{CacheStorage, FileStorage, MemoryStorage, ProjectCache};
pub use client::ProjectsClient;
pub use config::ClientConfig;
pub use error::ClientError;
