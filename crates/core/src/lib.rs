//! Domain types and request validation for the projboard dashboard.
//!
//! Shared by the record store, the HTTP service and the client so that every
//! layer agrees on the shape of a [`project::Project`] and on which request
//! fields are acceptable.

pub mod error;
pub mod project;
pub mod search;
pub mod types;
pub mod validation;
