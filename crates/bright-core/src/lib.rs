//! bright-core - Core library for Daily Bright
//!
//! This crate contains the entry model, the session context, the HTTP client
//! for the Daily Bright API, the offline entry store, and the synchronization
//! layer that front ends (the CLI today) drive.

pub mod api;
pub mod auth;
pub mod compose;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod feedback;
pub mod models;
pub mod session;
pub mod store;
pub mod sync;
pub mod util;

#[cfg(test)]
mod test_server;

pub use error::{Error, Result};
pub use models::{Entry, EntryId, NewEntry};
pub use session::{Session, SessionToken};
