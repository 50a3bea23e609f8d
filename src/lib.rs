//! # Rollcall
//!
//! An attendance tracking server, usable both as a standalone binary and as
//! a library.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::path::PathBuf;
//! use rollcall::server::{AppState, create_router};
//! use rollcall::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new(&PathBuf::from("./data/rollcall.db")).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState { store: Arc::new(store) });
//! let router = create_router(state);
//! // Serve with axum...
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
