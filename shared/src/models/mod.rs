//! Data models
//!
//! Shared between check-server and its HTTP clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod check;
pub mod order;
pub mod printer;

// Re-exports
pub use check::*;
pub use order::*;
pub use printer::*;
