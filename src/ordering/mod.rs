//! # Ordering Rules
//!
//! The pure logic behind the ordering page, kept free of tables and clocks so it can be tested
//! directly:
//!
//! - [`summary`] folds a group's orders into one line per menu item.
//! - [`expiry`] decides whether a group still accepts changes and renders the countdown.
//! - [`selection`] picks which of today's groups the page shows.

pub mod expiry;
pub mod selection;
pub mod summary;

pub use expiry::*;
pub use selection::*;
pub use summary::*;
