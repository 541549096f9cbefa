//! # Ordering Page
//!
//! [`GroupBoard`] is the page visitors use: pick one of today's groups, read the menu, place and
//! cancel orders before the deadline, open and close groups. Its data lives in an explicit
//! [`BoardState`] rather than in view globals.
//!
//! [`Subscriptions`] is the realtime half: it listens to the tables' change feeds and a countdown
//! ticker, and has an explicit start/stop lifecycle.
//!
//! ```rust
//! use group_order::board::{GroupBoard, Subscriptions};
//! use group_order::clock::SystemClock;
//! use group_order::config::Config;
//! use group_order::lifecycle::Backend;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let backend = Backend::start(config.table_buffer);
//!     let board = GroupBoard::new(&backend, Arc::new(SystemClock), &config);
//!
//!     board.load().await.unwrap();
//!     let subscriptions = Subscriptions::start(board.clone(), config.tick_interval);
//!
//!     assert!(board.snapshot().await.today_groups.is_empty());
//!
//!     subscriptions.stop().await;
//!     drop(board);
//!     backend.shutdown().await.unwrap();
//! }
//! ```

pub mod group_board;
pub mod state;
pub mod subscriptions;

pub use group_board::*;
pub use state::*;
pub use subscriptions::*;
