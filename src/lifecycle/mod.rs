//! # Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the tables, plus the tracing setup.
//!
//! ## Dependency Injection via Context
//!
//! Tables are created first and wired second: each `run(context)` receives the clients its rows
//! need. The dependency graph is acyclic (orders -> groups -> stores, products -> stores), so
//! dropping clients is enough to shut everything down.
//!
//! ## Graceful Shutdown
//!
//! 1. **Stop subscriptions** - [`Subscriptions::stop`](crate::board::Subscriptions::stop)
//! 2. **Drop boards and consoles** - they hold client clones
//! 3. **Shut down the backend** - [`Backend::shutdown`] drops its clients and awaits every table

pub mod backend;
pub mod tracing;

pub use self::backend::*;
pub use self::tracing::setup_tracing;
