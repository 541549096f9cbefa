//! # Group Order
//!
//! > **Lunch group-ordering for an office.**
//!
//! Someone picks a restaurant and opens a *group* with a deadline; coworkers add their line items
//! from the shared menu until the deadline passes; the summary tells whoever phones the
//! restaurant what to ask for and who owes what. An admin maintains the stores and menus.
//!
//! ## Architecture Notes
//!
//! ### 1. Tables as Actors
//! Stores, products, groups and orders each live in a [`TableActor`](table_actor::TableActor)
//! from the `table-actor` crate: one Tokio task per table, sequential request processing, a
//! broadcast change feed. Uniqueness (store name, product name per store) and referential checks
//! (a product's store, an order's group) are enforced by the tables; cascades are not.
//!
//! ### 2. Type-Safe Error Handling
//! Each table has its own error type (`StoreError`, `ProductError`, ...) and everything converts
//! into [`AppError`](error::AppError) with `?`.
//!
//! ### 3. Explicit Page State
//! The ordering page is a [`GroupBoard`](board::GroupBoard) over an explicit
//! [`BoardState`](board::BoardState), kept fresh by [`Subscriptions`](board::Subscriptions).
//!
//! ### 4. Observability
//! `tracing` everywhere, see [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - **Rules** ([`ordering`]): aggregation, the deadline gate, active-group selection.
//! - **Tables** ([`store_table`], [`product_table`], [`group_table`], [`order_table`]) and their
//!   [`clients`], over the row types in [`model`].
//! - **Pages** ([`board`], [`admin`]).
//! - **Services** ([`auth`], [`storage`], [`import`], [`share`], [`report`]).
//! - **Plumbing** ([`lifecycle`], [`config`], [`clock`], [`error`]).
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod admin;
pub mod auth;
pub mod board;
pub mod clients;
pub mod clock;
pub mod config;
pub mod error;
pub mod group_table;
pub mod import;
pub mod lifecycle;
pub mod model;
pub mod order_table;
pub mod ordering;
pub mod product_table;
pub mod report;
pub mod share;
pub mod storage;
pub mod store_table;
