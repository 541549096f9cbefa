//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Table Lifecycle**: startup and shutdown, with the final row count
//! - **Row Operations**: every insert, upsert, update and delete, tagged with a `table` field
//! - **Client Calls**: one span per client method (`#[instrument]`)
//! - **Cleanup Failures**: best-effort steps that failed and were skipped, at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! RUST_LOG=info cargo run                      # one line per mutation
//! RUST_LOG=debug cargo run                     # full payloads and every select
//! RUST_LOG=group_order=debug,table_actor=info cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Table started table="Store"
//! INFO Upserted table="Store" outcome=Inserted(StoreId(1)) size=1
//! INFO place_order: Sending place_order to table group_id=group_1
//! INFO Inserted table="Order" id=order_1 size=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
