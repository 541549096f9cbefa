//! Row types, ids and request payloads for the four tables.

pub mod group;
pub mod order;
pub mod product;
pub mod store;

pub use group::*;
pub use order::*;
pub use product::*;
pub use store::*;
