//! Per-user carts: the staging list that seeds checkout.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
