//! User directory: identities, roles, and the summaries shown on orders.

pub mod entity;
pub mod error;

pub use error::*;
