//! Order persistence: headers, owned items, and the derived total.

pub mod entity;
pub mod error;

pub use error::*;
