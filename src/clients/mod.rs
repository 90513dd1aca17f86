//! Typed handles over the resource actors. `OrderClient` and `CartClient`
//! orchestrate several actors; the others are thin wrappers.

#[macro_use]
mod macros;

pub mod user_client;
pub mod product_client;
pub mod order_client;
pub mod cart_client;

pub use user_client::*;
pub use product_client::*;
pub use order_client::*;
pub use cart_client::*;
