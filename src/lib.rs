//! # Storefront orders
//!
//! Order transactions for a storefront: carts, stock-checked checkout, and
//! order management, built as a set of resource actors behind an axum API.
//!
//! - **Resource actors** own one store each (users, products, orders, carts)
//!   and apply requests one at a time → [`actor_framework::ResourceActor`]
//! - **Clients** are cheap handles over those actors; [`clients::OrderClient`]
//!   runs the order transaction and [`clients::CartClient`] bridges carts into it
//! - **System** wiring, config, and tracing live in [`app_system`]
//! - **HTTP** routes and the `{ success, message, data }` envelope live in [`http`]
//!
//! Stock is validated and decremented for a whole order in a single
//! [`actor_framework::ResourceRequest::Transact`] message on the inventory
//! actor, so concurrent orders for the same product cannot oversell.

pub mod actor_framework;
pub mod app_system;
pub mod cart_actor;
pub mod clients;
pub mod domain;
pub mod http;
pub mod order_actor;
pub mod product_actor;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;
