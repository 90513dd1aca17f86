use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::app_system::SeedCatalog;
use crate::clients::{CartClient, OrderClient, ProductClient, UserClient};
use crate::domain::{Cart, Order, Product, User};

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct StoreSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub cart_client: CartClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

/// Id generator starting at 1.
fn sequential_ids() -> impl Fn() -> u64 + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || counter.fetch_add(1, Ordering::SeqCst)
}

impl StoreSystem {
    /// Spawns every actor on the current tokio runtime.
    pub fn new(buffer_size: usize) -> Self {
        // 1. User directory
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(buffer_size, sequential_ids());
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Inventory
        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(buffer_size, sequential_ids());
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Orders (orchestrates users + inventory)
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(buffer_size, sequential_ids());
        let order_client = OrderClient::new(order_resource_client, user_client.clone(), product_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        // 4. Carts; keyed by user id, so the generator is never consulted.
        let (cart_actor, cart_resource_client) = ResourceActor::<Cart>::new(buffer_size, sequential_ids());
        let cart_client = CartClient::new(cart_resource_client, product_client.clone(), order_client.clone());
        let cart_handle = tokio::spawn(cart_actor.run());

        info!(buffer_size, "Store system started");

        Self {
            user_client,
            product_client,
            order_client,
            cart_client,
            handles: vec![user_handle, product_handle, order_handle, cart_handle],
        }
    }

    /// Creates every user and product in the catalog, in file order.
    pub async fn seed(&self, catalog: &SeedCatalog) -> anyhow::Result<()> {
        for user in &catalog.users {
            let id = self
                .user_client
                .create_user(user.clone())
                .await
                .with_context(|| format!("seeding user {}", user.email))?;
            info!(user_id = id, email = %user.email, role = ?user.role, "Seeded user");
        }
        for product in &catalog.products {
            let id = self
                .product_client
                .create_product(product.clone())
                .await
                .with_context(|| format!("seeding product {}", product.name))?;
            info!(product_id = id, name = %product.name, stock = product.stock, "Seeded product");
        }
        Ok(())
    }

    /// Closes every mailbox and joins the actor tasks. Client clones handed
    /// out elsewhere (e.g. to the HTTP state) must be dropped first.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        info!("Shutting down system...");
        // Actors stop once every client clone is dropped and their mailboxes close.
        drop(self.cart_client);
        drop(self.order_client);
        drop(self.product_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(anyhow::anyhow!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
