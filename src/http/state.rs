use crate::app_system::StoreSystem;
use crate::clients::{CartClient, OrderClient, ProductClient, UserClient};

/// Handles shared by every request. Clones are cheap channel senders.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub carts: CartClient,
}

impl AppState {
    pub fn from_system(system: &StoreSystem) -> Self {
        Self {
            users: system.user_client.clone(),
            products: system.product_client.clone(),
            orders: system.order_client.clone(),
            carts: system.cart_client.clone(),
        }
    }
}
