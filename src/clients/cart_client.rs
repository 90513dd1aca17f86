use tracing::{info, instrument, warn};
use crate::actor_framework::ResourceClient;
use crate::cart_actor::{CartAction, CartError};
use crate::clients::{OrderClient, ProductClient};
use crate::domain::{Caller, Cart, CartItemView, CartProduct, CartView, OrderStatus, OrderView, ProductId, UserId};
use crate::order_actor::OrderError;

/// Client for interacting with the Cart actor.
///
/// Quantities are checked against current stock on every add/update. Checkout
/// hands the cart lines to [`OrderClient::create_order`] unchanged.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    product_client: ProductClient,
    order_client: OrderClient,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, product_client: ProductClient, order_client: OrderClient) -> Self {
        Self {
            inner,
            product_client,
            order_client,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, user_id: UserId) -> Result<CartView, CartError> {
        let cart = self.inner.ensure(user_id, ()).await?;
        self.view(cart).await
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, user_id: UserId, product_id: ProductId, quantity: u32) -> Result<CartView, CartError> {
        let available = self.checked_stock(product_id, quantity).await?;
        self.apply(user_id, CartAction::Add { product_id, quantity, available }).await
    }

    #[instrument(skip(self))]
    pub async fn update_item(&self, user_id: UserId, product_id: ProductId, quantity: u32) -> Result<CartView, CartError> {
        self.checked_stock(product_id, quantity).await?;
        self.apply(user_id, CartAction::Set { product_id, quantity }).await
    }

    /// Users without a cart get an empty one back; none is created.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> Result<CartView, CartError> {
        self.apply_existing(user_id, CartAction::Remove(product_id)).await
    }

    /// Users without a cart get an empty one back; none is created.
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) -> Result<CartView, CartError> {
        self.apply_existing(user_id, CartAction::Clear).await
    }

    /// Turns the caller's cart into an order and empties the cart.
    ///
    /// The order is committed before the cart is cleared; a failed clear is
    /// logged and the order is still returned.
    #[instrument(skip(self), fields(user_id = caller.user_id))]
    pub async fn checkout(&self, caller: Caller, status: Option<OrderStatus>) -> Result<OrderView, OrderError> {
        let cart = self
            .inner
            .ensure(caller.user_id, ())
            .await
            .map_err(|e| OrderError::Internal(CartError::from(e).to_string()))?;

        let lines = cart.lines();
        if lines.is_empty() {
            return Err(OrderError::Validation("Cart is empty".to_string()));
        }

        let order = self.order_client.create_order(caller, lines, status).await?;
        info!(order_id = order.id, "Checkout committed order");

        if let Err(e) = self.inner.perform_action(caller.user_id, CartAction::Clear).await {
            warn!(error = %e, "Clearing cart after checkout failed");
        }
        Ok(order)
    }

    /// Rejects zero quantities, unknown products and quantities above stock.
    /// Returns the stock level seen.
    async fn checked_stock(&self, product_id: ProductId, quantity: u32) -> Result<u32, CartError> {
        if quantity < 1 {
            return Err(CartError::Validation("Invalid productId or quantity".to_string()));
        }
        let product = self.product_client.require_product(product_id).await?;
        if product.stock < quantity {
            return Err(CartError::InsufficientStock(product.name));
        }
        Ok(product.stock)
    }

    async fn apply_existing(&self, user_id: UserId, action: CartAction) -> Result<CartView, CartError> {
        if self.inner.get(user_id).await?.is_none() {
            return Ok(CartView { user_id, items: Vec::new() });
        }
        let cart = self.inner.perform_action(user_id, action).await?;
        self.view(cart).await
    }

    async fn apply(&self, user_id: UserId, action: CartAction) -> Result<CartView, CartError> {
        self.inner.ensure(user_id, ()).await?;
        let cart = self.inner.perform_action(user_id, action).await?;
        self.view(cart).await
    }

    async fn view(&self, cart: Cart) -> Result<CartView, CartError> {
        let mut items = Vec::with_capacity(cart.items.len());
        for item in cart.items {
            let product = self.product_client.get_product(item.product_id).await?;
            items.push(CartItemView {
                product_id: item.product_id,
                quantity: item.quantity,
                product: product.map(|p| CartProduct {
                    id: p.id,
                    name: p.name,
                    price: p.price,
                    stock: p.stock,
                }),
            });
        }
        Ok(CartView {
            user_id: cart.user_id,
            items,
        })
    }
}
