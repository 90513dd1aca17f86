use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument, warn, Instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::{ProductClient, UserClient};
use crate::domain::{
    Caller, Order, OrderCreate, OrderId, OrderItemId, OrderItemView, OrderLine, OrderPatch, OrderScope,
    OrderStatus, OrderView, PricedLine, ProductId, ProductSummary, UserSummary,
};
use crate::order_actor::OrderError;

/// Client for interacting with the Order actor.
///
/// This is where order transactions are orchestrated: stock is validated and
/// taken from the product actor in one step, prices are snapshotted, and the
/// order is written to the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
    item_ids: Arc<AtomicU64>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, user_client: UserClient, product_client: ProductClient) -> Self {
        Self {
            inner,
            user_client,
            product_client,
            item_ids: Arc::new(AtomicU64::new(1)),
        }
    }

    fn next_item_id(&self) -> OrderItemId {
        self.item_ids.fetch_add(1, Ordering::SeqCst)
    }

    #[instrument(skip(self, lines), fields(user_id = caller.user_id, line_count = lines.len()))]
    pub async fn create_order(
        &self,
        caller: Caller,
        lines: Vec<OrderLine>,
        status: Option<OrderStatus>,
    ) -> Result<OrderView, OrderError> {
        info!("Processing create_order request");

        // Step 1: Validate request shape
        validate_lines(&lines, "Order must contain at least one item", "Quantity must be >= 1")?;

        // Steps 2-4 run detached: once stock is taken, dropping this future
        // must not stop the order from being written or the stock released.
        let this = self.clone();
        let order_id = tokio::spawn(async move { this.commit_order(caller, lines, status).await }.in_current_span())
            .await
            .map_err(|e| OrderError::Internal(format!("Order task failed: {}", e)))??;
        info!(order_id, "Order created successfully");

        // Step 5: Read back for display. The order is already committed; details
        // that fail to resolve are left out rather than failing the request.
        let order = self.load(order_id).await.map_err(|e| {
            error!(order_id, error = %e, "Committed order could not be read back");
            OrderError::Internal(format!("Order {} was created but could not be read back: {}", order_id, e))
        })?;
        match self.details(&order).await {
            Ok((user, products)) => Ok(build_view(order, user, products)),
            Err(e) => {
                warn!(order_id, error = %e, "Returning committed order without details");
                Ok(build_view(order, None, BTreeMap::new()))
            }
        }
    }

    /// Takes stock, snapshots prices and writes the order, handing the stock
    /// back if the write fails.
    async fn commit_order(
        &self,
        caller: Caller,
        lines: Vec<OrderLine>,
        status: Option<OrderStatus>,
    ) -> Result<OrderId, OrderError> {
        // Step 2: Validate and take stock in a single inventory transaction
        let reserved = match self.product_client.reserve_lines(&lines).await {
            Ok(reserved) => reserved,
            Err(e) => {
                warn!(error = %e, "Stock reservation failed");
                return Err(e.into());
            }
        };
        info!("Stock reserved successfully");

        // Step 3: Snapshot prices observed during the reservation
        let items = lines
            .iter()
            .zip(reserved)
            .map(|(line, product)| PricedLine {
                item_id: self.next_item_id(),
                product_id: line.product_id,
                quantity: line.quantity,
                price: product.price,
            })
            .collect();
        let params = OrderCreate {
            user_id: caller.user_id,
            status: status.unwrap_or_default(),
            order_date: Utc::now(),
            items,
        };

        // Step 4: Persist, handing the stock back if the order can't be written
        match self.inner.create(params).await {
            Ok(id) => Ok(id),
            Err(e) => {
                error!(error = %e, "Order persistence failed; releasing reserved stock");
                if let Err(release_err) = self.product_client.release_lines(&lines).await {
                    error!(error = %release_err, "Releasing reserved stock failed");
                }
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self, items))]
    pub async fn update_order(
        &self,
        caller: Caller,
        id: OrderId,
        items: Option<Vec<OrderLine>>,
        status: Option<OrderStatus>,
    ) -> Result<OrderView, OrderError> {
        info!("Processing update_order request");
        let order = self.load_authorized(caller, id, "update").await?;

        // Stock is neither re-checked nor adjusted when items are replaced.
        let items = match items {
            Some(lines) => Some(self.price_lines(&lines).await?),
            None => None,
        };

        let updated = self.inner.update(order.id, OrderPatch { items, status }).await?;
        info!(total_price = %updated.total_price, "Order updated");
        self.resolve(updated).await
    }

    /// Removes the order and its items. Stock is not restored.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, caller: Caller, id: OrderId) -> Result<(), OrderError> {
        info!("Processing delete_order request");
        let order = self.load_authorized(caller, id, "delete").await?;
        self.inner.delete(order.id).await?;
        info!("Order deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, caller: Caller, id: OrderId) -> Result<OrderView, OrderError> {
        let order = self.load_authorized(caller, id, "view").await?;
        self.resolve(order).await
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, caller: Caller, scope: OrderScope) -> Result<Vec<OrderView>, OrderError> {
        if scope == OrderScope::All && !caller.is_admin() {
            return Err(OrderError::Forbidden("Admins only".to_string()));
        }

        let orders = self.inner.list().await?;
        let mut views = Vec::new();
        for order in orders {
            if scope == OrderScope::All || order.user_id == caller.user_id {
                views.push(self.resolve(order).await?);
            }
        }
        Ok(views)
    }

    async fn load(&self, id: OrderId) -> Result<Order, OrderError> {
        self.inner
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn load_authorized(&self, caller: Caller, id: OrderId, verb: &str) -> Result<Order, OrderError> {
        let order = self.load(id).await?;
        if !caller.can_access(order.user_id) {
            warn!(owner = order.user_id, "Caller does not own order");
            return Err(OrderError::Forbidden(format!("Cannot {} other user orders", verb)));
        }
        Ok(order)
    }

    /// Prices lines at current product prices without touching stock.
    async fn price_lines(&self, lines: &[OrderLine]) -> Result<Vec<PricedLine>, OrderError> {
        let invalid = "Each item must have productId and quantity >= 1";
        validate_lines(lines, "Order must contain at least one item", invalid)?;

        let mut priced = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self.product_client.require_product(line.product_id).await?;
            priced.push(PricedLine {
                item_id: self.next_item_id(),
                product_id: line.product_id,
                quantity: line.quantity,
                price: product.price,
            });
        }
        Ok(priced)
    }

    /// Attaches owner and product details for display.
    async fn resolve(&self, order: Order) -> Result<OrderView, OrderError> {
        let (user, products) = self.details(&order).await?;
        Ok(build_view(order, user, products))
    }

    async fn details(&self, order: &Order) -> Result<(Option<UserSummary>, ProductSummaries), OrderError> {
        let user = self.user_client.get_user(order.user_id).await?.map(|user| user.summary());

        let mut products = ProductSummaries::new();
        for item in &order.items {
            if !products.contains_key(&item.product_id) {
                let product = self.product_client.get_product(item.product_id).await?;
                products.insert(item.product_id, product.map(|p| p.summary()));
            }
        }
        Ok((user, products))
    }
}

type ProductSummaries = BTreeMap<ProductId, Option<ProductSummary>>;

fn build_view(order: Order, user: Option<UserSummary>, products: ProductSummaries) -> OrderView {
    let items = order
        .items
        .into_iter()
        .map(|item| OrderItemView {
            product: products.get(&item.product_id).cloned().flatten(),
            id: item.id,
            order_id: item.order_id,
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        })
        .collect();

    OrderView {
        id: order.id,
        user_id: order.user_id,
        total_price: order.total_price,
        order_date: order.order_date,
        status: order.status,
        user,
        items,
    }
}

fn validate_lines(lines: &[OrderLine], empty: &str, invalid: &str) -> Result<(), OrderError> {
    if lines.is_empty() {
        return Err(OrderError::Validation(empty.to_string()));
    }
    if lines.iter().any(|line| line.quantity < 1) {
        return Err(OrderError::Validation(invalid.to_string()));
    }
    Ok(())
}
