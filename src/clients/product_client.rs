use tracing::{debug, instrument};
use crate::actor_framework::ResourceClient;
use crate::domain::{OrderLine, Product, ProductCreate, ProductId, ProductSummary};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(ProductError::from)
    }

    /// Price/stock edits are admin tooling outside the HTTP surface; tests use
    /// this to move prices under existing orders.
    #[cfg(test)]
    #[instrument(skip(self))]
    pub async fn update_product(&self, id: ProductId, patch: crate::domain::ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(ProductError::from)
    }

    /// Like `get_product`, but a missing product is an error.
    #[instrument(skip(self))]
    pub async fn require_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get_product(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[cfg(test)]
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Validates and decrements stock for every line in a single inventory
    /// transaction. Either every line is reserved or none is.
    ///
    /// Returns the product as priced at reservation time, one per line.
    #[instrument(skip(self))]
    pub async fn reserve_lines(&self, lines: &[OrderLine]) -> Result<Vec<ProductSummary>, ProductError> {
        debug!("Sending request");
        let actions = lines
            .iter()
            .map(|line| (line.product_id, ProductAction::Reserve(line.quantity)))
            .collect();
        self.inner
            .transact(actions)
            .await?
            .into_iter()
            .map(|result| match result {
                ProductActionResult::Reserved(product) => Ok(product),
                other => Err(unexpected(other)),
            })
            .collect()
    }

    /// Returns previously reserved quantities to stock.
    #[instrument(skip(self))]
    pub async fn release_lines(&self, lines: &[OrderLine]) -> Result<(), ProductError> {
        debug!("Sending request");
        let actions = lines
            .iter()
            .map(|line| (line.product_id, ProductAction::Release(line.quantity)))
            .collect();
        self.inner.transact(actions).await?;
        Ok(())
    }
}
