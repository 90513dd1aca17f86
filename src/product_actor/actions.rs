use crate::domain::ProductSummary;

/// Custom actions for Product entities.
///
/// These actions represent domain-specific operations that can be performed
/// on a product beyond standard CRUD operations.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Takes the given quantity out of stock.
    ///
    /// # Errors
    /// Will fail if the requested amount exceeds available stock.
    Reserve(u32),
    /// Puts the given quantity back into stock.
    Release(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StockLevel(u32),
    /// Product as it was priced when the reservation passed validation.
    Reserved(ProductSummary),
    Released(u32),
}
