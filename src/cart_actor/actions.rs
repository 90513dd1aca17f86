use crate::domain::ProductId;

/// Cart mutations. Stock checks happen in the client before these are sent;
/// `available` only caps merged quantities.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds to an existing line (capped at `available`) or appends a new one.
    Add {
        product_id: ProductId,
        quantity: u32,
        available: u32,
    },
    /// Sets a line's quantity, appending it if absent.
    Set { product_id: ProductId, quantity: u32 },
    Remove(ProductId),
    Clear,
}
