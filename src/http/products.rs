use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use super::envelope::respond;
use super::{parse_id, ApiError, AppState};

pub(crate) async fn list_products(State(st): State<AppState>) -> Result<Response, ApiError> {
    let products = st.products.list_products().await?;
    Ok(respond(StatusCode::OK, "Products retrieved successfully", products))
}

pub(crate) async fn get_product(
    State(st): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id, "Product id is not valid")?;
    let product = st
        .products
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;
    Ok(respond(StatusCode::OK, "Product was found", product))
}
