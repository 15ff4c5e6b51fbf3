use chrono::Utc;
use sqlx::types::Json;
use validator::Validate;

use crate::{
    dto::cart::{CartData, UpdateCartRequest},
    error::{AppError, AppResult},
    models::Cart,
    response::{ApiResponse, Meta},
    state::AppState,
    store::carts,
};

/// An unknown customer simply has an empty cart.
pub async fn get_cart(state: &AppState, customer_email: &str) -> AppResult<ApiResponse<CartData>> {
    let items = carts::get(state, customer_email)
        .await?
        .map(|cart| cart.items.0)
        .unwrap_or_default();
    Ok(ApiResponse::success("Cart", CartData { items }, None))
}

pub async fn update_cart(
    state: &AppState,
    customer_email: &str,
    payload: UpdateCartRequest,
) -> AppResult<ApiResponse<CartData>> {
    payload.validate()?;

    let cart = Cart {
        customer_email: customer_email.to_lowercase(),
        items: Json(payload.items),
        updated_at: Utc::now(),
    };
    carts::put(state, &cart).await?;

    Ok(ApiResponse::success(
        "Cart updated",
        CartData { items: cart.items.0 },
        None,
    ))
}

pub async fn clear_cart(
    state: &AppState,
    customer_email: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if customer_email.is_empty() {
        return Err(AppError::BadRequest("customer email required".into()));
    }
    carts::remove(state, customer_email).await?;
    Ok(ApiResponse::success(
        "Cart cleared",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
