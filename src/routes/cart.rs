use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::get,
};

use crate::{
    dto::cart::{CartData, UpdateCartRequest},
    error::{AppError, AppResult},
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_cart).post(update_cart).delete(clear_cart))
}

fn customer_email(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-customer-email")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(
        ("x-customer-email" = Option<String>, Header, description = "Customer email the cart is keyed by"),
    ),
    responses(
        (status = 200, description = "Cart contents; empty without a customer email", body = ApiResponse<CartData>),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<CartData>>> {
    let Some(email) = customer_email(&headers) else {
        return Ok(Json(ApiResponse::success(
            "Cart",
            CartData { items: Vec::new() },
            None,
        )));
    };
    let resp = cart_service::get_cart(&state, &email).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = UpdateCartRequest,
    params(
        ("x-customer-email" = String, Header, description = "Customer email the cart is keyed by"),
    ),
    responses(
        (status = 200, description = "Cart replaced", body = ApiResponse<CartData>),
        (status = 400, description = "Missing customer email or invalid items"),
    ),
    tag = "Cart"
)]
pub async fn update_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateCartRequest>,
) -> AppResult<Json<ApiResponse<CartData>>> {
    let email = customer_email(&headers)
        .ok_or_else(|| AppError::BadRequest("customer email required".into()))?;
    let resp = cart_service::update_cart(&state, &email, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    params(
        ("x-customer-email" = String, Header, description = "Customer email the cart is keyed by"),
    ),
    responses(
        (status = 200, description = "Cart cleared", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Missing customer email"),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let email = customer_email(&headers)
        .ok_or_else(|| AppError::BadRequest("customer email required".into()))?;
    let resp = cart_service::clear_cart(&state, &email).await?;
    Ok(Json(resp))
}
