use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::payment::VerifyPaymentRequest,
    error::AppResult,
    models::Order,
    response::ApiResponse,
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/verify", post(verify_payment))
}

#[utoipa::path(
    post,
    path = "/api/payment/verify",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified, order confirmed", body = ApiResponse<Order>),
        (status = 400, description = "Invalid payment signature"),
        (status = 404, description = "Order not found"),
        (status = 503, description = "Payment gateway not configured"),
    ),
    tag = "Payment"
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = payment_service::verify_payment(&state, payload).await?;
    Ok(Json(resp))
}
