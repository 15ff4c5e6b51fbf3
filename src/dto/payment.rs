use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Gateway callback payload; the signature is an HMAC-SHA256 over
/// `"{razorpay_order_id}|{razorpay_payment_id}"`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "gateway order id is required"))]
    pub razorpay_order_id: String,
    #[validate(length(min = 1, message = "gateway payment id is required"))]
    pub razorpay_payment_id: String,
    #[validate(length(min = 1, message = "signature is required"))]
    pub razorpay_signature: String,
    pub order_id: Uuid,
}
