use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::payment::VerifyPaymentRequest,
    error::{AppError, AppResult},
    models::{Order, OrderStatus, PaymentStatus},
    response::{ApiResponse, Meta},
    state::AppState,
    store::orders,
};

type HmacSha256 = Hmac<Sha256>;

/// Confirms a gateway callback: the signature must be the HMAC-SHA256 of
/// `"{order_id}|{payment_id}"` under the shared key secret.
pub async fn verify_payment(
    state: &AppState,
    payload: VerifyPaymentRequest,
) -> AppResult<ApiResponse<Order>> {
    payload.validate()?;

    let Some(secret) = state.config.payment_secret.as_deref() else {
        return Err(AppError::Unavailable(
            "Payment gateway configuration not available".into(),
        ));
    };

    let message = format!(
        "{}|{}",
        payload.razorpay_order_id, payload.razorpay_payment_id
    );
    let expected = sign(secret, &message)?;
    if expected != payload.razorpay_signature {
        return Err(AppError::BadRequest("Invalid payment signature".into()));
    }

    let mut order = match orders::get(state, payload.order_id).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    order.payment_status = PaymentStatus::Paid;
    order.payment_id = Some(payload.razorpay_payment_id.clone());
    order.order_status = OrderStatus::Confirmed;
    order.updated_at = Utc::now();
    orders::update(state, &order).await?;

    if let Err(err) = log_audit(
        state,
        None,
        "payment_verified",
        Some("orders"),
        Some(serde_json::json!({
            "order_id": order.id,
            "payment_id": payload.razorpay_payment_id,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Payment verified",
        order,
        Some(Meta::empty()),
    ))
}

pub fn sign(secret: &str, message: &str) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;
    mac.update(message.as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_is_deterministic_and_key_dependent() {
        let a = sign("secret", "order_1|pay_1").unwrap();
        let b = sign("secret", "order_1|pay_1").unwrap();
        let c = sign("other", "order_1|pay_1").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
