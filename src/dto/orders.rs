use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CustomerInfo, Order, OrderItem, PaymentMethod};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate]
    pub customer: CustomerInfo,
    #[validate]
    pub items: Vec<OrderItem>,
    #[validate(range(min = 0, message = "shipping cost cannot be negative"))]
    pub shipping_cost: Option<i64>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
    pub tracking_id: Option<String>,
}

/// Lookup filters for order tracking; applied in this priority order.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderLookupQuery {
    pub id: Option<Uuid>,
    pub order_number: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
