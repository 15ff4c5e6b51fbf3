use chrono::{Duration, Utc};
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::orders::{CreateOrderRequest, OrderList, OrderLookupQuery},
    error::{AppError, AppResult},
    models::{Order, OrderStatus, PaymentMethod, PaymentStatus, Product},
    response::{ApiResponse, Meta},
    state::AppState,
    store::{orders, products},
};

pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    payload.validate()?;
    if payload.items.is_empty() {
        return Err(AppError::BadRequest(
            "order must contain at least one item".into(),
        ));
    }

    // Check stock against the live catalog and decrement it with the order.
    // Items for the same product draw from one reserved copy.
    let mut reserved: Vec<Product> = Vec::new();
    for item in &payload.items {
        if let Some(product) = reserved.iter_mut().find(|p| p.id == item.product_id) {
            if product.stock < item.quantity {
                return Err(AppError::BadRequest(format!(
                    "insufficient stock for {}",
                    product.name
                )));
            }
            product.stock -= item.quantity;
            continue;
        }

        let mut product = match products::get(state, item.product_id).await? {
            Some(p) => p,
            None => {
                return Err(AppError::BadRequest(format!(
                    "product {} not found",
                    item.product_id
                )));
            }
        };
        if !product.is_active {
            return Err(AppError::BadRequest(format!(
                "product {} is unavailable",
                product.name
            )));
        }
        if product.stock < item.quantity {
            return Err(AppError::BadRequest(format!(
                "insufficient stock for {}",
                product.name
            )));
        }
        product.stock -= item.quantity;
        product.updated_at = Utc::now();
        reserved.push(product);
    }

    let subtotal: i64 = payload
        .items
        .iter()
        .map(|item| item.price * item.quantity as i64)
        .sum();
    let shipping_cost = payload.shipping_cost.unwrap_or(0);

    let now = Utc::now();
    let order_id = Uuid::new_v4();
    let order = Order {
        id: order_id,
        order_number: build_order_number(order_id),
        customer: Json(payload.customer),
        items: Json(payload.items),
        subtotal,
        shipping_cost,
        total: subtotal + shipping_cost,
        payment_method: payload.payment_method.unwrap_or(PaymentMethod::Razorpay),
        payment_status: PaymentStatus::Pending,
        payment_id: None,
        order_status: OrderStatus::Pending,
        tracking_id: None,
        notes: payload.notes,
        cancelled_at: None,
        created_at: now,
        updated_at: now,
    };

    for product in &reserved {
        products::update(state, product).await?;
    }
    orders::insert(state, &order).await?;

    if let Err(err) = log_audit(
        state,
        None,
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "total": order.total })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order created",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn lookup_orders(
    state: &AppState,
    query: OrderLookupQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let all = orders::load_all(state).await?;

    let items: Vec<Order> = if let Some(id) = query.id {
        all.into_iter().filter(|o| o.id == id).collect()
    } else if let Some(number) = query.order_number.as_deref().filter(|n| !n.is_empty()) {
        all.into_iter()
            .filter(|o| o.order_number.eq_ignore_ascii_case(number))
            .collect()
    } else if let Some(email) = query.email.as_deref().filter(|e| !e.is_empty()) {
        all.into_iter()
            .filter(|o| o.customer.email.eq_ignore_ascii_case(email))
            .collect()
    } else {
        return Err(AppError::BadRequest(
            "provide an id, order_number or email filter".into(),
        ));
    };

    let total = items.len() as i64;
    let meta = Meta::new(1, total.max(1), total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = match orders::get(state, id).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Order", order, Some(Meta::empty())))
}

pub async fn cancel_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let mut order = match orders::get(state, id).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if order.order_status == OrderStatus::Cancelled {
        return Err(AppError::BadRequest("Order is already cancelled".into()));
    }
    if order.order_status == OrderStatus::Delivered {
        return Err(AppError::BadRequest("Cannot cancel delivered orders".into()));
    }
    if Utc::now() - order.created_at > Duration::hours(24) {
        return Err(AppError::BadRequest(
            "Orders can only be cancelled within 24 hours of ordering".into(),
        ));
    }

    let now = Utc::now();
    order.order_status = OrderStatus::Cancelled;
    order.cancelled_at = Some(now);
    order.updated_at = now;
    orders::update(state, &order).await?;

    if let Err(err) = log_audit(
        state,
        None,
        "order_cancel",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order cancelled",
        order,
        Some(Meta::empty()),
    ))
}

fn build_order_number(order_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = order_id.simple().to_string();
    let short = &suffix[..8];
    format!("ORD-{}-{}", date, short.to_uppercase())
}
