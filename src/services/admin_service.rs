use chrono::Utc;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::{OrderList, UpdateOrderStatusRequest},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::{Order, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
    store::orders,
};

pub async fn list_all_orders(
    state: &AppState,
    _user: &AdminUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            OrderStatus::parse(raw)
                .ok_or_else(|| AppError::BadRequest("Invalid order status".into()))?,
        ),
        None => None,
    };

    let mut items: Vec<Order> = orders::load_all(state)
        .await?
        .into_iter()
        .filter(|o| status.is_none_or(|s| o.order_status == s))
        .collect();

    // load_all returns newest first; flip for ascending requests.
    if matches!(query.sort_order, Some(SortOrder::Asc)) {
        items.reverse();
    }

    let total = items.len() as i64;
    let (page, per_page, offset) = query.pagination().normalize();
    let items: Vec<Order> = items
        .into_iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .collect();

    let meta = Meta::new(page, per_page, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order_admin(
    state: &AppState,
    _user: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    let order = match orders::get(state, id).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Order found",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AdminUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let status = OrderStatus::parse(&payload.status)
        .ok_or_else(|| AppError::BadRequest("Invalid order status".into()))?;

    let mut order = match orders::get(state, id).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let now = Utc::now();
    order.order_status = status;
    if status == OrderStatus::Cancelled && order.cancelled_at.is_none() {
        order.cancelled_at = Some(now);
    }
    if let Some(tracking_id) = payload.tracking_id {
        order.tracking_id = Some(tracking_id);
    }
    order.updated_at = now;
    orders::update(state, &order).await?;

    if let Err(err) = log_audit(
        state,
        Some(user.admin_id),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": status.as_str() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}
