use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Order;
use crate::state::AppState;
use crate::store::file;

const INSERT_SQL: &str = r#"
    INSERT INTO orders
        (id, order_number, customer, items, subtotal, shipping_cost, total,
         payment_method, payment_status, payment_id, order_status, tracking_id,
         notes, cancelled_at, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
"#;

const UPDATE_SQL: &str = r#"
    UPDATE orders
    SET customer = $2, items = $3, subtotal = $4, shipping_cost = $5, total = $6,
        payment_method = $7, payment_status = $8, payment_id = $9,
        order_status = $10, tracking_id = $11, notes = $12, cancelled_at = $13,
        updated_at = $14
    WHERE id = $1
"#;

pub async fn load_all(state: &AppState) -> AppResult<Vec<Order>> {
    if let Some(pool) = &state.db {
        match sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
        {
            Ok(items) => return Ok(items),
            Err(err) => {
                tracing::warn!(error = %err, "order read from database failed, falling back to file storage");
            }
        }
    }
    state.files.load(file::ORDERS).await
}

pub async fn get(state: &AppState, id: Uuid) -> AppResult<Option<Order>> {
    if let Some(pool) = &state.db {
        match sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
        {
            Ok(found) => return Ok(found),
            Err(err) => {
                tracing::warn!(error = %err, "order read from database failed, falling back to file storage");
            }
        }
    }
    let items: Vec<Order> = state.files.load(file::ORDERS).await?;
    Ok(items.into_iter().find(|o| o.id == id))
}

pub async fn insert(state: &AppState, order: &Order) -> AppResult<()> {
    let mut db_ok = false;
    if let Some(pool) = &state.db {
        match bind_insert(order).execute(pool).await {
            Ok(_) => db_ok = true,
            Err(err) => {
                tracing::warn!(error = %err, "order insert into database failed, falling back to file storage");
            }
        }
    }

    let mut items: Vec<Order> = state.files.load(file::ORDERS).await?;
    items.retain(|o| o.id != order.id);
    items.insert(0, order.clone());
    persist_file(state, &items, db_ok).await
}

pub async fn update(state: &AppState, order: &Order) -> AppResult<()> {
    let mut db_ok = false;
    if let Some(pool) = &state.db {
        match bind_update(order).execute(pool).await {
            Ok(_) => db_ok = true,
            Err(err) => {
                tracing::warn!(error = %err, "order update in database failed, falling back to file storage");
            }
        }
    }

    let mut items: Vec<Order> = state.files.load(file::ORDERS).await?;
    if let Some(existing) = items.iter_mut().find(|o| o.id == order.id) {
        *existing = order.clone();
    } else {
        items.insert(0, order.clone());
    }
    persist_file(state, &items, db_ok).await
}

async fn persist_file(state: &AppState, items: &[Order], db_ok: bool) -> AppResult<()> {
    match state.files.save(file::ORDERS, items).await {
        Ok(()) => Ok(()),
        Err(err) if db_ok => {
            tracing::warn!(error = %err, "file mirror of orders failed");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn bind_insert(
    order: &Order,
) -> sqlx::query::Query<'static, sqlx::Postgres, sqlx::postgres::PgArguments> {
    sqlx::query(INSERT_SQL)
        .bind(order.id)
        .bind(order.order_number.clone())
        .bind(order.customer.clone())
        .bind(order.items.clone())
        .bind(order.subtotal)
        .bind(order.shipping_cost)
        .bind(order.total)
        .bind(order.payment_method)
        .bind(order.payment_status)
        .bind(order.payment_id.clone())
        .bind(order.order_status)
        .bind(order.tracking_id.clone())
        .bind(order.notes.clone())
        .bind(order.cancelled_at)
        .bind(order.created_at)
        .bind(order.updated_at)
}

fn bind_update(
    order: &Order,
) -> sqlx::query::Query<'static, sqlx::Postgres, sqlx::postgres::PgArguments> {
    sqlx::query(UPDATE_SQL)
        .bind(order.id)
        .bind(order.customer.clone())
        .bind(order.items.clone())
        .bind(order.subtotal)
        .bind(order.shipping_cost)
        .bind(order.total)
        .bind(order.payment_method)
        .bind(order.payment_status)
        .bind(order.payment_id.clone())
        .bind(order.order_status)
        .bind(order.tracking_id.clone())
        .bind(order.notes.clone())
        .bind(order.cancelled_at)
        .bind(order.updated_at)
}
