use crate::error::AppResult;
use crate::models::Cart;
use crate::state::AppState;
use crate::store::file;

pub async fn get(state: &AppState, customer_email: &str) -> AppResult<Option<Cart>> {
    if let Some(pool) = &state.db {
        match sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE customer_email = $1")
            .bind(customer_email.to_string())
            .fetch_optional(pool)
            .await
        {
            Ok(found) => return Ok(found),
            Err(err) => {
                tracing::warn!(error = %err, "cart read from database failed, falling back to file storage");
            }
        }
    }
    let items: Vec<Cart> = state.files.load(file::CARTS).await?;
    Ok(items
        .into_iter()
        .find(|c| c.customer_email.eq_ignore_ascii_case(customer_email)))
}

pub async fn put(state: &AppState, cart: &Cart) -> AppResult<()> {
    let mut db_ok = false;
    if let Some(pool) = &state.db {
        let result = sqlx::query(
            r#"
            INSERT INTO carts (customer_email, items, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (customer_email) DO UPDATE
            SET items = EXCLUDED.items, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(cart.customer_email.clone())
        .bind(cart.items.clone())
        .bind(cart.updated_at)
        .execute(pool)
        .await;
        match result {
            Ok(_) => db_ok = true,
            Err(err) => {
                tracing::warn!(error = %err, "cart upsert in database failed, falling back to file storage");
            }
        }
    }

    let mut items: Vec<Cart> = state.files.load(file::CARTS).await?;
    items.retain(|c| !c.customer_email.eq_ignore_ascii_case(&cart.customer_email));
    items.push(cart.clone());
    match state.files.save(file::CARTS, &items).await {
        Ok(()) => Ok(()),
        Err(err) if db_ok => {
            tracing::warn!(error = %err, "file mirror of carts failed");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

pub async fn remove(state: &AppState, customer_email: &str) -> AppResult<bool> {
    let mut db_ok = false;
    let mut found = false;
    if let Some(pool) = &state.db {
        match sqlx::query("DELETE FROM carts WHERE customer_email = $1")
            .bind(customer_email.to_string())
            .execute(pool)
            .await
        {
            Ok(result) => {
                db_ok = true;
                found = result.rows_affected() > 0;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cart delete in database failed, falling back to file storage");
            }
        }
    }

    let mut items: Vec<Cart> = state.files.load(file::CARTS).await?;
    let before = items.len();
    items.retain(|c| !c.customer_email.eq_ignore_ascii_case(customer_email));
    found = found || items.len() < before;
    match state.files.save(file::CARTS, &items).await {
        Ok(()) => Ok(found),
        Err(err) if db_ok => {
            tracing::warn!(error = %err, "file mirror of carts failed");
            Ok(found)
        }
        Err(err) => Err(err),
    }
}
