use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::Product;
use crate::state::AppState;
use crate::store::file;

const INSERT_SQL: &str = r#"
    INSERT INTO products
        (id, name, punjabi_name, description, punjabi_description, price,
         original_price, category, subcategory, images, colors, sizes, stock,
         rating, reviews, badge, is_active, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
            $16, $17, $18, $19)
"#;

const UPDATE_SQL: &str = r#"
    UPDATE products
    SET name = $2, punjabi_name = $3, description = $4, punjabi_description = $5,
        price = $6, original_price = $7, category = $8, subcategory = $9,
        images = $10, colors = $11, sizes = $12, stock = $13, rating = $14,
        reviews = $15, badge = $16, is_active = $17, updated_at = $18
    WHERE id = $1
"#;

pub async fn load_all(state: &AppState) -> AppResult<Vec<Product>> {
    if let Some(pool) = &state.db {
        match sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
        {
            Ok(items) => return Ok(items),
            Err(err) => {
                tracing::warn!(error = %err, "product read from database failed, falling back to file storage");
            }
        }
    }
    state.files.load(file::PRODUCTS).await
}

pub async fn get(state: &AppState, id: Uuid) -> AppResult<Option<Product>> {
    if let Some(pool) = &state.db {
        match sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
        {
            Ok(found) => return Ok(found),
            Err(err) => {
                tracing::warn!(error = %err, "product read from database failed, falling back to file storage");
            }
        }
    }
    let items: Vec<Product> = state.files.load(file::PRODUCTS).await?;
    Ok(items.into_iter().find(|p| p.id == id))
}

pub async fn insert(state: &AppState, product: &Product) -> AppResult<()> {
    let mut db_ok = false;
    if let Some(pool) = &state.db {
        match bind_insert(product).execute(pool).await {
            Ok(_) => db_ok = true,
            Err(err) => {
                tracing::warn!(error = %err, "product insert into database failed, falling back to file storage");
            }
        }
    }

    let mut items: Vec<Product> = state.files.load(file::PRODUCTS).await?;
    items.retain(|p| p.id != product.id);
    items.insert(0, product.clone());
    persist_file(state, &items, db_ok).await
}

pub async fn update(state: &AppState, product: &Product) -> AppResult<()> {
    let mut db_ok = false;
    if let Some(pool) = &state.db {
        match bind_update(product).execute(pool).await {
            Ok(_) => db_ok = true,
            Err(err) => {
                tracing::warn!(error = %err, "product update in database failed, falling back to file storage");
            }
        }
    }

    let mut items: Vec<Product> = state.files.load(file::PRODUCTS).await?;
    if let Some(existing) = items.iter_mut().find(|p| p.id == product.id) {
        *existing = product.clone();
    } else {
        items.insert(0, product.clone());
    }
    persist_file(state, &items, db_ok).await
}

pub async fn delete(state: &AppState, id: Uuid) -> AppResult<bool> {
    let mut db_ok = false;
    let mut found = false;
    if let Some(pool) = &state.db {
        match sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
        {
            Ok(result) => {
                db_ok = true;
                found = result.rows_affected() > 0;
            }
            Err(err) => {
                tracing::warn!(error = %err, "product delete in database failed, falling back to file storage");
            }
        }
    }

    let mut items: Vec<Product> = state.files.load(file::PRODUCTS).await?;
    let before = items.len();
    items.retain(|p| p.id != id);
    found = found || items.len() < before;
    persist_file(state, &items, db_ok).await?;
    Ok(found)
}

/// Full replacement is the only consistency policy for sync pulls: the whole
/// catalog is swapped for the fetched one, atomically on the database path.
pub async fn replace_all(state: &AppState, products: &[Product]) -> AppResult<()> {
    let mut db_ok = false;
    if let Some(pool) = &state.db {
        match replace_all_db(pool, products).await {
            Ok(()) => db_ok = true,
            Err(err) => {
                tracing::warn!(error = %err, "catalog replacement in database failed, falling back to file storage");
            }
        }
    }
    persist_file(state, products, db_ok).await
}

async fn replace_all_db(pool: &DbPool, products: &[Product]) -> Result<(), sqlx::Error> {
    let mut txn = pool.begin().await?;
    sqlx::query("DELETE FROM products").execute(&mut *txn).await?;
    for product in products {
        bind_insert(product).execute(&mut *txn).await?;
    }
    txn.commit().await
}

/// The file copy mirrors the database; a failed mirror is only fatal when the
/// file backend is the primary.
async fn persist_file(state: &AppState, items: &[Product], db_ok: bool) -> AppResult<()> {
    match state.files.save(file::PRODUCTS, items).await {
        Ok(()) => Ok(()),
        Err(err) if db_ok => {
            tracing::warn!(error = %err, "file mirror of products failed");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn bind_insert(
    product: &Product,
) -> sqlx::query::Query<'static, sqlx::Postgres, sqlx::postgres::PgArguments> {
    sqlx::query(INSERT_SQL)
        .bind(product.id)
        .bind(product.name.clone())
        .bind(product.punjabi_name.clone())
        .bind(product.description.clone())
        .bind(product.punjabi_description.clone())
        .bind(product.price)
        .bind(product.original_price)
        .bind(product.category)
        .bind(product.subcategory.clone())
        .bind(product.images.clone())
        .bind(product.colors.clone())
        .bind(product.sizes.clone())
        .bind(product.stock)
        .bind(product.rating)
        .bind(product.reviews)
        .bind(product.badge.clone())
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
}

fn bind_update(
    product: &Product,
) -> sqlx::query::Query<'static, sqlx::Postgres, sqlx::postgres::PgArguments> {
    sqlx::query(UPDATE_SQL)
        .bind(product.id)
        .bind(product.name.clone())
        .bind(product.punjabi_name.clone())
        .bind(product.description.clone())
        .bind(product.punjabi_description.clone())
        .bind(product.price)
        .bind(product.original_price)
        .bind(product.category)
        .bind(product.subcategory.clone())
        .bind(product.images.clone())
        .bind(product.colors.clone())
        .bind(product.sizes.clone())
        .bind(product.stock)
        .bind(product.rating)
        .bind(product.reviews)
        .bind(product.badge.clone())
        .bind(product.is_active)
        .bind(product.updated_at)
}
