use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    error::{AppError, AppResult},
    middleware::auth::{AdminUser, ensure_can_manage_products},
    models::Product,
    response::{ApiResponse, Meta},
    revalidate::{self, STOREFRONT_PATHS},
    routes::params::ProductQuery,
    state::AppState,
    store::{products, query},
};

pub async fn list_products(
    state: &AppState,
    query_params: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let all = products::load_all(state).await?;
    let (items, total) = query::apply(all, &query_params);

    let (page, per_page, _) = query_params.pagination().normalize();
    let meta = Meta::new(page, per_page, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn featured_products(
    state: &AppState,
    limit: Option<usize>,
) -> AppResult<ApiResponse<ProductList>> {
    let all = products::load_all(state).await?;
    let items = query::featured(all, limit);
    Ok(ApiResponse::success(
        "Featured products",
        ProductList { items },
        None,
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = match products::get(state, id).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AdminUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4(),
        punjabi_description: payload
            .punjabi_description
            .unwrap_or_else(|| payload.description.clone()),
        name: payload.name,
        punjabi_name: payload.punjabi_name,
        description: payload.description,
        price: payload.price,
        original_price: payload.original_price,
        category: payload.category,
        subcategory: payload.subcategory,
        images: payload.images,
        colors: payload.colors,
        sizes: payload.sizes,
        stock: payload.stock,
        rating: payload.rating.unwrap_or(4.5),
        reviews: payload.reviews.unwrap_or(0),
        badge: payload.badge,
        is_active: payload.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };

    products::insert(state, &product).await?;

    if let Err(err) = log_audit(
        state,
        Some(user.admin_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    revalidate::invalidate_paths(state, STOREFRONT_PATHS).await;

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AdminUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;

    let mut product = match products::get(state, id).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    if let Some(name) = payload.name {
        product.name = name;
    }
    if let Some(punjabi_name) = payload.punjabi_name {
        product.punjabi_name = punjabi_name;
    }
    if let Some(description) = payload.description {
        product.description = description;
    }
    if let Some(punjabi_description) = payload.punjabi_description {
        product.punjabi_description = punjabi_description;
    }
    if let Some(price) = payload.price {
        product.price = price;
    }
    if let Some(original_price) = payload.original_price {
        product.original_price = original_price;
    }
    if let Some(category) = payload.category {
        product.category = category;
    }
    if let Some(subcategory) = payload.subcategory {
        product.subcategory = Some(subcategory);
    }
    if let Some(images) = payload.images {
        product.images = images;
    }
    if let Some(colors) = payload.colors {
        product.colors = colors;
    }
    if let Some(sizes) = payload.sizes {
        product.sizes = sizes;
    }
    if let Some(stock) = payload.stock {
        product.stock = stock;
    }
    if let Some(rating) = payload.rating {
        product.rating = rating;
    }
    if let Some(reviews) = payload.reviews {
        product.reviews = reviews;
    }
    if let Some(badge) = payload.badge {
        product.badge = Some(badge);
    }
    if let Some(is_active) = payload.is_active {
        product.is_active = is_active;
    }
    product.updated_at = Utc::now();

    products::update(state, &product).await?;

    if let Err(err) = log_audit(
        state,
        Some(user.admin_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    revalidate::invalidate_paths(state, STOREFRONT_PATHS).await;

    Ok(ApiResponse::success(
        "Updated",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_can_manage_products(user)?;

    let found = products::delete(state, id).await?;
    if !found {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        state,
        Some(user.admin_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    revalidate::invalidate_paths(state, STOREFRONT_PATHS).await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
