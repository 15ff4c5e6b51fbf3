use heritage_storefront_api::{
    config::AppConfig,
    dto::products::{CreateProductRequest, UpdateProductRequest},
    error::AppError,
    middleware::auth::AdminUser,
    models::{AdminRole, Category},
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};
use uuid::Uuid;

// Admin CRUD against the file backend: created products show up in listings,
// invalid writes are rejected, deleted products disappear.
#[tokio::test]
async fn product_crud_round_trip() -> anyhow::Result<()> {
    let state = test_state();
    let admin = admin_user(AdminRole::Admin);

    let created = product_service::create_product(&state, &admin, sample_request())
        .await?
        .data
        .expect("created product");
    assert_eq!(created.name, "Gold Tilla Jutti");
    assert_eq!(created.punjabi_description, created.description);
    assert!(created.is_active);

    let listed = product_service::list_products(&state, ProductQuery::default())
        .await?
        .data
        .expect("product list");
    assert!(listed.items.iter().any(|p| p.id == created.id));

    let fetched = product_service::get_product(&state, created.id)
        .await?
        .data
        .expect("product");
    assert_eq!(fetched.id, created.id);

    product_service::delete_product(&state, &admin, created.id).await?;
    let listed = product_service::list_products(&state, ProductQuery::default())
        .await?
        .data
        .expect("product list");
    assert!(listed.items.is_empty());

    let missing = product_service::get_product(&state, created.id).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    Ok(())
}

#[tokio::test]
async fn negative_stock_and_price_are_rejected() -> anyhow::Result<()> {
    let state = test_state();
    let admin = admin_user(AdminRole::Admin);

    let created = product_service::create_product(&state, &admin, sample_request())
        .await?
        .data
        .expect("created product");

    let update = UpdateProductRequest {
        stock: Some(-1),
        ..empty_update()
    };
    let err = product_service::update_product(&state, &admin, created.id, update)
        .await
        .unwrap_err();
    match err {
        AppError::Validation(message) => assert!(message.contains("stock")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let mut bad_create = sample_request();
    bad_create.price = -100;
    let err = product_service::create_product(&state, &admin, bad_create)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    Ok(())
}

#[tokio::test]
async fn managers_cannot_delete_products() -> anyhow::Result<()> {
    let state = test_state();
    let admin = admin_user(AdminRole::Admin);
    let manager = admin_user(AdminRole::Manager);

    let created = product_service::create_product(&state, &admin, sample_request())
        .await?
        .data
        .expect("created product");

    let err = product_service::delete_product(&state, &manager, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    Ok(())
}

#[tokio::test]
async fn catalog_filters_apply_to_listings() -> anyhow::Result<()> {
    let state = test_state();
    let admin = admin_user(AdminRole::SuperAdmin);

    product_service::create_product(&state, &admin, sample_request()).await?;
    let mut khussa = sample_request();
    khussa.name = "Classic Khussa".into();
    khussa.punjabi_name = "Khussa".into();
    khussa.category = Category::Men;
    khussa.price = 1999;
    product_service::create_product(&state, &admin, khussa).await?;

    let query = ProductQuery {
        category: Some(Category::Men),
        ..Default::default()
    };
    let listed = product_service::list_products(&state, query)
        .await?
        .data
        .expect("product list");
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].name, "Classic Khussa");

    let query = ProductQuery {
        search: Some("tilla".into()),
        ..Default::default()
    };
    let listed = product_service::list_products(&state, query)
        .await?
        .data
        .expect("product list");
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].name, "Gold Tilla Jutti");

    Ok(())
}

fn test_state() -> AppState {
    let data_dir = std::env::temp_dir().join(format!("storefront-test-{}", Uuid::new_v4()));
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: None,
        data_dir,
        jwt_secret: "test-secret".into(),
        payment_secret: Some("pay-secret".into()),
        sync: None,
        revalidate: None,
    };
    AppState::new(config, None).expect("test state")
}

fn admin_user(role: AdminRole) -> AdminUser {
    AdminUser {
        admin_id: Uuid::new_v4(),
        email: "admin@example.com".into(),
        role,
    }
}

fn sample_request() -> CreateProductRequest {
    CreateProductRequest {
        name: "Gold Tilla Jutti".into(),
        punjabi_name: "Tilla Jutti".into(),
        description: "Hand-embroidered bridal jutti".into(),
        punjabi_description: None,
        price: 4999,
        original_price: 6499,
        category: Category::Women,
        subcategory: Some("bridal".into()),
        images: vec!["/placeholder.svg".into()],
        colors: vec!["Red".into()],
        sizes: vec!["7".into()],
        stock: 10,
        rating: None,
        reviews: None,
        badge: None,
        is_active: None,
    }
}

fn empty_update() -> UpdateProductRequest {
    UpdateProductRequest {
        name: None,
        punjabi_name: None,
        description: None,
        punjabi_description: None,
        price: None,
        original_price: None,
        category: None,
        subcategory: None,
        images: None,
        colors: None,
        sizes: None,
        stock: None,
        rating: None,
        reviews: None,
        badge: None,
        is_active: None,
    }
}
