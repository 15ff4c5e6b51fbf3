use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::get};
use chrono::Utc;
use heritage_storefront_api::{
    config::{AppConfig, SyncConfig},
    error::AppError,
    models::{Category, Product},
    services::sync_service,
    state::AppState,
    store::products,
};
use uuid::Uuid;

// A successful pull replaces the whole catalog; any failure leaves it alone.
#[tokio::test]
async fn successful_pull_replaces_the_catalog() -> anyhow::Result<()> {
    let upstream = spawn_upstream().await?;
    let state = test_state(Some(SyncConfig {
        server_url: upstream,
        secret: "sync-secret".into(),
        interval_secs: 300,
    }));

    products::insert(&state, &local_product("Old Stock Jutti")).await?;

    let report = sync_service::pull_and_replace(&state).await?;
    assert_eq!(report.fetched, 1);
    assert!(report.replaced);

    let catalog = products::load_all(&state).await?;
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].name, "Synced Jutti");
    assert_eq!(catalog[0].category, Category::Women);
    // Defaults fill in what the upstream omits.
    assert_eq!(catalog[0].images, vec!["/placeholder.svg".to_string()]);
    assert_eq!(catalog[0].rating, 4.5);

    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_keeps_existing_data() -> anyhow::Result<()> {
    let state = test_state(Some(SyncConfig {
        server_url: "http://127.0.0.1:1".into(),
        secret: "sync-secret".into(),
        interval_secs: 300,
    }));

    products::insert(&state, &local_product("Old Stock Jutti")).await?;

    let err = sync_service::pull_and_replace(&state).await.unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));

    let catalog = products::load_all(&state).await?;
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].name, "Old Stock Jutti");

    Ok(())
}

#[tokio::test]
async fn rejected_credentials_keep_existing_data() -> anyhow::Result<()> {
    let upstream = spawn_upstream().await?;
    let state = test_state(Some(SyncConfig {
        server_url: upstream,
        secret: "wrong-secret".into(),
        interval_secs: 300,
    }));

    products::insert(&state, &local_product("Old Stock Jutti")).await?;

    let err = sync_service::pull_and_replace(&state).await.unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));

    let catalog = products::load_all(&state).await?;
    assert_eq!(catalog.len(), 1);

    Ok(())
}

#[tokio::test]
async fn overlapping_pulls_conflict() -> anyhow::Result<()> {
    let upstream = spawn_upstream().await?;
    let state = test_state(Some(SyncConfig {
        server_url: upstream,
        secret: "sync-secret".into(),
        interval_secs: 300,
    }));

    let _in_flight = state.sync_gate.lock().await;
    let err = sync_service::pull_and_replace(&state).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    Ok(())
}

#[tokio::test]
async fn unconfigured_sync_is_a_bad_request() {
    let state = test_state(None);
    let err = sync_service::pull_and_replace(&state).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

/// Minimal stand-in for the remote sync server: one authenticated pull route.
async fn spawn_upstream() -> anyhow::Result<String> {
    let app = Router::new().route("/api/sync/products", get(pull_products));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(format!("http://{addr}"))
}

async fn pull_products(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some("Bearer sync-secret");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Unauthorized access" })),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "products": [
                {
                    "name": "Synced Jutti",
                    "description": "Pulled from the sync server",
                    "price": 1500,
                    "category": "women",
                    "stock": 5
                }
            ],
            "count": 1
        })),
    )
}

fn local_product(name: &str) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        punjabi_name: name.to_string(),
        description: "Locally stored product".into(),
        punjabi_description: "Locally stored product".into(),
        price: 2000,
        original_price: 2500,
        category: Category::Men,
        subcategory: None,
        images: vec!["/placeholder.svg".into()],
        colors: vec!["Tan".into()],
        sizes: vec!["8".into()],
        stock: 3,
        rating: 4.0,
        reviews: 2,
        badge: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn test_state(sync: Option<SyncConfig>) -> AppState {
    let data_dir = std::env::temp_dir().join(format!("storefront-test-{}", Uuid::new_v4()));
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: None,
        data_dir,
        jwt_secret: "test-secret".into(),
        payment_secret: None,
        sync,
        revalidate: None,
    };
    AppState::new(config, None).expect("test state")
}
