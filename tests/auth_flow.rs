use chrono::Utc;
use heritage_storefront_api::{
    config::AppConfig,
    dto::auth::{Claims, LoginRequest},
    error::AppError,
    middleware::auth::AdminUser,
    models::{Admin, AdminRole},
    services::auth_service,
    state::AppState,
    store::admins,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

#[tokio::test]
async fn login_issues_a_decodable_token() -> anyhow::Result<()> {
    let state = test_state();
    let admin = seed_admin(&state, true).await?;

    let resp = auth_service::login(
        &state,
        LoginRequest {
            email: admin.email.clone(),
            password: "secret123".into(),
        },
    )
    .await?
    .data
    .expect("login response");

    assert!(resp.token.starts_with("Bearer "));
    assert_eq!(resp.admin.email, admin.email);

    let raw_token = resp.token.trim_start_matches("Bearer ").trim();
    let decoded = decode::<Claims>(
        raw_token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    assert_eq!(decoded.claims.sub, admin.id.to_string());
    assert_eq!(decoded.claims.role, AdminRole::SuperAdmin);

    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_rejected() -> anyhow::Result<()> {
    let state = test_state();
    let admin = seed_admin(&state, true).await?;

    let err = auth_service::login(
        &state,
        LoginRequest {
            email: admin.email.clone(),
            password: "wrong-password".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = auth_service::login(
        &state,
        LoginRequest {
            email: "nobody@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    Ok(())
}

#[tokio::test]
async fn disabled_accounts_cannot_login_or_verify() -> anyhow::Result<()> {
    let state = test_state();
    let admin = seed_admin(&state, false).await?;

    let err = auth_service::login(
        &state,
        LoginRequest {
            email: admin.email.clone(),
            password: "secret123".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let user = AdminUser {
        admin_id: admin.id,
        email: admin.email.clone(),
        role: admin.role,
    };
    let err = auth_service::verify(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    Ok(())
}

async fn seed_admin(state: &AppState, is_active: bool) -> anyhow::Result<Admin> {
    let now = Utc::now();
    let admin = Admin {
        id: Uuid::new_v4(),
        username: "storefront-admin".into(),
        email: "admin@example.com".into(),
        password_hash: auth_service::hash_password("secret123")?,
        role: AdminRole::SuperAdmin,
        is_active,
        last_login: None,
        created_at: now,
        updated_at: now,
    };
    admins::upsert(state, &admin).await?;
    Ok(admin)
}

fn test_state() -> AppState {
    let data_dir = std::env::temp_dir().join(format!("storefront-test-{}", Uuid::new_v4()));
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: None,
        data_dir,
        jwt_secret: "test-secret".into(),
        payment_secret: None,
        sync: None,
        revalidate: None,
    };
    AppState::new(config, None).expect("test state")
}
