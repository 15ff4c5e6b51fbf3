use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::auth::{AdminInfo, Claims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    response::{ApiResponse, Meta},
    state::AppState,
    store::admins,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    payload.validate()?;
    let LoginRequest { email, password } = payload;

    let admin = match admins::find_by_email(state, &email).await? {
        Some(admin) => admin,
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };

    if !admin.is_active {
        return Err(AppError::Unauthorized("Account is disabled".into()));
    }

    let parsed_hash = PasswordHash::new(&admin.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: admin.id.to_string(),
        email: admin.email.clone(),
        role: admin.role,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    admins::touch_last_login(state, admin.id).await;

    if let Err(err) = log_audit(
        state,
        Some(admin.id),
        "admin_login",
        Some("admins"),
        Some(serde_json::json!({ "admin_id": admin.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let resp = LoginResponse {
        token: format!("Bearer {}", token),
        admin: AdminInfo::from(admin),
    };

    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

/// Confirms the bearer token still maps to a live, active account.
pub async fn verify(state: &AppState, user: &AdminUser) -> AppResult<ApiResponse<AdminInfo>> {
    let admin = admins::find_by_email(state, &user.email)
        .await?
        .filter(|a| a.is_active)
        .ok_or_else(|| AppError::Unauthorized("Account is disabled or removed".into()))?;

    Ok(ApiResponse::success(
        "Token valid",
        AdminInfo::from(admin),
        Some(Meta::empty()),
    ))
}

/// Tokens are stateless; logout is an audit record and a client-side discard.
pub async fn logout(state: &AppState, user: &AdminUser) -> AppResult<ApiResponse<serde_json::Value>> {
    if let Err(err) = log_audit(
        state,
        Some(user.admin_id),
        "admin_logout",
        Some("admins"),
        Some(serde_json::json!({ "admin_id": user.admin_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
