use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{dto::auth::Claims, error::AppError, models::AdminRole, state::AppState};

#[derive(Debug, Clone)]
pub struct AdminUser {
    pub admin_id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

/// Product deletion is reserved for full admins; managers can run the rest of
/// the panel.
pub fn ensure_can_manage_products(user: &AdminUser) -> Result<(), AppError> {
    match user.role {
        AdminRole::SuperAdmin | AdminRole::Admin => Ok(()),
        AdminRole::Manager => Err(AppError::Forbidden),
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Unauthorized("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        let admin_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid admin id in token".into()))?;

        Ok(AdminUser {
            admin_id,
            email: decoded.claims.email.clone(),
            role: decoded.claims.role,
        })
    }
}
