use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Admin, AdminRole};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}

/// Admin profile without the credential hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    pub is_active: bool,
}

impl From<Admin> for AdminInfo {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            role: admin.role,
            is_active: admin.is_active,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: AdminRole,
    pub exp: usize,
}
