use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::CartItem;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCartRequest {
    #[validate]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartData {
    pub items: Vec<CartItem>,
}
