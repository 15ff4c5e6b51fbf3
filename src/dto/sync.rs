use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Category, Product};

/// Body returned by the sync server's `GET /api/sync/products`.
#[derive(Debug, Deserialize)]
pub struct SyncPullResponse {
    pub success: bool,
    #[serde(default)]
    pub products: Vec<SyncProduct>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Product record as the sync server ships it; optional fields take the same
/// defaults the storefront applies everywhere else.
#[derive(Debug, Deserialize, Validate)]
pub struct SyncProduct {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub punjabi_name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub punjabi_description: Option<String>,
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: i64,
    #[validate(range(min = 0, message = "original price cannot be negative"))]
    pub original_price: Option<i64>,
    pub category: Category,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: i32,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    #[validate(range(min = 0, message = "reviews count cannot be negative"))]
    pub reviews: Option<i32>,
    pub badge: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SyncProduct {
    pub fn into_product(self, now: DateTime<Utc>) -> Product {
        let images = if self.images.is_empty() {
            vec!["/placeholder.svg".to_string()]
        } else {
            self.images
        };
        let colors = if self.colors.is_empty() {
            vec!["Default".to_string()]
        } else {
            self.colors
        };
        let sizes = if self.sizes.is_empty() {
            vec!["One Size".to_string()]
        } else {
            self.sizes
        };
        Product {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            punjabi_name: self.punjabi_name.unwrap_or_else(|| self.name.clone()),
            punjabi_description: self
                .punjabi_description
                .unwrap_or_else(|| self.description.clone()),
            original_price: self.original_price.unwrap_or(self.price),
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            subcategory: self.subcategory,
            images,
            colors,
            sizes,
            stock: self.stock,
            rating: self.rating.unwrap_or(4.5),
            reviews: self.reviews.unwrap_or(0),
            badge: self.badge,
            is_active: self.is_active.unwrap_or(true),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}

/// Outcome of one pull: how many records the upstream sent and whether the
/// local catalog was replaced.
#[derive(Debug, Serialize, ToSchema)]
pub struct SyncReport {
    pub fetched: usize,
    pub replaced: bool,
}
