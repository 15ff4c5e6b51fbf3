use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Category, Product};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "punjabi name must be 1-100 characters"))]
    pub punjabi_name: String,
    #[validate(length(min = 1, max = 1000, message = "description must be 1-1000 characters"))]
    pub description: String,
    #[validate(length(max = 1000, message = "punjabi description cannot exceed 1000 characters"))]
    pub punjabi_description: Option<String>,
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: i64,
    #[validate(range(min = 0, message = "original price cannot be negative"))]
    pub original_price: i64,
    pub category: Category,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: i32,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    #[validate(range(min = 0, message = "reviews count cannot be negative"))]
    pub reviews: Option<i32>,
    pub badge: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "punjabi name must be 1-100 characters"))]
    pub punjabi_name: Option<String>,
    #[validate(length(min = 1, max = 1000, message = "description must be 1-1000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 1000, message = "punjabi description cannot exceed 1000 characters"))]
    pub punjabi_description: Option<String>,
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: Option<i64>,
    #[validate(range(min = 0, message = "original price cannot be negative"))]
    pub original_price: Option<i64>,
    pub category: Option<Category>,
    pub subcategory: Option<String>,
    pub images: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: Option<i32>,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    #[validate(range(min = 0, message = "reviews count cannot be negative"))]
    pub reviews: Option<i32>,
    pub badge: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
