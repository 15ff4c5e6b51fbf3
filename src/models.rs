use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "product_category", rename_all = "snake_case")]
pub enum Category {
    Men,
    Women,
    Kids,
    Phulkari,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Razorpay,
    Cod,
    BankTransfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "processing" => Some(Self::Processing),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "admin_role", rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Manager,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub punjabi_name: String,
    pub description: String,
    pub punjabi_description: String,
    pub price: i64,
    pub original_price: i64,
    pub category: Category,
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub stock: i32,
    pub rating: f64,
    pub reviews: i32,
    pub badge: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shipping contact captured at checkout, validated at write time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomerInfo {
    #[validate(length(min = 1, max = 100, message = "full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 500, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, max = 50, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 50, message = "state is required"))]
    pub state: String,
    #[validate(custom = "validate_pincode")]
    pub pincode: String,
    #[validate(length(min = 10, max = 15, message = "phone must be 10-15 characters"))]
    pub phone: String,
    #[validate(email(message = "invalid email"))]
    pub email: String,
}

fn validate_pincode(pincode: &str) -> Result<(), validator::ValidationError> {
    if pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("pincode");
        err.message = Some("pincode must be 6 digits".into());
        Err(err)
    }
}

/// Line item with a price snapshot taken when the order was placed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItem {
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    pub punjabi_name: String,
    #[validate(range(min = 0, message = "item price cannot be negative"))]
    pub price: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    pub size: String,
    pub color: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    #[schema(value_type = CustomerInfo)]
    pub customer: Json<CustomerInfo>,
    #[schema(value_type = Vec<OrderItem>)]
    pub items: Json<Vec<OrderItem>>,
    pub subtotal: i64,
    pub shipping_cost: i64,
    pub total: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub order_status: OrderStatus,
    pub tracking_id: Option<String>,
    pub notes: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CartItem {
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "item price cannot be negative"))]
    pub price: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    pub size: String,
    pub color: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Cart {
    pub customer_email: String,
    #[schema(value_type = Vec<CartItem>)]
    pub items: Json<Vec<CartItem>>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_parse_round_trips() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("paid"), None);
    }

    #[test]
    fn pincode_must_be_six_digits() {
        assert!(validate_pincode("143001").is_ok());
        assert!(validate_pincode("1430").is_err());
        assert!(validate_pincode("14300a").is_err());
    }
}
