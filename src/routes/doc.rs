use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AdminInfo, LoginRequest, LoginResponse},
        cart::{CartData, UpdateCartRequest},
        orders::{CreateOrderRequest, OrderList, UpdateOrderStatusRequest},
        payment::VerifyPaymentRequest,
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        sync::SyncReport,
    },
    models::{
        AdminRole, Cart, CartItem, Category, CustomerInfo, Order, OrderItem, OrderStatus,
        PaymentMethod, PaymentStatus, Product,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, health, orders, params, payment, products as product_routes},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        product_routes::list_products,
        product_routes::featured_products,
        product_routes::get_product,
        orders::create_order,
        orders::lookup_orders,
        orders::get_order,
        orders::cancel_order,
        payment::verify_payment,
        cart::get_cart,
        cart::update_cart,
        cart::clear_cart,
        auth::login,
        auth::verify,
        auth::logout,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::sync_products,
    ),
    components(
        schemas(
            Product,
            Category,
            Order,
            OrderItem,
            OrderStatus,
            PaymentMethod,
            PaymentStatus,
            CustomerInfo,
            Cart,
            CartItem,
            AdminRole,
            AdminInfo,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            OrderList,
            VerifyPaymentRequest,
            SyncReport,
            UpdateCartRequest,
            CartData,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<SyncReport>,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Storefront catalog endpoints"),
        (name = "Orders", description = "Checkout and order tracking endpoints"),
        (name = "Payment", description = "Payment verification endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Auth", description = "Admin authentication endpoints"),
        (name = "Admin", description = "Admin panel endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
