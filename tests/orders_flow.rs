use heritage_storefront_api::{
    config::AppConfig,
    dto::{
        orders::{CreateOrderRequest, OrderLookupQuery, UpdateOrderStatusRequest},
        payment::VerifyPaymentRequest,
        products::CreateProductRequest,
    },
    error::AppError,
    middleware::auth::AdminUser,
    models::{
        AdminRole, Category, CustomerInfo, OrderItem, OrderStatus, PaymentMethod, PaymentStatus,
        Product,
    },
    services::{admin_service, order_service, payment_service, product_service},
    state::AppState,
};
use uuid::Uuid;

// Checkout flow against the file backend: order totals are computed
// server-side, stock is decremented, and status moves only through the
// admin/payment/cancel paths.
#[tokio::test]
async fn checkout_payment_and_admin_status_flow() -> anyhow::Result<()> {
    let state = test_state();
    let admin = admin_user();

    let product = seed_product(&state, &admin, 10).await?;

    let order = order_service::create_order(&state, order_request(&product, 2))
        .await?
        .data
        .expect("order");
    assert_eq!(order.subtotal, 2 * product.price);
    assert_eq!(order.total, order.subtotal);
    assert!(order.order_number.starts_with("ORD-"));
    assert_eq!(order.order_status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    // Stock was reserved with the order.
    let remaining = product_service::get_product(&state, product.id)
        .await?
        .data
        .expect("product")
        .stock;
    assert_eq!(remaining, 8);

    // Order tracking by number and by email.
    let by_number = order_service::lookup_orders(
        &state,
        OrderLookupQuery {
            order_number: Some(order.order_number.clone()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("orders");
    assert_eq!(by_number.items.len(), 1);

    let by_email = order_service::lookup_orders(
        &state,
        OrderLookupQuery {
            email: Some("sukhdeep@example.com".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("orders");
    assert_eq!(by_email.items.len(), 1);

    // Payment callback with a valid signature confirms the order.
    let signature = payment_service::sign("pay-secret", "rzp_order_1|rzp_pay_1")?;
    let paid = payment_service::verify_payment(
        &state,
        VerifyPaymentRequest {
            razorpay_order_id: "rzp_order_1".into(),
            razorpay_payment_id: "rzp_pay_1".into(),
            razorpay_signature: signature,
            order_id: order.id,
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.order_status, OrderStatus::Confirmed);
    assert_eq!(paid.payment_id.as_deref(), Some("rzp_pay_1"));

    // Admin moves the order along.
    let shipped = admin_service::update_order_status(
        &state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: "shipped".into(),
            tracking_id: Some("TRK-1".into()),
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(shipped.order_status, OrderStatus::Shipped);
    assert_eq!(shipped.tracking_id.as_deref(), Some("TRK-1"));

    let err = admin_service::update_order_status(
        &state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: "paid".into(),
            tracking_id: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

#[tokio::test]
async fn invalid_payment_signature_is_rejected() -> anyhow::Result<()> {
    let state = test_state();
    let admin = admin_user();
    let product = seed_product(&state, &admin, 5).await?;
    let order = order_service::create_order(&state, order_request(&product, 1))
        .await?
        .data
        .expect("order");

    let err = payment_service::verify_payment(
        &state,
        VerifyPaymentRequest {
            razorpay_order_id: "rzp_order_1".into(),
            razorpay_payment_id: "rzp_pay_1".into(),
            razorpay_signature: "not-a-signature".into(),
            order_id: order.id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // The order is untouched.
    let unchanged = order_service::get_order(&state, order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(unchanged.payment_status, PaymentStatus::Pending);

    Ok(())
}

#[tokio::test]
async fn insufficient_stock_fails_checkout() -> anyhow::Result<()> {
    let state = test_state();
    let admin = admin_user();
    let product = seed_product(&state, &admin, 1).await?;

    let err = order_service::create_order(&state, order_request(&product, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Nothing was reserved.
    let remaining = product_service::get_product(&state, product.id)
        .await?
        .data
        .expect("product")
        .stock;
    assert_eq!(remaining, 1);

    Ok(())
}

#[tokio::test]
async fn cancellation_rules_are_enforced() -> anyhow::Result<()> {
    let state = test_state();
    let admin = admin_user();
    let product = seed_product(&state, &admin, 10).await?;

    // A fresh order cancels fine, but only once.
    let order = order_service::create_order(&state, order_request(&product, 1))
        .await?
        .data
        .expect("order");
    let cancelled = order_service::cancel_order(&state, order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());

    let err = order_service::cancel_order(&state, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Delivered orders cannot be cancelled.
    let order = order_service::create_order(&state, order_request(&product, 1))
        .await?
        .data
        .expect("order");
    admin_service::update_order_status(
        &state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: "delivered".into(),
            tracking_id: None,
        },
    )
    .await?;
    let err = order_service::cancel_order(&state, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

async fn seed_product(
    state: &AppState,
    admin: &AdminUser,
    stock: i32,
) -> anyhow::Result<Product> {
    let request = CreateProductRequest {
        name: "Test Jutti".into(),
        punjabi_name: "Jutti".into(),
        description: "A jutti for testing".into(),
        punjabi_description: None,
        price: 1000,
        original_price: 1200,
        category: Category::Women,
        subcategory: None,
        images: vec!["/placeholder.svg".into()],
        colors: vec!["Red".into()],
        sizes: vec!["7".into()],
        stock,
        rating: None,
        reviews: None,
        badge: None,
        is_active: None,
    };
    let product = product_service::create_product(state, admin, request)
        .await?
        .data
        .expect("product");
    Ok(product)
}

fn order_request(product: &Product, quantity: i32) -> CreateOrderRequest {
    CreateOrderRequest {
        customer: CustomerInfo {
            full_name: "Sukhdeep Kaur".into(),
            address: "12 Mall Road".into(),
            city: "Amritsar".into(),
            state: "Punjab".into(),
            pincode: "143001".into(),
            phone: "9876543210".into(),
            email: "sukhdeep@example.com".into(),
        },
        items: vec![OrderItem {
            product_id: product.id,
            name: product.name.clone(),
            punjabi_name: product.punjabi_name.clone(),
            price: product.price,
            quantity,
            size: "7".into(),
            color: "Red".into(),
            image: None,
        }],
        shipping_cost: None,
        payment_method: Some(PaymentMethod::Razorpay),
        notes: None,
    }
}

fn test_state() -> AppState {
    let data_dir = std::env::temp_dir().join(format!("storefront-test-{}", Uuid::new_v4()));
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: None,
        data_dir,
        jwt_secret: "test-secret".into(),
        payment_secret: Some("pay-secret".into()),
        sync: None,
        revalidate: None,
    };
    AppState::new(config, None).expect("test state")
}

fn admin_user() -> AdminUser {
    AdminUser {
        admin_id: Uuid::new_v4(),
        email: "admin@example.com".into(),
        role: AdminRole::Admin,
    }
}
