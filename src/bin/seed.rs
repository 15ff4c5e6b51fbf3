use chrono::Utc;
use uuid::Uuid;

use heritage_storefront_api::{
    config::AppConfig,
    db,
    models::{Admin, AdminRole, Category, Product},
    services::auth_service,
    state::AppState,
    store::{admins, products},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let pool = db::try_connect(&config).await;
    let state = AppState::new(config, pool)?;

    let admin_id = ensure_admin(&state).await?;
    seed_products(&state).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(state: &AppState) -> anyhow::Result<Uuid> {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

    if let Some(existing) = admins::find_by_email(state, &email).await? {
        println!("Admin {email} already exists");
        return Ok(existing.id);
    }

    let now = Utc::now();
    let admin = Admin {
        id: Uuid::new_v4(),
        username,
        email: email.clone(),
        password_hash: auth_service::hash_password(&password)?,
        role: AdminRole::SuperAdmin,
        is_active: true,
        last_login: None,
        created_at: now,
        updated_at: now,
    };
    admins::upsert(state, &admin).await?;

    println!("Created admin {email}");
    Ok(admin.id)
}

async fn seed_products(state: &AppState) -> anyhow::Result<()> {
    let existing = products::load_all(state).await?;

    let samples = [
        (
            "Gold Tilla Jutti",
            "ਸੋਨੇ ਦੀ ਤਿੱਲਾ ਜੁੱਤੀ",
            "Hand-embroidered bridal jutti with gold tilla work",
            Category::Women,
            4999_i64,
            6499_i64,
            25,
        ),
        (
            "Classic Leather Khussa",
            "ਕਲਾਸਿਕ ਚਮੜੇ ਦੀ ਖੁੱਸਾ",
            "Traditional hand-stitched men's khussa in tan leather",
            Category::Men,
            2499,
            2999,
            40,
        ),
        (
            "Kids Rainbow Mojari",
            "ਬੱਚਿਆਂ ਦੀ ਰੰਗ-ਬਿਰੰਗੀ ਮੋਜੜੀ",
            "Soft-sole mojari for kids with colorful threadwork",
            Category::Kids,
            1299,
            1599,
            60,
        ),
        (
            "Heritage Phulkari Dupatta",
            "ਵਿਰਾਸਤੀ ਫੁਲਕਾਰੀ ਦੁਪੱਟਾ",
            "Hand-embroidered phulkari dupatta in traditional patterns",
            Category::Phulkari,
            3499,
            4299,
            30,
        ),
    ];

    for (name, punjabi_name, description, category, price, original_price, stock) in samples {
        if existing.iter().any(|p| p.name == name) {
            continue;
        }
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            punjabi_name: punjabi_name.to_string(),
            description: description.to_string(),
            punjabi_description: description.to_string(),
            price,
            original_price,
            category,
            subcategory: None,
            images: vec!["/placeholder.svg".to_string()],
            colors: vec!["Red".to_string(), "Gold".to_string()],
            sizes: vec!["6".to_string(), "7".to_string(), "8".to_string()],
            stock,
            rating: 4.5,
            reviews: 0,
            badge: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        products::insert(state, &product).await?;
        println!("Seeded product {name}");
    }

    Ok(())
}
