use std::cmp::Ordering;
use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{Category, Product};
use crate::routes::params::{ProductQuery, ProductSortBy, SortOrder};

/// Catalog queries run over the loaded record set: filter, sort, then page.
pub fn apply(products: Vec<Product>, query: &ProductQuery) -> (Vec<Product>, i64) {
    let mut items: Vec<Product> = products
        .into_iter()
        .filter(|p| matches(p, query))
        .collect();

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    sort(&mut items, sort_by, sort_order);

    let total = items.len() as i64;
    let (_, per_page, offset) = query.pagination().normalize();
    let items = items
        .into_iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .collect();
    (items, total)
}

fn matches(product: &Product, query: &ProductQuery) -> bool {
    if !product.is_active {
        return false;
    }
    if let Some(category) = query.category {
        if product.category != category {
            return false;
        }
    }
    if let Some(subcategory) = query.subcategory.as_deref().filter(|s| !s.is_empty()) {
        if product.subcategory.as_deref() != Some(subcategory) {
            return false;
        }
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        let hit = product.name.to_lowercase().contains(&needle)
            || product.punjabi_name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }
    if let Some(min) = query.price_min {
        if product.price < min {
            return false;
        }
    }
    if let Some(max) = query.price_max {
        if product.price > max {
            return false;
        }
    }
    true
}

fn sort(items: &mut [Product], by: ProductSortBy, order: SortOrder) {
    items.sort_by(|a, b| {
        let ordering = match by {
            ProductSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            ProductSortBy::Price => a.price.cmp(&b.price),
            ProductSortBy::Rating => a
                .rating
                .partial_cmp(&b.rating)
                .unwrap_or(Ordering::Equal),
            ProductSortBy::Reviews => a.reviews.cmp(&b.reviews),
            ProductSortBy::Name => a.name.cmp(&b.name),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Homepage selection: a fixed per-category distribution, best-rated first,
/// padded with whatever else remains.
pub fn featured(products: Vec<Product>, limit: Option<usize>) -> Vec<Product> {
    let mut active: Vec<Product> = products.into_iter().filter(|p| p.is_active).collect();
    active.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));

    let mut picked: Vec<Product> = Vec::new();
    for (category, take) in [
        (Category::Women, 3),
        (Category::Men, 3),
        (Category::Kids, 2),
        (Category::Phulkari, 2),
    ] {
        picked.extend(
            active
                .iter()
                .filter(|p| p.category == category)
                .take(take)
                .cloned(),
        );
    }

    let picked_ids: HashSet<Uuid> = picked.iter().map(|p| p.id).collect();
    picked.extend(
        active
            .into_iter()
            .filter(|p| !picked_ids.contains(&p.id)),
    );

    if let Some(limit) = limit {
        picked.truncate(limit);
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn product(name: &str, category: Category, price: i64, rating: f64) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            punjabi_name: format!("{name} (pa)"),
            description: format!("Handcrafted {name}"),
            punjabi_description: String::new(),
            price,
            original_price: price + 500,
            category,
            subcategory: None,
            images: vec!["/placeholder.svg".into()],
            colors: vec!["Red".into()],
            sizes: vec!["7".into()],
            stock: 10,
            rating,
            reviews: 0,
            badge: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn catalog() -> Vec<Product> {
        let mut items = vec![
            product("Gold Tilla Jutti", Category::Women, 2499, 4.8),
            product("Bridal Jutti", Category::Women, 4999, 4.9),
            product("Classic Khussa", Category::Men, 1999, 4.2),
            product("Kids Mojari", Category::Kids, 999, 4.0),
            product("Phulkari Dupatta", Category::Phulkari, 3499, 4.7),
        ];
        // Make created_at distinct so the default sort is deterministic.
        for (index, item) in items.iter_mut().enumerate() {
            item.created_at = item.created_at - Duration::seconds(index as i64);
            item.updated_at = item.created_at;
        }
        items
    }

    #[test]
    fn filters_by_category() {
        let query = ProductQuery {
            category: Some(Category::Women),
            ..Default::default()
        };
        let (items, total) = apply(catalog(), &query);
        assert_eq!(total, 2);
        assert!(items.iter().all(|p| p.category == Category::Women));
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let query = ProductQuery {
            search: Some("khussa".into()),
            ..Default::default()
        };
        let (items, total) = apply(catalog(), &query);
        assert_eq!(total, 1);
        assert_eq!(items[0].name, "Classic Khussa");
    }

    #[test]
    fn price_range_is_inclusive() {
        let query = ProductQuery {
            price_min: Some(999),
            price_max: Some(1999),
            ..Default::default()
        };
        let (_, total) = apply(catalog(), &query);
        assert_eq!(total, 2);
    }

    #[test]
    fn sorts_by_price_ascending() {
        let query = ProductQuery {
            sort_by: Some(ProductSortBy::Price),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        };
        let (items, _) = apply(catalog(), &query);
        let prices: Vec<i64> = items.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![999, 1999, 2499, 3499, 4999]);
    }

    #[test]
    fn newest_first_is_the_default_order() {
        let query = ProductQuery::default();
        let (items, _) = apply(catalog(), &query);
        assert_eq!(items[0].name, "Gold Tilla Jutti");
    }

    #[test]
    fn inactive_products_are_hidden() {
        let mut items = catalog();
        items[0].is_active = false;
        let (_, total) = apply(items, &ProductQuery::default());
        assert_eq!(total, 4);
    }

    #[test]
    fn pagination_pages_through_results() {
        let query = ProductQuery {
            page: Some(2),
            per_page: Some(2),
            ..Default::default()
        };
        let (items, total) = apply(catalog(), &query);
        assert_eq!(total, 5);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn featured_respects_category_distribution() {
        let mut items = catalog();
        items.push(product("Third Bridal", Category::Women, 5999, 5.0));
        items.push(product("Fourth Bridal", Category::Women, 6999, 3.0));
        let picked = featured(items, None);
        let women = picked
            .iter()
            .take(3)
            .filter(|p| p.category == Category::Women)
            .count();
        assert_eq!(women, 3, "top slots go to the women's distribution first");
        // Nothing is dropped, only reordered.
        assert_eq!(picked.len(), 7);
    }

    #[test]
    fn featured_honors_limit() {
        let picked = featured(catalog(), Some(2));
        assert_eq!(picked.len(), 2);
    }
}
