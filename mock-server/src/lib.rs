//! In-memory implementation of the wholesaler catalog backend contract.
//!
//! Mirrors the paths and response shapes of the real (Spring) backend so the
//! client core can be exercised over real HTTP: the list endpoint answers
//! with the `products`/`currentPage` envelope, search and category answer
//! with the Spring `content`/`number` page shape, and delete answers 204.
//! Types are defined independently from `commerce-core` on purpose —
//! integration tests catch schema drift between the two crates.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub sku_code: String,
    pub stock_quantity: i64,
    pub unit: String,
    pub wholesaler_id: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub sku_code: String,
    pub stock_quantity: i64,
    pub unit: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub sku_code: Option<String>,
    pub stock_quantity: Option<i64>,
    pub unit: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Paging envelope of the list endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListPage {
    pub products: Vec<Product>,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
}

/// Paging envelope of the search and category endpoints.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringPage {
    pub content: Vec<Product>,
    pub total_pages: i64,
    pub total_elements: i64,
    pub size: i64,
    pub number: i64,
    pub empty: bool,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(rename = "sortBy", default = "default_sort_by")]
    pub sort_by: String,
    #[serde(rename = "sortDir", default = "default_sort_dir")]
    pub sort_dir: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

#[derive(Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

#[derive(Deserialize)]
pub struct StatusParams {
    pub status: bool,
}

fn default_true() -> bool {
    true
}

fn default_size() -> u32 {
    10
}

fn default_sort_by() -> String {
    "name".to_string()
}

fn default_sort_dir() -> String {
    "asc".to_string()
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    products: HashMap<i64, Product>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/api/wholesalers/{wholesaler_id}/products",
            get(list_products).post(create_product),
        )
        .route(
            "/api/wholesalers/{wholesaler_id}/products/search",
            get(search_products),
        )
        .route(
            "/api/wholesalers/{wholesaler_id}/products/categories",
            get(list_categories),
        )
        .route(
            "/api/wholesalers/{wholesaler_id}/products/category/{category}",
            get(products_by_category),
        )
        .route(
            "/api/wholesalers/{wholesaler_id}/products/{product_id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/api/wholesalers/{wholesaler_id}/products/{product_id}/status",
            patch(toggle_product_status),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn of_wholesaler(store: &Store, wholesaler_id: i64) -> Vec<Product> {
    let mut products: Vec<Product> = store
        .products
        .values()
        .filter(|p| p.wholesaler_id == wholesaler_id)
        .cloned()
        .collect();
    products.sort_by_key(|p| p.id);
    products
}

fn paginate(products: Vec<Product>, page: u32, size: u32) -> (Vec<Product>, i64, i64) {
    let total = products.len() as i64;
    let size = size.max(1) as i64;
    let total_pages = (total + size - 1) / size;
    let start = (page as i64 * size).min(total) as usize;
    let end = (start + size as usize).min(products.len());
    (products[start..end].to_vec(), total, total_pages)
}

fn spring_page(products: Vec<Product>, page: u32, size: u32) -> SpringPage {
    let (content, total_elements, total_pages) = paginate(products, page, size);
    SpringPage {
        empty: content.is_empty(),
        content,
        total_pages,
        total_elements,
        size: size as i64,
        number: page as i64,
    }
}

async fn list_products(
    State(db): State<Db>,
    Path(wholesaler_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Json<ProductListPage> {
    let store = db.read().await;
    let mut products = of_wholesaler(&store, wholesaler_id);
    match params.sort_by.as_str() {
        "price" => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        "category" => products.sort_by(|a, b| a.category.cmp(&b.category)),
        _ => products.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    if params.sort_dir == "desc" {
        products.reverse();
    }
    let (products, total_items, total_pages) = paginate(products, params.page, params.size);
    Json(ProductListPage {
        products,
        total_items,
        total_pages,
        current_page: params.page as i64,
        page_size: params.size as i64,
    })
}

async fn create_product(
    State(db): State<Db>,
    Path(wholesaler_id): Path<i64>,
    Json(input): Json<CreateProduct>,
) -> (StatusCode, Json<Product>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let product = Product {
        id: store.next_id,
        name: input.name,
        description: input.description,
        price: input.price,
        category: input.category,
        sku_code: input.sku_code,
        stock_quantity: input.stock_quantity,
        unit: input.unit,
        wholesaler_id,
        image_url: input.image_url,
        is_active: input.is_active,
    };
    store.products.insert(product.id, product.clone());
    tracing::debug!(id = product.id, "product created");
    (StatusCode::CREATED, Json(product))
}

async fn get_product(
    State(db): State<Db>,
    Path((wholesaler_id, product_id)): Path<(i64, i64)>,
) -> Result<Json<Product>, StatusCode> {
    let store = db.read().await;
    store
        .products
        .get(&product_id)
        .filter(|p| p.wholesaler_id == wholesaler_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_product(
    State(db): State<Db>,
    Path((wholesaler_id, product_id)): Path<(i64, i64)>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    let product = store
        .products
        .get_mut(&product_id)
        .filter(|p| p.wholesaler_id == wholesaler_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(description) = input.description {
        product.description = Some(description);
    }
    if let Some(price) = input.price {
        product.price = price;
    }
    if let Some(category) = input.category {
        product.category = category;
    }
    if let Some(sku_code) = input.sku_code {
        product.sku_code = sku_code;
    }
    if let Some(stock_quantity) = input.stock_quantity {
        product.stock_quantity = stock_quantity;
    }
    if let Some(unit) = input.unit {
        product.unit = unit;
    }
    if let Some(image_url) = input.image_url {
        product.image_url = Some(image_url);
    }
    if let Some(is_active) = input.is_active {
        product.is_active = is_active;
    }
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(db): State<Db>,
    Path((wholesaler_id, product_id)): Path<(i64, i64)>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let owned = store
        .products
        .get(&product_id)
        .is_some_and(|p| p.wholesaler_id == wholesaler_id);
    if !owned {
        return Err(StatusCode::NOT_FOUND);
    }
    store.products.remove(&product_id);
    tracing::debug!(id = product_id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn search_products(
    State(db): State<Db>,
    Path(wholesaler_id): Path<i64>,
    Query(params): Query<SearchParams>,
) -> Json<SpringPage> {
    let store = db.read().await;
    let needle = params.query.to_lowercase();
    let products = of_wholesaler(&store, wholesaler_id)
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect();
    Json(spring_page(products, params.page, params.size))
}

async fn products_by_category(
    State(db): State<Db>,
    Path((wholesaler_id, category)): Path<(i64, String)>,
    Query(params): Query<PageParams>,
) -> Json<SpringPage> {
    let store = db.read().await;
    let products = of_wholesaler(&store, wholesaler_id)
        .into_iter()
        .filter(|p| p.category == category)
        .collect();
    Json(spring_page(products, params.page, params.size))
}

async fn toggle_product_status(
    State(db): State<Db>,
    Path((wholesaler_id, product_id)): Path<(i64, i64)>,
    Query(params): Query<StatusParams>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    let product = store
        .products
        .get_mut(&product_id)
        .filter(|p| p.wholesaler_id == wholesaler_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    product.is_active = params.status;
    Ok(Json(product.clone()))
}

async fn list_categories(
    State(db): State<Db>,
    Path(wholesaler_id): Path<i64>,
) -> Json<Vec<String>> {
    let store = db.read().await;
    let mut categories: Vec<String> = of_wholesaler(&store, wholesaler_id)
        .into_iter()
        .map(|p| p.category)
        .collect();
    categories.sort();
    categories.dedup();
    Json(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: f64, category: &str, wholesaler_id: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            price,
            category: category.to_string(),
            sku_code: format!("SKU-{id}"),
            stock_quantity: 5,
            unit: "piece".to_string(),
            wholesaler_id,
            image_url: None,
            is_active: true,
        }
    }

    #[test]
    fn product_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(product(1, "Milk", 52.5, "Dairy", 3)).unwrap();
        assert_eq!(json["skuCode"], "SKU-1");
        assert_eq!(json["stockQuantity"], 5);
        assert_eq!(json["wholesalerId"], 3);
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn create_product_defaults_active_to_true() {
        let input: CreateProduct = serde_json::from_str(
            r#"{"name":"Milk","price":52.5,"category":"Dairy","skuCode":"MLK","stockQuantity":1,"unit":"liter"}"#,
        )
        .unwrap();
        assert!(input.is_active);
        assert!(input.description.is_none());
    }

    #[test]
    fn update_product_all_fields_optional() {
        let input: UpdateProduct = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_none());
        assert!(input.price.is_none());
        assert!(input.is_active.is_none());
    }

    #[test]
    fn paginate_splits_and_counts() {
        let products: Vec<Product> =
            (1..=7).map(|i| product(i, &format!("P{i}"), 1.0, "C", 1)).collect();
        let (page, total, pages) = paginate(products, 1, 3);
        assert_eq!(total, 7);
        assert_eq!(pages, 3);
        assert_eq!(page.len(), 3);
        assert_eq!(page[0].id, 4);
    }

    #[test]
    fn paginate_past_the_end_is_empty() {
        let products = vec![product(1, "P1", 1.0, "C", 1)];
        let (page, total, pages) = paginate(products, 5, 10);
        assert!(page.is_empty());
        assert_eq!(total, 1);
        assert_eq!(pages, 1);
    }

    #[test]
    fn spring_page_reports_empty_flag() {
        let page = spring_page(Vec::new(), 0, 10);
        assert!(page.empty);
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
    }
}
