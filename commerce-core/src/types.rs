//! Wire types for the wholesaler product-catalog API.
//!
//! # Design
//! These types mirror the backend's JSON contract (camelCase fields, numeric
//! ids) but are defined independently from the mock-server crate; integration
//! tests catch any schema drift between the two. The backend exposes two
//! incompatible paging envelopes — `PaginatedResponse` from the list endpoint
//! and `SpringPage` from search/category — and they stay distinct types here
//! because the shapes genuinely differ in the source contract.

use serde::{Deserialize, Serialize};

/// Measurement unit a product is sold in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Liter,
    Piece,
    Box,
    Packet,
    Carton,
    Dozen,
    Gms,
    Ml,
}

/// A product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub sku_code: String,
    pub stock_quantity: i64,
    pub unit: Unit,
    pub wholesaler_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesaler_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Partial product for create and update request bodies. Only the fields
/// present are serialized; the backend fills or keeps the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wholesaler_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Paging envelope returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub products: Vec<T>,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Paging envelope returned by the search and category endpoints
/// (Spring Data's `Page` serialization).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringPage<T> {
    pub content: Vec<T>,
    pub total_pages: i64,
    pub total_elements: i64,
    pub size: i64,
    pub number: i64,
    pub empty: bool,
}

/// Query parameters for the list endpoint.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub sort_dir: String,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort_by: "name".to_string(),
            sort_dir: "asc".to_string(),
        }
    }
}

/// Query parameters for the search and category endpoints.
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}
