//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Every builder routes through [`CatalogClient::build_request`], the single
//! choke point that prefixes `/api`, merges default headers, and attaches the
//! body. There is no retry, caching, timeout, or cancellation here; a caller
//! that wants any of those wraps the round-trip itself.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{PageQuery, PaginatedResponse, Product, ProductPayload, ProductQuery, SpringPage};

/// Options for a single request, merged over the client defaults.
///
/// Caller-supplied headers override the default
/// `content-type: application/json` on a (case-insensitive) key collision.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            headers: Vec::new(),
            body: None,
        }
    }
}

/// Stateless client for the wholesaler product-catalog API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a request for `<base>/api<path>` from the given options.
    ///
    /// `path` must start with `/` and already contain any query string.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        for (key, value) in options.headers {
            if let Some(existing) = headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
                existing.1 = value;
            } else {
                headers.push((key, value));
            }
        }
        HttpRequest {
            method: options.method,
            url: format!("{}/api{path}", self.base_url),
            headers,
            body: options.body,
        }
    }

    pub fn build_list_products(&self, wholesaler_id: i64, query: &ProductQuery) -> HttpRequest {
        self.build_request(
            &format!(
                "/wholesalers/{wholesaler_id}/products?page={}&size={}&sortBy={}&sortDir={}",
                query.page, query.size, query.sort_by, query.sort_dir
            ),
            RequestOptions::default(),
        )
    }

    pub fn build_get_product(&self, wholesaler_id: i64, product_id: i64) -> HttpRequest {
        self.build_request(
            &format!("/wholesalers/{wholesaler_id}/products/{product_id}"),
            RequestOptions::default(),
        )
    }

    pub fn build_create_product(
        &self,
        wholesaler_id: i64,
        payload: &ProductPayload,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialize(e.to_string()))?;
        Ok(self.build_request(
            &format!("/wholesalers/{wholesaler_id}/products"),
            RequestOptions {
                method: HttpMethod::Post,
                body: Some(body),
                ..Default::default()
            },
        ))
    }

    pub fn build_update_product(
        &self,
        wholesaler_id: i64,
        product_id: i64,
        payload: &ProductPayload,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialize(e.to_string()))?;
        Ok(self.build_request(
            &format!("/wholesalers/{wholesaler_id}/products/{product_id}"),
            RequestOptions {
                method: HttpMethod::Put,
                body: Some(body),
                ..Default::default()
            },
        ))
    }

    pub fn build_delete_product(&self, wholesaler_id: i64, product_id: i64) -> HttpRequest {
        self.build_request(
            &format!("/wholesalers/{wholesaler_id}/products/{product_id}"),
            RequestOptions {
                method: HttpMethod::Delete,
                ..Default::default()
            },
        )
    }

    pub fn build_search_products(
        &self,
        wholesaler_id: i64,
        keyword: &str,
        query: &PageQuery,
    ) -> HttpRequest {
        self.build_request(
            &format!(
                "/wholesalers/{wholesaler_id}/products/search?query={}&page={}&size={}",
                encode(keyword),
                query.page,
                query.size
            ),
            RequestOptions::default(),
        )
    }

    pub fn build_products_by_category(
        &self,
        wholesaler_id: i64,
        category: &str,
        query: &PageQuery,
    ) -> HttpRequest {
        self.build_request(
            &format!(
                "/wholesalers/{wholesaler_id}/products/category/{}?page={}&size={}",
                encode(category),
                query.page,
                query.size
            ),
            RequestOptions::default(),
        )
    }

    pub fn build_toggle_product_status(
        &self,
        wholesaler_id: i64,
        product_id: i64,
        status: bool,
    ) -> HttpRequest {
        self.build_request(
            &format!("/wholesalers/{wholesaler_id}/products/{product_id}/status?status={status}"),
            RequestOptions {
                method: HttpMethod::Patch,
                ..Default::default()
            },
        )
    }

    pub fn build_list_categories(&self, wholesaler_id: i64) -> HttpRequest {
        self.build_request(
            &format!("/wholesalers/{wholesaler_id}/products/categories"),
            RequestOptions::default(),
        )
    }

    pub fn parse_list_products(
        &self,
        response: HttpResponse,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        decode(success_body(response)?)
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        decode(success_body(response)?)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        decode(success_body(response)?)
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        decode(success_body(response)?)
    }

    /// The delete endpoint answers 204 (or an empty 200); any success status
    /// counts, the body is ignored.
    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ApiError> {
        success_body(response)?;
        Ok(())
    }

    pub fn parse_search_products(
        &self,
        response: HttpResponse,
    ) -> Result<SpringPage<Product>, ApiError> {
        decode(success_body(response)?)
    }

    pub fn parse_products_by_category(
        &self,
        response: HttpResponse,
    ) -> Result<SpringPage<Product>, ApiError> {
        decode(success_body(response)?)
    }

    pub fn parse_toggle_product_status(&self, response: HttpResponse) -> Result<Product, ApiError> {
        decode(success_body(response)?)
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        decode(success_body(response)?)
    }
}

/// Percent-encode a value for use in a query string or path segment.
fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Reject non-2xx responses, then extract the body if there is one.
///
/// A 204 or an empty body yields `None` without any parse attempt; the
/// status check always runs before the body is looked at.
fn success_body(response: HttpResponse) -> Result<Option<String>, ApiError> {
    if !(200..300).contains(&response.status) {
        return Err(ApiError::Http {
            status: response.status,
            status_text: response.status_text,
        });
    }
    if response.status == 204 || response.body.is_empty() {
        return Ok(None);
    }
    Ok(Some(response.body))
}

/// Decode a present body into the declared result type.
///
/// A body that does not match the expected shape is a `Decode` error, never
/// a silently mistyped value.
fn decode<T: DeserializeOwned>(body: Option<String>) -> Result<T, ApiError> {
    let body = body.ok_or_else(|| ApiError::Decode("empty response body".to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}
