//! Client-side core for the wholesaler commerce application.
//!
//! # Overview
//! Two concerns live here: declarative validation of form input (products,
//! orders, payments, invoices) and a typed client for the wholesaler
//! product-catalog HTTP API. The client builds `HttpRequest` values and
//! parses `HttpResponse` values without touching the network (host-does-IO
//! pattern); the caller executes the actual round-trip, making the core
//! fully deterministic and testable.
//!
//! # Design
//! - `CatalogClient` is stateless — it holds only `base_url`, passed in
//!   explicitly rather than read from ambient configuration.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - The two backend paging envelopes (`PaginatedResponse`, `SpringPage`)
//!   stay distinct types; call sites pick the one their endpoint returns.
//! - Validation runs entirely locally and reports path-qualified field
//!   errors before any request is built.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod schemas;
pub mod types;

pub use client::{CatalogClient, RequestOptions};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use schemas::{
    parse_form, FieldError, InvoiceData, ModifyOrderFormData, OrderFormData, OrderItemForm,
    PaymentFormData, ProductFormData, SchemaError,
};
pub use types::{
    PageQuery, PaginatedResponse, Product, ProductPayload, ProductQuery, SpringPage, Unit,
};
