//! Full catalog lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP using ureq. Validates that the core's request
//! building and response parsing work end-to-end with the actual server,
//! including the two distinct paging envelopes.

use commerce_core::{
    ApiError, CatalogClient, HttpMethod, HttpResponse, PageQuery, ProductPayload, ProductQuery,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: commerce_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Patch, None) => agent.patch(&req.url).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status();
    HttpResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        headers: Vec::new(),
        body: response.body_mut().read_to_string().unwrap_or_default(),
    }
}

fn milk() -> ProductPayload {
    ProductPayload {
        name: Some("Milk".to_string()),
        description: Some("Full cream, 1 liter".to_string()),
        price: Some(52.5),
        category: Some("Dairy".to_string()),
        sku_code: Some("MLK-1L".to_string()),
        stock_quantity: Some(20),
        unit: Some(commerce_core::Unit::Liter),
        ..Default::default()
    }
}

fn rice() -> ProductPayload {
    ProductPayload {
        name: Some("Basmati Rice".to_string()),
        description: Some("25kg bag".to_string()),
        price: Some(1450.0),
        category: Some("Grains".to_string()),
        sku_code: Some("RICE-25".to_string()),
        stock_quantity: Some(8),
        unit: Some(commerce_core::Unit::Kg),
        ..Default::default()
    }
}

#[test]
fn catalog_lifecycle() {
    // Step 1: start mock server on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    let client = CatalogClient::new(&format!("http://{addr}"));
    let wholesaler = 1;

    // Step 2: list — should be empty.
    let req = client.build_list_products(wholesaler, &ProductQuery::default());
    let page = client.parse_list_products(execute(req)).unwrap();
    assert!(page.products.is_empty(), "expected empty catalog");
    assert_eq!(page.total_items, 0);

    // Step 3: create two products, echoed fields must round-trip unchanged.
    let req = client.build_create_product(wholesaler, &milk()).unwrap();
    let created_milk = client.parse_create_product(execute(req)).unwrap();
    assert_eq!(created_milk.name, "Milk");
    assert_eq!(created_milk.price, 52.5);
    assert_eq!(created_milk.sku_code, "MLK-1L");
    assert_eq!(created_milk.wholesaler_id, wholesaler);
    assert!(created_milk.is_active, "active flag defaults to true");

    let req = client.build_create_product(wholesaler, &rice()).unwrap();
    let created_rice = client.parse_create_product(execute(req)).unwrap();

    // Step 4: list — sorted by name ascending by default.
    let req = client.build_list_products(wholesaler, &ProductQuery::default());
    let page = client.parse_list_products(execute(req)).unwrap();
    assert_eq!(page.total_items, 2);
    assert_eq!(page.products[0].name, "Basmati Rice");
    assert_eq!(page.products[1].name, "Milk");

    // Step 5: get one by id.
    let req = client.build_get_product(wholesaler, created_milk.id);
    let fetched = client.parse_get_product(execute(req)).unwrap();
    assert_eq!(fetched, created_milk);

    // Step 6: partial update keeps untouched fields.
    let update = ProductPayload {
        price: Some(55.0),
        stock_quantity: Some(0),
        ..Default::default()
    };
    let req = client.build_update_product(wholesaler, created_milk.id, &update).unwrap();
    let updated = client.parse_update_product(execute(req)).unwrap();
    assert_eq!(updated.price, 55.0);
    assert_eq!(updated.stock_quantity, 0);
    assert_eq!(updated.name, "Milk");

    // Step 7: search answers with the Spring page shape.
    let req = client.build_search_products(wholesaler, "rice", &PageQuery::default());
    let page = client.parse_search_products(execute(req)).unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].id, created_rice.id);
    assert!(!page.empty);

    // Step 8: a keyword needing percent-encoding travels intact.
    let req = client.build_search_products(wholesaler, "milk & eggs", &PageQuery::default());
    let page = client.parse_search_products(execute(req)).unwrap();
    assert!(page.empty);

    // Step 9: category filter.
    let req = client.build_products_by_category(wholesaler, "Dairy", &PageQuery::default());
    let page = client.parse_products_by_category(execute(req)).unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].category, "Dairy");

    // Step 10: toggle active flag off.
    let req = client.build_toggle_product_status(wholesaler, created_milk.id, false);
    let toggled = client.parse_toggle_product_status(execute(req)).unwrap();
    assert!(!toggled.is_active);

    // Step 11: distinct categories.
    let req = client.build_list_categories(wholesaler);
    let categories = client.parse_list_categories(execute(req)).unwrap();
    assert_eq!(categories, vec!["Dairy".to_string(), "Grains".to_string()]);

    // Step 12: delete answers 204 and parses to ().
    let req = client.build_delete_product(wholesaler, created_rice.id);
    client.parse_delete_product(execute(req)).unwrap();

    // Step 13: get after delete surfaces the HTTP error with its status text.
    let req = client.build_get_product(wholesaler, created_rice.id);
    let err = client.parse_get_product(execute(req)).unwrap_err();
    match err {
        ApiError::Http { status, status_text } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("expected Http error, got {other:?}"),
    }

    // Step 14: another wholesaler sees an empty catalog.
    let req = client.build_list_products(2, &ProductQuery::default());
    let page = client.parse_list_products(execute(req)).unwrap();
    assert!(page.products.is_empty());
}
