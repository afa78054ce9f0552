use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use quote_server::{Config, Server, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

async fn app() -> Router {
    let config = Config::with_overrides(DATA_DIR, 0);
    let state = ServerState::initialize(&config).await.unwrap();
    assert!(state.has_tariffs());
    Server::router(state)
}

async fn app_without_tariffs() -> Router {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    config.environment = "development".to_string();
    let state = ServerState::initialize(&config).await.unwrap();
    Server::router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn upload_catalog(app: &Router) {
    let (status, body) = send(
        app,
        Method::PUT,
        "/api/catalog",
        Some(json!({
            "source_name": "listino.csv",
            "records": [
                {
                    "Codice": "820",
                    "Descrizione": "Caldaia a condensazione",
                    "PrezzoLordo": "1000",
                    "CostoTrasporto": "30",
                    "CostoInstallazione": "70"
                },
                {
                    "Codice": "822",
                    "Descrizione": "Caldaia 822 con kit",
                    "PrezzoLordo": "1.000,00",
                    "CostoTrasporto": "30",
                    "CostoInstallazione": "70"
                },
                { "Codice": "", "Descrizione": "" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"], 2);
}

async fn add_catalog_line(app: &Router, code: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/quote/lines/catalog",
        Some(json!({ "code": code })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["lines"].as_array().unwrap().last().unwrap().clone()
}

// ==================== Health ====================

#[tokio::test]
async fn test_health_reports_datasets() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tariffs_loaded"], true);
    assert_eq!(body["datasets"]["articles"], 3);
    assert_eq!(body["datasets"]["regions"], 3);
    assert_eq!(body["datasets"]["groupage_buckets"], 4);
    assert_eq!(body["catalog_entries"], 0);
}

#[tokio::test]
async fn test_missing_datasets_degrade_tariff_endpoints() {
    let app = app_without_tariffs().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["tariffs_loaded"], false);
    assert!(body.get("datasets").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tariff/pallet",
        Some(json!({ "region": "Nord", "pallet_type": "EUR" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 9101);

    // pricing keeps working without freight data
    let (status, _) = send(&app, Method::GET, "/api/quote", None).await;
    assert_eq!(status, StatusCode::OK);
}

// ==================== Catalog ====================

#[tokio::test]
async fn test_catalog_upload_and_search() {
    let app = app().await;
    upload_catalog(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/catalog?q=kit", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["code"], "822");
    // only the first separator counts
    assert_eq!(entries[0]["gross_price"], 1.0);

    let (_, body) = send(&app, Method::GET, "/api/catalog", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_catalog_is_rejected() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/catalog",
        Some(json!({ "records": [{ "Codice": " " }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);
}

// ==================== Quote ====================

#[tokio::test]
async fn test_mode_switch_keeps_sell_price() {
    let app = app().await;
    upload_catalog(&app).await;
    let line = add_catalog_line(&app, "820").await;
    let id = line["line"]["id"].as_str().unwrap().to_string();
    assert_eq!(line["result"]["sell_unit"], 1000.0);
    assert_eq!(line["result"]["service_unit"], 100.0);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/quote/lines/{id}"),
        Some(json!({ "field": "discount1", "value": "10" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lines"][0]["result"]["sell_unit"], 900.0);
    assert_eq!(body["lines"][0]["line"]["pricing"]["client_discount"], 10.0);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/quote/mode",
        Some(json!({ "mode": "client_discount" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "client_discount");
    let priced = &body["lines"][0];
    assert_eq!(priced["line"]["pricing"]["mode"], "client_discount");
    assert_eq!(priced["line"]["pricing"]["backup"]["discount1"], 10.0);
    assert_eq!(priced["result"]["sell_unit"], 900.0);
    assert_eq!(body["totals"]["taxable_base"], 1000.0);
    assert_eq!(body["totals"]["tax"], 220.0);
    assert_eq!(body["totals"]["total"], 1220.0);

    let (_, body) = send(
        &app,
        Method::PUT,
        "/api/quote/mode",
        Some(json!({ "mode": "standard" })),
    )
    .await;
    let priced = &body["lines"][0];
    assert_eq!(priced["line"]["pricing"]["terms"]["discount1"], 10.0);
    assert_eq!(priced["result"]["sell_unit"], 900.0);
}

#[tokio::test]
async fn test_manual_line_and_removal() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/quote/lines/manual",
        Some(json!({
            "code": " M1 ",
            "description": "Fornitura speciale",
            "gross_price": "50",
            "margin": 20,
            "quantity": "2,7"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let priced = &body["lines"][0];
    assert_eq!(priced["line"]["code"], "M1");
    assert_eq!(priced["line"]["quantity"], 2);
    assert_eq!(priced["result"]["sell_unit"], 62.5);
    assert_eq!(priced["result"]["line_total"], 125.0);

    let id = priced["line"]["id"].as_str().unwrap();
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/quote/lines/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["lines"].as_array().unwrap().is_empty());
    assert!(body["totals"]["equivalent_discount"].is_null());
}

#[tokio::test]
async fn test_oversized_manual_line_is_capped() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/quote/lines/manual",
        Some(json!({ "gross_price": "1e27", "margin": "99,99" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/quote/lines/manual",
        Some(json!({ "gross_price": "1e20", "quantity": "4000000000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lines"][1]["line"]["quantity"], 99_999);
    assert_eq!(body["lines"][1]["result"]["line_total"], 99_999_000_000_000.0);

    let (status, body) = send(&app, Method::GET, "/api/quote", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lines"][0]["line"]["gross_price"], 1_000_000_000.0);
    assert_eq!(body["lines"][0]["result"]["sell_unit"], 1e13);
    assert!(body["totals"]["total"].as_f64().unwrap().is_finite());
}

#[tokio::test]
async fn test_settings_update() {
    let app = app().await;
    upload_catalog(&app).await;
    add_catalog_line(&app, "820").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/quote/settings",
        Some(json!({ "auto_services": false, "vat_rate": "10" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["settings"]["auto_services"], false);
    assert_eq!(body["settings"]["vat_rate"], 10.0);
    assert_eq!(body["lines"][0]["line"]["transport_cost"], 0.0);
    assert_eq!(body["totals"]["taxable_base"], 1000.0);
    assert_eq!(body["totals"]["tax"], 100.0);

    let (_, body) = send(
        &app,
        Method::PUT,
        "/api/quote/settings",
        Some(json!({ "auto_services": true })),
    )
    .await;
    assert_eq!(body["lines"][0]["line"]["installation_cost"], 70.0);
    assert_eq!(body["settings"]["vat_rate"], 10.0);
}

#[tokio::test]
async fn test_quote_not_found_errors() {
    let app = app().await;
    upload_catalog(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/quote/lines/catalog",
        Some(json!({ "code": "999" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4002);
    assert_eq!(body["details"]["code"], "999");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/quote/lines/missing",
        Some(json!({ "field": "quantity", "value": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

// ==================== Pricing ====================

#[tokio::test]
async fn test_stateless_row_pricing() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/pricing/row",
        Some(json!({
            "gross_price": "100",
            "discount1": 10,
            "discount2": "10",
            "quantity": 2,
            "transport_cost": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["net_unit"], 81.0);
    assert_eq!(body["result"]["sell_unit"], 81.0);
    assert_eq!(body["result"]["line_total"], 172.0);
    assert_eq!(body["equivalent_client_discount"], 19.0);

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/pricing/row",
        Some(json!({
            "mode": "client_discount",
            "gross_price": 100,
            "discount1": 10,
            "client_discount": 25
        })),
    )
    .await;
    assert_eq!(body["result"]["sell_unit"], 75.0);
    assert_eq!(body["line"]["pricing"]["mode"], "client_discount");

    // the quote session is untouched
    let (_, body) = send(&app, Method::GET, "/api/quote", None).await;
    assert!(body["lines"].as_array().unwrap().is_empty());
}

// ==================== Tariff ====================

#[tokio::test]
async fn test_pallet_tariff_by_province() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tariff/pallet",
        Some(json!({ "province": " mi ", "pallet_type": "EUR", "pallets": 3, "insured": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cost"], 139.05);
    assert_eq!(body["insurance_amount"], 4.05);
    assert_eq!(body["insured"], true);
}

#[tokio::test]
async fn test_pallet_tariff_errors() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tariff/pallet",
        Some(json!({ "region": "Isole", "pallet_type": "EUR" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 5002);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tariff/pallet",
        Some(json!({ "region": "Sud", "pallet_type": "HALF" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 5003);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tariff/pallet",
        Some(json!({ "pallet_type": "EUR" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_groupage_tariff_selects_max() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tariff/groupage",
        Some(json!({
            "province": "bg",
            "linear_meters": 2,
            "quintals": "3,3",
            "pallets": 3,
            "insured": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["candidates"].as_array().unwrap().len(), 3);
    assert_eq!(body["insurance_amount"], 3.6);
    assert_eq!(body["cost"], 123.6);
}

#[tokio::test]
async fn test_groupage_without_measures() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tariff/groupage",
        Some(json!({ "province": "NA", "linear_meters": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 5004);
    assert_eq!(body["details"]["bucket"], "NA BA");
}

#[tokio::test]
async fn test_province_resolution() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/tariff/province/bs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["province"], "BS");
    assert_eq!(body["bucket"], "MI BG BS");
    assert_eq!(body["region"], "Nord");

    let (status, body) = send(&app, Method::GET, "/api/tariff/province/XX", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5001);
}

// ==================== Freight ====================

#[tokio::test]
async fn test_freight_uses_article_pack_defaults() {
    let app = app().await;
    upload_catalog(&app).await;
    // 822 has no article of its own and ships like 820
    let line = add_catalog_line(&app, "822").await;
    let id = line["line"]["id"].as_str().unwrap().to_string();
    send(
        &app,
        Method::PATCH,
        &format!("/api/quote/lines/{id}"),
        Some(json!({ "field": "quantity", "value": "3" })),
    )
    .await;

    // quintals and pallets come from the pack: 3 × 110 kg, 3 EUR pallets
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/quote/lines/{id}/freight"),
        Some(json!({ "kind": "groupage", "province": "MI", "linear_meters": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["cost"], 120.0);
    assert_eq!(body["quote"]["candidates"].as_array().unwrap().len(), 3);
    assert_eq!(body["snapshot"]["lines"][0]["line"]["transport_cost"], 120.0);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/quote/lines/{id}/freight"),
        Some(json!({ "kind": "pallet", "province": "RM" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["cost"], 165.0);
    assert_eq!(body["snapshot"]["lines"][0]["line"]["transport_cost"], 165.0);
}

#[tokio::test]
async fn test_freight_for_unknown_line() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/quote/lines/nope/freight",
        Some(json!({ "kind": "pallet", "region": "Nord", "pallet_type": "EUR" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}
