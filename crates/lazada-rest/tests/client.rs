use auth::{AccessToken, AppCredentials, HttpMethod, RequestSigner};
use lazada_rest::{
    ClientConfig, GetProductRequest, LazadaClient, LazadaError, ListProductsRequest,
    PriceQuantitySku, ProductFilter, UpdatePriceQuantityRequest,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const APP_KEY: &str = "105827";
const APP_SECRET: &str = "test-secret";

/// Accept one connection, answer with `body` and return the raw request.
async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            let n = socket.read(&mut buf).await.unwrap();
            raw.extend_from_slice(&buf[..n]);
            if n == 0 {
                break;
            }
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|l| {
                        l.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if raw.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&raw).to_string()
    });

    (base_url, handle)
}

fn credentials() -> AppCredentials {
    AppCredentials::new(APP_KEY, APP_SECRET)
}

fn rest_client(base_url: &str) -> LazadaClient {
    LazadaClient::new(
        credentials(),
        ClientConfig::default().with_rest_base_url(base_url),
    )
    .unwrap()
}

fn token() -> AccessToken {
    AccessToken::new("50000601c30atpedfgu3LVvik87Ixlsvle3mSoB7701ceb156fPunYZ43GBg")
}

/// Split a raw request into its request line path and decoded query.
fn request_query(raw: &str) -> (String, BTreeMap<String, String>) {
    let target = raw.split_whitespace().nth(1).unwrap();
    let (path, query) = target.split_once('?').unwrap();
    (
        path.to_string(),
        serde_urlencoded::from_str(query).unwrap(),
    )
}

fn request_body(raw: &str) -> &str {
    raw.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or("")
}

#[tokio::test]
async fn get_seller_signs_query_and_sends_bearer() {
    let (base_url, server) = serve_once(
        200,
        r#"{"code":"0","request_id":"0b1a2c","data":{"seller_id":1000123,"name":"Shop VN","short_code":"VN1AB","verified":true}}"#,
    )
    .await;
    let client = rest_client(&base_url);

    let seller = client.get_seller(&token()).await.unwrap();
    let raw = server.await.unwrap();

    assert_eq!(seller.seller_id.as_deref(), Some("1000123"));
    assert_eq!(seller.name.as_deref(), Some("Shop VN"));
    assert_eq!(seller.verified, Some(true));

    assert!(raw.starts_with("GET /seller/get?"));
    assert!(raw
        .to_ascii_lowercase()
        .contains(&format!("authorization: bearer {}", token().expose_secret()).to_ascii_lowercase()));

    let (path, query) = request_query(&raw);
    assert_eq!(path, "/seller/get");
    assert_eq!(query["app_key"], APP_KEY);
    assert_eq!(query["sign_method"], "sha256");
    assert_eq!(query["access_token"], token().expose_secret());

    let timestamp: i64 = query["timestamp"].parse().unwrap();
    let creds = credentials();
    let expected = RequestSigner::new(&creds)
        .sign_request(
            HttpMethod::Get,
            "/seller/get",
            &BTreeMap::new(),
            Some(&token()),
            timestamp,
        )
        .unwrap();
    assert_eq!(query["sign"], expected.sign());
}

#[tokio::test]
async fn list_products_puts_call_params_in_query() {
    let (base_url, server) = serve_once(
        200,
        r#"{"code":"0","request_id":"r1","data":{"total_products":1,"products":[{"item_id":2001,"skus":[{"SellerSku":"SHOE-RED-42","quantity":7,"price":199000.0}]}]}}"#,
    )
    .await;
    let client = rest_client(&base_url);

    let request = ListProductsRequest {
        filter: Some(ProductFilter::Live),
        limit: Some(20),
        ..Default::default()
    };
    let response = client.list_products(&token(), &request).await.unwrap();
    let raw = server.await.unwrap();

    assert!(response.is_success());
    let list = response.data.unwrap();
    assert_eq!(list.total_products, 1);
    assert_eq!(list.products[0].skus[0].seller_sku, "SHOE-RED-42");

    let (_, query) = request_query(&raw);
    assert_eq!(query["filter"], "live");
    assert_eq!(query["limit"], "20");

    let timestamp: i64 = query["timestamp"].parse().unwrap();
    let mut params = BTreeMap::new();
    params.insert("filter".to_string(), "live".to_string());
    params.insert("limit".to_string(), "20".to_string());
    let creds = credentials();
    let expected = RequestSigner::new(&creds)
        .sign_request(HttpMethod::Get, "/products/get", &params, Some(&token()), timestamp)
        .unwrap();
    assert_eq!(query["sign"], expected.sign());
}

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    let (base_url, server) = serve_once(
        200,
        r#"{"code":"IllegalAccessToken","type":"ISV","message":"The specified access token is invalid or expired","request_id":"0ba2887315178178017221014"}"#,
    )
    .await;
    let client = rest_client(&base_url);

    let err = client.get_seller(&token()).await.unwrap_err();
    server.await.unwrap();

    match err {
        LazadaError::Api {
            code, request_id, ..
        } => {
            assert_eq!(code, "IllegalAccessToken");
            assert_eq!(request_id, "0ba2887315178178017221014");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn call_limit_body_is_rate_limited() {
    let (base_url, server) = serve_once(
        200,
        r#"{"code":"ApiCallLimit","type":"ISP","message":"The request is too frequent","request_id":"r2"}"#,
    )
    .await;
    let client = rest_client(&base_url);

    let err = client
        .get_product(&token(), &GetProductRequest::by_item_id(2001))
        .await
        .unwrap_err();
    server.await.unwrap();

    assert!(err.is_rate_limited());
    assert!(err.is_retryable());
}

#[tokio::test]
async fn update_price_quantity_posts_xml_payload() {
    let (base_url, server) =
        serve_once(200, r#"{"code":"0","request_id":"r3","data":{}}"#).await;
    let client = rest_client(&base_url);

    let request = UpdatePriceQuantityRequest {
        skus: vec![PriceQuantitySku {
            seller_sku: "SHOE-RED-42".into(),
            price: Some(Decimal::new(129900, 2)),
            quantity: Some(12),
            ..Default::default()
        }],
    };
    let status = client
        .update_price_quantity(&token(), &request)
        .await
        .unwrap();
    let raw = server.await.unwrap();

    assert!(status.is_success());
    assert!(raw.starts_with("POST /product/price_quantity/update?"));
    assert!(!raw.to_ascii_lowercase().contains("authorization:"));

    let form: BTreeMap<String, String> = serde_urlencoded::from_str(request_body(&raw)).unwrap();
    let payload = &form["payload"];
    assert!(payload.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    assert!(payload.contains("<SellerSku>SHOE-RED-42</SellerSku>"));
    assert!(payload.contains("<Price>1299.00</Price>"));

    // The payload is signed but travels only in the body.
    let (_, query) = request_query(&raw);
    assert!(!query.contains_key("payload"));
    let timestamp: i64 = query["timestamp"].parse().unwrap();
    let creds = credentials();
    let expected = RequestSigner::new(&creds)
        .sign_request(
            HttpMethod::Post,
            "/product/price_quantity/update",
            &form,
            Some(&token()),
            timestamp,
        )
        .unwrap();
    assert_eq!(query["sign"], expected.sign());
}

#[tokio::test]
async fn create_token_uses_auth_host_without_access_token() {
    let (auth_url, server) = serve_once(
        200,
        r#"{"access_token":"50000600a12IQKbrgwxvbpB6Q0i8nuO1t2Bgy4I","refresh_token":"50001601e12txsBi4hXrfjnpd8n6ZvTT1idVphE","country":"vn","account":"seller@example.com","expires_in":604800,"refresh_expires_in":2592000,"code":"0","request_id":"r4"}"#,
    )
    .await;
    let client = LazadaClient::new(
        credentials(),
        ClientConfig::default()
            .with_rest_base_url("http://127.0.0.1:9")
            .with_auth_base_url(&auth_url),
    )
    .unwrap();

    let token = client.create_token("0_105827_abc").await.unwrap();
    let raw = server.await.unwrap();

    assert_eq!(
        token.access_token().expose_secret(),
        "50000600a12IQKbrgwxvbpB6Q0i8nuO1t2Bgy4I"
    );
    assert_eq!(token.expires_in, Some(604800));
    assert!(raw.starts_with("POST /auth/token/create?"));

    let (_, query) = request_query(&raw);
    assert!(!query.contains_key("access_token"));
    assert!(query.contains_key("sign"));
    assert!(request_body(&raw).contains("code=0_105827_abc"));
}

#[tokio::test]
async fn failed_token_exchange_is_api_error() {
    let (auth_url, server) = serve_once(
        200,
        r#"{"code":"InvalidCode","type":"ISV","message":"Invalid authorization code","request_id":"r5"}"#,
    )
    .await;
    let client = LazadaClient::new(
        credentials(),
        ClientConfig::default().with_auth_base_url(&auth_url),
    )
    .unwrap();

    let err = client.refresh_token("stale").await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, LazadaError::Api { code, .. } if code == "InvalidCode"));
}

#[tokio::test]
async fn oversized_remove_list_is_rejected_before_sending() {
    let client = rest_client("http://127.0.0.1:9");
    let skus: Vec<String> = (0..51).map(|i| format!("SKU-{}", i)).collect();

    let err = client.remove_products(&token(), &skus).await.unwrap_err();
    assert!(matches!(err, LazadaError::InvalidRequest(_)));
}

#[tokio::test]
async fn empty_order_id_list_is_rejected() {
    let client = rest_client("http://127.0.0.1:9");

    let err = client
        .get_multiple_order_items(&token(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, LazadaError::InvalidRequest(_)));
}
