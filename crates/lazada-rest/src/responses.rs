//! Lazada API response types.
//!
//! Schemas are vendor-defined and drift between ventures, so fields are
//! optional where the platform is known to omit them and numeric fields the
//! platform sends either as numbers or strings are read leniently.

use crate::error::LazadaError;
use auth::AccessToken;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Success value of the envelope `code`.
pub const SUCCESS_CODE: &str = "0";

/// Common envelope around every REST response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    /// `ISV`, `ISP` or `SYSTEM` on errors.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: String,
    /// Per-field failures reported by product write endpoints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<FieldError>,
    pub data: Option<T>,
}

/// Response without a meaningful `data` body.
pub type ApiStatus = ApiResponse<serde_json::Value>;

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    fn api_error(&self) -> LazadaError {
        LazadaError::Api {
            code: self.code.clone(),
            message: self.message.clone().unwrap_or_default(),
            request_id: self.request_id.clone(),
        }
    }

    /// Turn a non-zero `code` into `LazadaError::Api`.
    pub fn into_result(self) -> Result<Self, LazadaError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.api_error())
        }
    }

    /// Take `data`, failing on an error envelope or a missing body.
    pub fn into_data(self) -> Result<T, LazadaError> {
        if !self.is_success() {
            return Err(self.api_error());
        }
        let request_id = self.request_id;
        self.data
            .ok_or_else(|| LazadaError::Parse(format!("response {} has no data", request_id)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub seller_sku: Option<String>,
}

// ============================================================================
// Auth
// ============================================================================

/// Response from `/auth/token/create` and `/auth/token/refresh`.
///
/// Unlike other endpoints the token fields sit at the top level.
#[derive(Clone, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until `access_token` expires.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Seconds until `refresh_token` expires.
    #[serde(default)]
    pub refresh_expires_in: Option<i64>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub account_platform: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_user_info: Vec<CountryUserInfo>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: String,
}

impl Token {
    /// Bearer credential for subsequent calls.
    pub fn access_token(&self) -> AccessToken {
        AccessToken::new(self.access_token.clone())
    }

    pub(crate) fn into_result(self) -> Result<Self, LazadaError> {
        if self.code == SUCCESS_CODE && !self.access_token.is_empty() {
            Ok(self)
        } else {
            Err(LazadaError::Api {
                code: self.code,
                message: self.message.unwrap_or_default(),
                request_id: self.request_id,
            })
        }
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("refresh_expires_in", &self.refresh_expires_in)
            .field("account", &self.account)
            .field("country", &self.country)
            .field("request_id", &self.request_id)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryUserInfo {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub short_code: Option<String>,
}

// ============================================================================
// Products
// ============================================================================

/// `data` of `/products/get`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub total_products: i64,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub item_id: i64,
    #[serde(default)]
    pub primary_category: Option<i64>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub skus: Vec<ProductSku>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub created_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub updated_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSku {
    #[serde(rename = "SellerSku")]
    pub seller_sku: String,
    #[serde(rename = "ShopSku", default)]
    pub shop_sku: Option<String>,
    #[serde(rename = "SkuId", default)]
    pub sku_id: Option<i64>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Url", default)]
    pub url: Option<String>,
    #[serde(rename = "Images", default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub special_price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub package_height: Option<Decimal>,
    #[serde(default)]
    pub package_length: Option<Decimal>,
    #[serde(default)]
    pub package_width: Option<Decimal>,
    #[serde(default)]
    pub package_weight: Option<Decimal>,
    /// Category-specific SKU attributes (color_family, size, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// `data` of `/product/create` and `/product/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedProduct {
    pub item_id: i64,
    #[serde(default)]
    pub sku_list: Vec<CreatedSku>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedSku {
    pub seller_sku: String,
    #[serde(default)]
    pub shop_sku: Option<String>,
    #[serde(default)]
    pub sku_id: Option<i64>,
}

// ============================================================================
// Orders
// ============================================================================

/// `data` of `/orders/get`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderList {
    #[serde(default)]
    pub count: i64,
    #[serde(rename = "countTotal", default)]
    pub count_total: i64,
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    #[serde(default)]
    pub order_number: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Formatted total, e.g. `"1,250,000.00"`.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub price: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub statuses: Vec<String>,
    #[serde(default)]
    pub items_count: Option<i64>,
    #[serde(default)]
    pub shipping_fee: Option<Decimal>,
    #[serde(default)]
    pub voucher: Option<Decimal>,
    #[serde(default)]
    pub customer_first_name: Option<String>,
    #[serde(default)]
    pub customer_last_name: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub address_billing: Option<Address>,
    #[serde(default)]
    pub address_shipping: Option<Address>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub phone2: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub address3: Option<String>,
    #[serde(default)]
    pub address4: Option<String>,
    #[serde(default)]
    pub address5: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub post_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: i64,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub shop_sku: Option<String>,
    #[serde(default)]
    pub variation: Option<String>,
    #[serde(default)]
    pub item_price: Option<Decimal>,
    #[serde(default)]
    pub paid_price: Option<Decimal>,
    #[serde(default)]
    pub shipping_amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tracking_code: Option<String>,
    #[serde(default)]
    pub shipment_provider: Option<String>,
    #[serde(default)]
    pub product_main_image: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One entry of `/orders/items/get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItems {
    pub order_id: i64,
    #[serde(default)]
    pub order_number: Option<i64>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

// ============================================================================
// Finance
// ============================================================================

/// Statement amounts are preformatted strings in the seller's currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutStatus {
    #[serde(default)]
    pub statement_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// `"1"` once paid out.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub paid: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub opening_balance: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub closing_balance: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub payout: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub item_revenue: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub shipment_fee: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub shipment_fee_credit: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub other_revenue_total: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fees_total: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub refunds: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fees_on_refunds_total: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub guarantee_deposit: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub subtotal1: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub subtotal2: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub transaction_number: Option<String>,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub fee_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub amount: Option<String>,
    #[serde(rename = "VAT_in_amount", default, deserialize_with = "lenient_opt_string")]
    pub vat_in_amount: Option<String>,
    #[serde(rename = "WHT_amount", default, deserialize_with = "lenient_opt_string")]
    pub wht_amount: Option<String>,
    #[serde(rename = "WHT_included_in_amount", default, deserialize_with = "lenient_opt_string")]
    pub wht_included_in_amount: Option<String>,
    #[serde(default)]
    pub paid_status: Option<String>,
    #[serde(default)]
    pub statement: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub order_no: Option<String>,
    #[serde(rename = "orderItem_no", default, deserialize_with = "lenient_opt_string")]
    pub order_item_no: Option<String>,
    #[serde(rename = "orderItem_status", default)]
    pub order_item_status: Option<String>,
    #[serde(default)]
    pub seller_sku: Option<String>,
    #[serde(default)]
    pub lazada_sku: Option<String>,
    #[serde(default)]
    pub shipping_provider: Option<String>,
    #[serde(default)]
    pub shipping_speed: Option<String>,
    #[serde(default)]
    pub shipment_type: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

// ============================================================================
// Seller
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerMetrics {
    #[serde(default)]
    pub main_category_id: Option<i64>,
    #[serde(default)]
    pub main_category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub positive_seller_rating: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub ship_on_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub response_rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub response_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub cancellation_rate: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_company: Option<String>,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    /// Cross-border seller.
    #[serde(default)]
    pub cb: Option<bool>,
}

/// Read a string that the platform sometimes sends as a number.
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_string(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_token() {
        let json = r#"{
            "access_token": "50000601c30atpedfgu3LVvik87Ixlsvle3mSoB7701ceb156fPunYZ43GBg",
            "country": "vn",
            "refresh_token": "500016000300bwa2WteaQyfwBMnPxurcA0mXGhQdTt18356663CfcDTYpWoi",
            "account_platform": "seller_center",
            "refresh_expires_in": 2592000,
            "country_user_info": [
                {"country": "vn", "user_id": 200000001, "seller_id": "1000000001", "short_code": "VN1A2B3C"}
            ],
            "expires_in": 604800,
            "account": "shop@example.com",
            "code": "0",
            "request_id": "0ba2887315178178017221014"
        }"#;

        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.expires_in, Some(604800));
        assert_eq!(token.country_user_info[0].user_id.as_deref(), Some("200000001"));
        assert!(token.access_token().expose_secret().starts_with("50000601"));

        let token = token.into_result().unwrap();
        assert!(!format!("{:?}", token).contains("50000601"));
    }

    #[test]
    fn test_token_error_envelope() {
        let json = r#"{"type":"ISV","code":"InvalidCode","message":"Invalid authorization code","request_id":"0b8b"}"#;
        let token: Token = serde_json::from_str(json).unwrap();

        match token.into_result() {
            Err(LazadaError::Api { code, message, request_id }) => {
                assert_eq!(code, "InvalidCode");
                assert_eq!(message, "Invalid authorization code");
                assert_eq!(request_id, "0b8b");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_product_list() {
        let json = r#"{
            "data": {
                "total_products": 1,
                "products": [{
                    "item_id": 2396918478,
                    "primary_category": 10002019,
                    "attributes": {"name": "Canvas Tote", "brand": "No Brand"},
                    "skus": [{
                        "Status": "active",
                        "quantity": 25,
                        "Images": ["https://img.example.com/a.jpg"],
                        "SellerSku": "TOTE-RED",
                        "ShopSku": "2396918478_VNAMZ-9876543210",
                        "SkuId": 9876543210,
                        "price": 199000.0,
                        "special_price": 0.0,
                        "package_width": "15.00",
                        "package_height": "10.00",
                        "package_length": "20.50",
                        "package_weight": "0.75",
                        "color_family": "Red"
                    }],
                    "status": "Active",
                    "created_time": "1700000000000",
                    "updated_time": 1700000500000
                }]
            },
            "code": "0",
            "request_id": "0ba9d2c5"
        }"#;

        let response: ApiResponse<ProductList> = serde_json::from_str(json).unwrap();
        assert!(response.is_success());

        let list = response.into_data().unwrap();
        assert_eq!(list.total_products, 1);

        let product = &list.products[0];
        assert_eq!(product.item_id, 2396918478);
        assert_eq!(product.updated_time.as_deref(), Some("1700000500000"));

        let sku = &product.skus[0];
        assert_eq!(sku.seller_sku, "TOTE-RED");
        assert_eq!(sku.price, Some(Decimal::new(199000, 0)));
        assert_eq!(sku.package_length, Some(Decimal::new(2050, 2)));
        assert_eq!(sku.extra.get("color_family").unwrap(), "Red");
    }

    #[test]
    fn test_deserialize_orders() {
        let json = r#"{
            "data": {
                "count": 1,
                "countTotal": 57,
                "orders": [{
                    "order_id": 300034470,
                    "order_number": 300034470,
                    "created_at": "2024-03-01 10:20:30 +0700",
                    "price": "1,250,000.00",
                    "payment_method": "COD",
                    "statuses": ["pending"],
                    "items_count": 2,
                    "shipping_fee": 0.00,
                    "address_shipping": {"first_name": "An", "city": "Ha Noi", "post_code": 100000}
                }]
            },
            "code": "0",
            "request_id": "0b1"
        }"#;

        let list = serde_json::from_str::<ApiResponse<OrderList>>(json)
            .unwrap()
            .into_data()
            .unwrap();

        assert_eq!(list.count_total, 57);
        let order = &list.orders[0];
        assert_eq!(order.price.as_deref(), Some("1,250,000.00"));
        assert_eq!(order.statuses, vec!["pending"]);
        assert_eq!(
            order.address_shipping.as_ref().unwrap().post_code.as_deref(),
            Some("100000")
        );
    }

    #[test]
    fn test_deserialize_transactions() {
        let json = r#"{
            "data": [{
                "order_no": "300034470",
                "transaction_date": "01 Mar 2024",
                "amount": "-12,500.00",
                "paid_status": "Not paid",
                "WHT_included_in_amount": "No",
                "orderItem_no": 400012345,
                "transaction_type": "Orders-Lazada Fees",
                "fee_name": "Payment Fee",
                "WHT_amount": "0.00",
                "VAT_in_amount": "1,136.36",
                "transaction_number": 617233
            }],
            "code": "0",
            "request_id": "0b2"
        }"#;

        let transactions = serde_json::from_str::<ApiResponse<Vec<Transaction>>>(json)
            .unwrap()
            .into_data()
            .unwrap();

        let t = &transactions[0];
        assert_eq!(t.order_item_no.as_deref(), Some("400012345"));
        assert_eq!(t.transaction_number.as_deref(), Some("617233"));
        assert_eq!(t.vat_in_amount.as_deref(), Some("1,136.36"));
    }

    #[test]
    fn test_error_envelope_into_data() {
        let json = r#"{"type":"ISV","code":"IllegalAccessToken","message":"The specified access token is invalid or expired","request_id":"0b3"}"#;
        let response: ApiResponse<Seller> = serde_json::from_str(json).unwrap();

        assert!(!response.is_success());
        assert!(response.data.is_none());
        assert!(matches!(
            response.into_data(),
            Err(LazadaError::Api { code, .. }) if code == "IllegalAccessToken"
        ));
    }

    #[test]
    fn test_success_without_data_is_parse_error() {
        let response: ApiResponse<Seller> =
            serde_json::from_str(r#"{"code":"0","request_id":"0b4"}"#).unwrap();
        assert!(matches!(response.into_data(), Err(LazadaError::Parse(_))));
    }

    #[test]
    fn test_numeric_code_and_detail() {
        let json = r#"{
            "code": 500,
            "message": "E0501: Update failed",
            "request_id": "0b5",
            "detail": [{"field": "Quantity", "message": "Negative value", "seller_sku": "TOTE-RED"}]
        }"#;
        let status: ApiStatus = serde_json::from_str(json).unwrap();

        assert_eq!(status.code, "500");
        assert_eq!(status.detail[0].seller_sku.as_deref(), Some("TOTE-RED"));
        assert!(status.into_result().is_err());
    }
}
