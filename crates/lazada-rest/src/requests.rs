//! Typed query parameters for read endpoints.
//!
//! Every request converts into the flat string map the signer consumes:
//! numbers as decimal strings, timestamps as ISO-8601, lists as JSON arrays.
//! Unset fields are left out.

use crate::error::LazadaError;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Flat parameter map handed to the signer.
pub type Params = BTreeMap<String, String>;

/// `trans_type` value selecting every transaction type.
pub const ALL_TRANSACTION_TYPES: i32 = -1;

fn put<T: ToString>(params: &mut Params, key: &str, value: Option<T>) {
    if let Some(v) = value {
        params.insert(key.to_string(), v.to_string());
    }
}

fn put_time(params: &mut Params, key: &str, value: Option<&DateTime<Utc>>) {
    put(
        params,
        key,
        value.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, false)),
    );
}

fn put_date(params: &mut Params, key: &str, value: &NaiveDate) {
    params.insert(key.to_string(), value.format("%Y-%m-%d").to_string());
}

/// Encode a list as a JSON array string.
pub(crate) fn json_list<T: Serialize>(items: &[T]) -> Result<String, LazadaError> {
    serde_json::to_string(items).map_err(|e| LazadaError::InvalidRequest(e.to_string()))
}

/// Product status filter for `/products/get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    Live,
    Inactive,
    Deleted,
    ImageMissing,
    Pending,
    Rejected,
    SoldOut,
}

impl ProductFilter {
    pub fn as_lazada_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Live => "live",
            Self::Inactive => "inactive",
            Self::Deleted => "deleted",
            Self::ImageMissing => "image-missing",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::SoldOut => "sold-out",
        }
    }
}

impl std::str::FromStr for ProductFilter {
    type Err = LazadaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "live" => Ok(Self::Live),
            "inactive" => Ok(Self::Inactive),
            "deleted" => Ok(Self::Deleted),
            "image-missing" => Ok(Self::ImageMissing),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            "sold-out" => Ok(Self::SoldOut),
            other => Err(LazadaError::InvalidRequest(format!(
                "unknown product filter '{}'",
                other
            ))),
        }
    }
}

/// Parameters for `/products/get`.
#[derive(Debug, Clone, Default)]
pub struct ListProductsRequest {
    pub filter: Option<ProductFilter>,
    pub search: Option<String>,
    pub create_after: Option<DateTime<Utc>>,
    pub create_before: Option<DateTime<Utc>>,
    pub update_after: Option<DateTime<Utc>>,
    pub update_before: Option<DateTime<Utc>>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// `1` adds reserved, RTS and pending stock to each SKU.
    pub options: Option<u32>,
    pub sku_seller_list: Vec<String>,
}

impl ListProductsRequest {
    pub fn to_params(&self) -> Result<Params, LazadaError> {
        let mut params = Params::new();
        put(&mut params, "filter", self.filter.map(|f| f.as_lazada_str()));
        put(&mut params, "search", self.search.as_deref());
        put_time(&mut params, "create_after", self.create_after.as_ref());
        put_time(&mut params, "create_before", self.create_before.as_ref());
        put_time(&mut params, "update_after", self.update_after.as_ref());
        put_time(&mut params, "update_before", self.update_before.as_ref());
        put(&mut params, "offset", self.offset);
        put(&mut params, "limit", self.limit);
        put(&mut params, "options", self.options);

        if !self.sku_seller_list.is_empty() {
            params.insert("sku_seller_list".into(), json_list(&self.sku_seller_list)?);
        }

        Ok(params)
    }
}

/// Parameters for `/product/item/get`. At least one key must be set.
#[derive(Debug, Clone, Default)]
pub struct GetProductRequest {
    pub item_id: Option<i64>,
    pub seller_sku: Option<String>,
}

impl GetProductRequest {
    pub fn by_item_id(item_id: i64) -> Self {
        Self {
            item_id: Some(item_id),
            seller_sku: None,
        }
    }

    pub fn by_seller_sku(seller_sku: impl Into<String>) -> Self {
        Self {
            item_id: None,
            seller_sku: Some(seller_sku.into()),
        }
    }

    pub fn to_params(&self) -> Result<Params, LazadaError> {
        let mut params = Params::new();
        put(&mut params, "item_id", self.item_id.filter(|id| *id > 0));
        put(
            &mut params,
            "seller_sku",
            self.seller_sku.as_deref().filter(|s| !s.is_empty()),
        );

        if params.is_empty() {
            return Err(LazadaError::InvalidRequest(
                "product lookup needs item_id or seller_sku".into(),
            ));
        }

        Ok(params)
    }
}

/// Order status filter for `/orders/get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Unpaid,
    Pending,
    Packed,
    ReadyToShip,
    Shipped,
    Delivered,
    Returned,
    Failed,
    Canceled,
    Lost,
}

impl OrderStatus {
    pub fn as_lazada_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Pending => "pending",
            Self::Packed => "packed",
            Self::ReadyToShip => "ready_to_ship",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Returned => "returned",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortBy {
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Parameters for `/orders/get`.
///
/// The platform requires `created_after` or `update_after`.
#[derive(Debug, Clone, Default)]
pub struct ListOrdersRequest {
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub update_after: Option<DateTime<Utc>>,
    pub update_before: Option<DateTime<Utc>>,
    pub status: Option<OrderStatus>,
    pub sort_by: Option<OrderSortBy>,
    pub sort_direction: Option<SortDirection>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl ListOrdersRequest {
    pub fn created_after(after: DateTime<Utc>) -> Self {
        Self {
            created_after: Some(after),
            ..Self::default()
        }
    }

    pub fn to_params(&self) -> Result<Params, LazadaError> {
        if self.created_after.is_none() && self.update_after.is_none() {
            return Err(LazadaError::InvalidRequest(
                "order listing needs created_after or update_after".into(),
            ));
        }

        let mut params = Params::new();
        put_time(&mut params, "created_after", self.created_after.as_ref());
        put_time(&mut params, "created_before", self.created_before.as_ref());
        put_time(&mut params, "update_after", self.update_after.as_ref());
        put_time(&mut params, "update_before", self.update_before.as_ref());
        put(&mut params, "status", self.status.map(|s| s.as_lazada_str()));
        put(
            &mut params,
            "sort_by",
            self.sort_by.map(|s| match s {
                OrderSortBy::CreatedAt => "created_at",
                OrderSortBy::UpdatedAt => "updated_at",
            }),
        );
        put(
            &mut params,
            "sort_direction",
            self.sort_direction.map(|d| match d {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            }),
        );
        put(&mut params, "offset", self.offset);
        put(&mut params, "limit", self.limit);

        Ok(params)
    }
}

/// Parameters for `/finance/payout/status/get`.
#[derive(Debug, Clone)]
pub struct GetPayoutRequest {
    pub created_after: NaiveDate,
}

impl GetPayoutRequest {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        put_date(&mut params, "created_after", &self.created_after);
        params
    }
}

/// Parameters for `/finance/transaction/detail/get`.
#[derive(Debug, Clone)]
pub struct ListTransactionsRequest {
    pub start_time: NaiveDate,
    pub end_time: NaiveDate,
    /// Defaults to [`ALL_TRANSACTION_TYPES`].
    pub trans_type: Option<i32>,
    pub trade_order_id: Option<i64>,
    pub trade_order_line_id: Option<i64>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl ListTransactionsRequest {
    pub fn new(start_time: NaiveDate, end_time: NaiveDate) -> Self {
        Self {
            start_time,
            end_time,
            trans_type: None,
            trade_order_id: None,
            trade_order_line_id: None,
            offset: None,
            limit: None,
        }
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        put_date(&mut params, "start_time", &self.start_time);
        put_date(&mut params, "end_time", &self.end_time);
        put(
            &mut params,
            "trans_type",
            Some(self.trans_type.unwrap_or(ALL_TRANSACTION_TYPES)),
        );
        put(&mut params, "trade_order_id", self.trade_order_id);
        put(&mut params, "trade_order_line_id", self.trade_order_line_id);
        put(&mut params, "offset", self.offset);
        put(&mut params, "limit", self.limit);
        params
    }
}
