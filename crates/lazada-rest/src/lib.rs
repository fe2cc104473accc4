//! Lazada Open Platform REST client.
//!
//! Provides:
//! - Seller authorization and token exchange
//! - Product listing, creation and price/stock updates
//! - Order and order item queries
//! - Payout and transaction reports
//! - Seller profile and metrics
//!
//! Every call is signed with the app secret; authenticated calls take the
//! seller's [`auth::AccessToken`] explicitly.

mod client;
mod config;
mod error;
pub mod payload;
pub mod requests;
pub mod responses;

pub use client::LazadaClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::LazadaError;
pub use payload::{
    CreateProductRequest, CreateProductSku, PriceQuantitySku, UpdatePriceQuantityRequest,
    MAX_IMAGES_PER_SKU, MAX_SKUS_PER_CALL, XML_DECLARATION,
};
pub use requests::{
    GetPayoutRequest, GetProductRequest, ListOrdersRequest, ListProductsRequest,
    ListTransactionsRequest, OrderSortBy, OrderStatus, Params, ProductFilter, SortDirection,
    ALL_TRANSACTION_TYPES,
};
pub use responses::{
    ApiResponse, ApiStatus, CreatedProduct, Order, OrderItem, OrderItems, OrderList,
    PayoutStatus, Product, ProductList, ProductSku, Seller, SellerMetrics, Token, Transaction,
    SUCCESS_CODE,
};
