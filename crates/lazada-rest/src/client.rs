//! Lazada REST API client.

use crate::config::ClientConfig;
use crate::error::LazadaError;
use crate::payload::{check_remove_list, CreateProductRequest, UpdatePriceQuantityRequest};
use crate::requests::{
    json_list, GetPayoutRequest, GetProductRequest, ListOrdersRequest, ListProductsRequest,
    ListTransactionsRequest, Params,
};
use crate::responses::{
    ApiResponse, ApiStatus, CreatedProduct, Order, OrderItem, OrderItems, OrderList, PayoutStatus,
    Product, ProductList, Seller, SellerMetrics, Token, Transaction,
};
use auth::{AccessToken, AppCredentials, HttpMethod, RequestSigner, SignedQuery};
use common::Region;
use rest_client::RestClient;
use serde::de::DeserializeOwned;

/// Lazada Open Platform client.
///
/// Holds no session state: every authenticated call takes the seller's
/// [`AccessToken`], so one client can serve many sellers concurrently.
pub struct LazadaClient {
    rest: RestClient,
    auth: RestClient,
    credentials: AppCredentials,
    config: ClientConfig,
}

impl LazadaClient {
    /// Create a client for the configured region.
    ///
    /// # Errors
    /// Returns an error if the HTTP clients cannot be built.
    pub fn new(credentials: AppCredentials, config: ClientConfig) -> Result<Self, LazadaError> {
        let rest = RestClient::new(&config.rest_base_url, config.timeout)?;
        let auth = RestClient::new(&config.auth_base_url, config.timeout)?;

        Ok(Self {
            rest,
            auth,
            credentials,
            config,
        })
    }

    /// Create a client from `LAZADA_*` environment variables.
    pub fn from_env() -> Result<Self, LazadaError> {
        Self::new(AppCredentials::from_env()?, ClientConfig::from_env())
    }

    pub fn region(&self) -> Region {
        self.config.region
    }

    /// Get the app key (for logging/debugging).
    pub fn app_key(&self) -> &str {
        self.credentials.app_key()
    }

    /// URL of the seller authorization page.
    ///
    /// After consent the seller is redirected to the callback URL with a
    /// `code` to pass to [`Self::create_token`].
    pub fn authorization_url(&self) -> String {
        let params = [
            ("response_type", "code"),
            ("force_auth", "true"),
            ("country", self.config.region.country_code()),
            ("redirect_uri", self.config.callback_url.as_str()),
            ("client_id", self.credentials.app_key()),
        ];

        let query = serde_urlencoded::to_string(params).unwrap_or_default();
        format!("{}?{}", self.config.authorize_url, query)
    }

    // ========================================================================
    // Signing and transport
    // ========================================================================

    fn sign(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
        token: Option<&AccessToken>,
    ) -> Result<SignedQuery, LazadaError> {
        let signer = RequestSigner::new(&self.credentials);
        Ok(signer.sign_request(method, path, params, token, auth::timestamp_ms())?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
        token: &AccessToken,
    ) -> Result<T, LazadaError> {
        let signed = self.sign(HttpMethod::Get, path, params, Some(token))?;
        let body = self
            .rest
            .get(path, Some(&signed.to_query_string()), Some(token.expose_secret()))
            .await?;

        decode(path, &body)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        client: &RestClient,
        path: &str,
        form: &Params,
        token: Option<&AccessToken>,
    ) -> Result<T, LazadaError> {
        let signed = self.sign(HttpMethod::Post, path, form, token)?;
        let body = client
            .post_form(path, Some(&signed.to_query_string()), form)
            .await?;

        decode(path, &body)
    }

    // ========================================================================
    // Authorization
    // ========================================================================

    /// Exchange an authorization code for a token.
    ///
    /// POST /auth/token/create
    pub async fn create_token(&self, code: &str) -> Result<Token, LazadaError> {
        let mut form = Params::new();
        form.insert("code".into(), code.to_string());

        let token: Token = self
            .post(&self.auth, "/auth/token/create", &form, None)
            .await?;
        let token = token.into_result()?;

        tracing::info!(
            account = ?token.account,
            country = ?token.country,
            expires_in = ?token.expires_in,
            "Access token created"
        );

        Ok(token)
    }

    /// Obtain a fresh token from a refresh token.
    ///
    /// POST /auth/token/refresh
    ///
    /// Returns a new [`Token`]; tokens derived from the old one stay valid
    /// until the platform expires them.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Token, LazadaError> {
        let mut form = Params::new();
        form.insert("refresh_token".into(), refresh_token.to_string());

        let token: Token = self
            .post(&self.auth, "/auth/token/refresh", &form, None)
            .await?;
        let token = token.into_result()?;

        tracing::info!(expires_in = ?token.expires_in, "Access token refreshed");

        Ok(token)
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// List the seller's products.
    ///
    /// GET /products/get
    pub async fn list_products(
        &self,
        token: &AccessToken,
        request: &ListProductsRequest,
    ) -> Result<ApiResponse<ProductList>, LazadaError> {
        let response: ApiResponse<ProductList> = self
            .get("/products/get", &request.to_params()?, token)
            .await?;

        tracing::debug!(
            total = response.data.as_ref().map(|d| d.total_products),
            request_id = %response.request_id,
            "Products listed"
        );

        Ok(response)
    }

    /// Get one product by item ID or seller SKU.
    ///
    /// GET /product/item/get
    pub async fn get_product(
        &self,
        token: &AccessToken,
        request: &GetProductRequest,
    ) -> Result<Product, LazadaError> {
        let response: ApiResponse<Product> = self
            .get("/product/item/get", &request.to_params()?, token)
            .await?;

        response.into_data()
    }

    /// Update price, sale price and stock of up to 50 SKUs.
    ///
    /// POST /product/price_quantity/update
    pub async fn update_price_quantity(
        &self,
        token: &AccessToken,
        request: &UpdatePriceQuantityRequest,
    ) -> Result<ApiStatus, LazadaError> {
        let form = payload_form(request.to_payload()?);

        tracing::info!(skus = request.skus.len(), "Updating price and quantity");

        self.post(&self.rest, "/product/price_quantity/update", &form, Some(token))
            .await
    }

    /// Create a product.
    ///
    /// POST /product/create
    pub async fn create_product(
        &self,
        token: &AccessToken,
        request: &CreateProductRequest,
    ) -> Result<ApiResponse<CreatedProduct>, LazadaError> {
        let form = payload_form(request.to_payload()?);

        tracing::info!(
            primary_category = ?request.primary_category,
            skus = request.skus.len(),
            "Creating product"
        );

        let response: ApiResponse<CreatedProduct> = self
            .post(&self.rest, "/product/create", &form, Some(token))
            .await?;

        if let Some(created) = &response.data {
            tracing::info!(item_id = created.item_id, "Product created");
        }

        Ok(response)
    }

    /// Update an existing product.
    ///
    /// POST /product/update
    pub async fn update_product(
        &self,
        token: &AccessToken,
        request: &CreateProductRequest,
    ) -> Result<ApiResponse<CreatedProduct>, LazadaError> {
        let form = payload_form(request.to_payload()?);

        tracing::info!(skus = request.skus.len(), "Updating product");

        self.post(&self.rest, "/product/update", &form, Some(token))
            .await
    }

    /// Remove up to 50 SKUs.
    ///
    /// POST /product/remove
    pub async fn remove_products(
        &self,
        token: &AccessToken,
        seller_skus: &[String],
    ) -> Result<ApiStatus, LazadaError> {
        check_remove_list(seller_skus)?;

        let mut form = Params::new();
        form.insert("seller_sku_list".into(), json_list(seller_skus)?);

        tracing::info!(skus = seller_skus.len(), "Removing products");

        self.post(&self.rest, "/product/remove", &form, Some(token))
            .await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// List orders.
    ///
    /// GET /orders/get
    pub async fn list_orders(
        &self,
        token: &AccessToken,
        request: &ListOrdersRequest,
    ) -> Result<ApiResponse<OrderList>, LazadaError> {
        let response: ApiResponse<OrderList> = self
            .get("/orders/get", &request.to_params()?, token)
            .await?;

        tracing::debug!(
            count = response.data.as_ref().map(|d| d.count),
            request_id = %response.request_id,
            "Orders listed"
        );

        Ok(response)
    }

    /// Get one order.
    ///
    /// GET /order/get
    pub async fn get_order(
        &self,
        token: &AccessToken,
        order_id: i64,
    ) -> Result<ApiResponse<Order>, LazadaError> {
        self.get("/order/get", &order_id_params(order_id), token)
            .await
    }

    /// Get the items of one order.
    ///
    /// GET /order/items/get
    pub async fn get_order_items(
        &self,
        token: &AccessToken,
        order_id: i64,
    ) -> Result<ApiResponse<Vec<OrderItem>>, LazadaError> {
        self.get("/order/items/get", &order_id_params(order_id), token)
            .await
    }

    /// Get the items of several orders at once.
    ///
    /// GET /orders/items/get
    pub async fn get_multiple_order_items(
        &self,
        token: &AccessToken,
        order_ids: &[i64],
    ) -> Result<ApiResponse<Vec<OrderItems>>, LazadaError> {
        if order_ids.is_empty() {
            return Err(LazadaError::InvalidRequest("no order IDs given".into()));
        }

        let mut params = Params::new();
        params.insert("order_ids".into(), json_list(order_ids)?);

        self.get("/orders/items/get", &params, token).await
    }

    // ========================================================================
    // Finance
    // ========================================================================

    /// Payout statements created after a date.
    ///
    /// GET /finance/payout/status/get
    pub async fn get_payout_status(
        &self,
        token: &AccessToken,
        request: &GetPayoutRequest,
    ) -> Result<Vec<PayoutStatus>, LazadaError> {
        let response: ApiResponse<Vec<PayoutStatus>> = self
            .get("/finance/payout/status/get", &request.to_params(), token)
            .await?;

        response.into_data()
    }

    /// Transaction details in a date range.
    ///
    /// GET /finance/transaction/detail/get
    pub async fn list_transactions(
        &self,
        token: &AccessToken,
        request: &ListTransactionsRequest,
    ) -> Result<Vec<Transaction>, LazadaError> {
        let response: ApiResponse<Vec<Transaction>> = self
            .get("/finance/transaction/detail/get", &request.to_params(), token)
            .await?;

        response.into_data()
    }

    // ========================================================================
    // Seller
    // ========================================================================

    /// GET /seller/metrics/get
    pub async fn get_seller_metrics(
        &self,
        token: &AccessToken,
    ) -> Result<SellerMetrics, LazadaError> {
        let response: ApiResponse<SellerMetrics> = self
            .get("/seller/metrics/get", &Params::new(), token)
            .await?;

        response.into_data()
    }

    /// GET /seller/get
    pub async fn get_seller(&self, token: &AccessToken) -> Result<Seller, LazadaError> {
        let response: ApiResponse<Seller> =
            self.get("/seller/get", &Params::new(), token).await?;

        response.into_data()
    }
}

impl std::fmt::Debug for LazadaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazadaClient")
            .field("region", &self.config.region)
            .field("base_url", &self.rest.base_url())
            .field("auth_url", &self.auth.base_url())
            .field("app_key", &self.credentials.app_key())
            .finish()
    }
}

fn payload_form(payload: String) -> Params {
    let mut form = Params::new();
    form.insert("payload".into(), payload);
    form
}

fn order_id_params(order_id: i64) -> Params {
    let mut params = Params::new();
    params.insert("order_id".into(), order_id.to_string());
    params
}

/// Decode a JSON body, naming the endpoint on failure.
fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, LazadaError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(path = %path, error = %e, "Failed to parse response");
        LazadaError::Parse(format!("{}: {}", path, e))
    })
}
