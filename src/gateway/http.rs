//! HTTP/JSON gateway over reqwest
//!
//! Session auth is cookie-based: the builder enables reqwest's cookie store
//! so the credential set by `/auth/login` rides along on every later call.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::query::ProductQueryParams;
use crate::types::{
    AddToCartRequest, Cart, CreateOrderRequest, LoginRequest, Order, OrderFilter, OrderStats,
    OrderStatus, Product, ProductPage, RegisterRequest, UpdateCartItemRequest, UpdateStatusRequest,
    User,
};

use super::{ErrorBody, Gateway, CODE_OUT_OF_STOCK};

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Remote(e.to_string()))?;
        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder, path: &str) -> Result<T> {
        tracing::debug!(path, "gateway request");
        let resp = req.send().await.map_err(|e| ClientError::Remote(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            resp.json().await.map_err(|e| ClientError::Remote(e.to_string()))
        } else {
            let body: ErrorBody = resp.json().await.unwrap_or_default();
            let err = map_error(status, body);
            tracing::warn!(path, %status, %err, "gateway request failed");
            Err(err)
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.client.get(self.url(path)), path).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize>(&self, path: &str, query: &Q) -> Result<T> {
        self.send(self.client.get(self.url(path)).query(query), path).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.send(self.client.post(self.url(path)).json(body), path).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.send(self.client.put(self.url(path)).json(body), path).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.client.delete(self.url(path)), path).await
    }
}

fn map_error(status: StatusCode, body: ErrorBody) -> ClientError {
    let message = body
        .message
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Permission(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST if body.code.as_deref() == Some(CODE_OUT_OF_STOCK) => {
            ClientError::Stock(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(message),
        _ => ClientError::Remote(message),
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn fetch_products(&self, params: &ProductQueryParams) -> Result<ProductPage> {
        self.get_query("/products", params).await
    }

    async fn fetch_product(&self, id: &str) -> Result<Product> {
        self.get(&format!("/products/{id}")).await
    }

    async fn fetch_sizes(&self) -> Result<Vec<String>> {
        self.get("/products/sizes").await
    }

    async fn fetch_colors(&self) -> Result<Vec<String>> {
        self.get("/products/colors").await
    }

    async fn fetch_cart(&self) -> Result<Cart> {
        self.get("/cart").await
    }

    async fn add_to_cart(&self, req: &AddToCartRequest) -> Result<Cart> {
        self.post("/cart/add", req).await
    }

    async fn update_cart_item(&self, req: &UpdateCartItemRequest) -> Result<Cart> {
        self.put("/cart/update", req).await
    }

    async fn remove_cart_item(&self, item_id: &str) -> Result<Cart> {
        self.delete(&format!("/cart/item/{item_id}")).await
    }

    async fn clear_cart(&self) -> Result<Cart> {
        self.delete("/cart/clear").await
    }

    async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order> {
        self.post("/orders", req).await
    }

    async fn fetch_user_orders(&self) -> Result<Vec<Order>> {
        self.get("/orders/my-orders").await
    }

    async fn fetch_order(&self, id: &str) -> Result<Order> {
        self.get(&format!("/orders/{id}")).await
    }

    async fn list_all_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        self.get_query("/orders/admin/all", filter).await
    }

    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> Result<Order> {
        self.put(&format!("/orders/{order_id}/status"), &UpdateStatusRequest { status }).await
    }

    async fn fetch_order_stats(&self) -> Result<OrderStats> {
        self.get("/orders/admin/stats").await
    }

    async fn login(&self, req: &LoginRequest) -> Result<User> {
        self.post("/auth/login", req).await
    }

    async fn register(&self, req: &RegisterRequest) -> Result<User> {
        self.post("/auth/register", req).await
    }

    async fn logout(&self) -> Result<()> {
        let path = "/auth/logout";
        let resp = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| ClientError::Remote(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let body: ErrorBody = resp.json().await.unwrap_or_default();
            Err(map_error(status, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = map_error(StatusCode::UNAUTHORIZED, ErrorBody::default());
        assert!(matches!(err, ClientError::Permission(_)));

        let err = map_error(StatusCode::NOT_FOUND, ErrorBody { message: Some("Cart not found".into()), code: None });
        assert!(matches!(err, ClientError::NotFound(m) if m == "Cart not found"));

        let err = map_error(
            StatusCode::BAD_REQUEST,
            ErrorBody { message: Some("only 2 left".into()), code: Some(CODE_OUT_OF_STOCK.into()) },
        );
        assert!(matches!(err, ClientError::Stock(_)));

        let err = map_error(StatusCode::BAD_REQUEST, ErrorBody { message: Some("size required".into()), code: None });
        assert!(matches!(err, ClientError::Validation(_)));

        let err = map_error(StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::default());
        assert!(matches!(err, ClientError::Remote(_)));
    }

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        let gw = HttpGateway::new(&ClientConfig::new("http://localhost:4000/api/")).unwrap();
        assert_eq!(gw.url("/cart"), "http://localhost:4000/api/cart");
    }
}
