//! REST gateway to the bar backend.
//!
//! Resources live under the configured base URL:
//! `pedidos` (orders), `premixes`, `tragos` (drinks) and `productos86`
//! (shortages). Payloads are the JSON records defined in `barra_common`.

use barra_common::drink::{Drink, DrinkId, NewDrink};
use barra_common::gateway::{PersistenceError, PersistenceGateway};
use barra_common::order::{NewOrder, Order, OrderId, StatusChange};
use barra_common::premix::{NewPremix, PendingChange, Premix, PremixId};
use barra_common::shortage::{NewShortage, ShortageEntry, ShortageId};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::GatewayConfig;

const ORDERS: &str = "pedidos";
const PREMIXES: &str = "premixes";
const DRINKS: &str = "tragos";
const SHORTAGES: &str = "productos86";

/// Gateway speaking JSON over HTTP. Timeouts are whatever the client's transport uses.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    /// Send and return the raw body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<String, PersistenceError> {
        let response = request.send().await.map_err(unreachable)?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await.map_err(unreachable)?;
        tracing::debug!(%url, status = status.as_u16(), "backend response");

        if status == StatusCode::NOT_FOUND {
            return Err(PersistenceError::NotFound(url));
        }
        if !status.is_success() {
            return Err(PersistenceError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, PersistenceError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| PersistenceError::Decode(e.to_string()))
    }
}

fn unreachable(err: reqwest::Error) -> PersistenceError {
    PersistenceError::Unreachable(err.to_string())
}

/// Pull `message` or `error` out of a JSON error body, else use the body as is.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        })
        | Ok(ErrorBody {
            message: None,
            error: Some(message),
        }) => message,
        _ => body.trim().to_string(),
    }
}

impl PersistenceGateway for HttpGateway {
    async fn list_orders(&self) -> Result<Vec<Order>, PersistenceError> {
        self.fetch(self.client.get(self.url(ORDERS))).await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order, PersistenceError> {
        self.fetch(self.client.post(self.url(ORDERS)).json(order)).await
    }

    async fn set_order_status(
        &self,
        id: &OrderId,
        change: &StatusChange,
    ) -> Result<Order, PersistenceError> {
        let url = self.url(&format!("{ORDERS}/{id}"));
        self.fetch(self.client.patch(url).json(change)).await
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), PersistenceError> {
        let url = self.url(&format!("{ORDERS}/{id}"));
        self.send(self.client.delete(url)).await.map(drop)
    }

    async fn list_premixes(&self) -> Result<Vec<Premix>, PersistenceError> {
        self.fetch(self.client.get(self.url(PREMIXES))).await
    }

    async fn create_premix(&self, premix: &NewPremix) -> Result<Premix, PersistenceError> {
        self.fetch(self.client.post(self.url(PREMIXES)).json(premix)).await
    }

    async fn set_premix_pending(
        &self,
        id: &PremixId,
        change: PendingChange,
    ) -> Result<Premix, PersistenceError> {
        let url = self.url(&format!("{PREMIXES}/{id}/estado"));
        self.fetch(self.client.patch(url).json(&change)).await
    }

    async fn delete_premix(&self, id: &PremixId) -> Result<(), PersistenceError> {
        let url = self.url(&format!("{PREMIXES}/{id}"));
        self.send(self.client.delete(url)).await.map(drop)
    }

    async fn list_drinks(&self) -> Result<Vec<Drink>, PersistenceError> {
        self.fetch(self.client.get(self.url(DRINKS))).await
    }

    async fn create_drink(&self, drink: &NewDrink) -> Result<Drink, PersistenceError> {
        self.fetch(self.client.post(self.url(DRINKS)).json(drink)).await
    }

    async fn update_drink(&self, id: &DrinkId, drink: &NewDrink) -> Result<Drink, PersistenceError> {
        let url = self.url(&format!("{DRINKS}/{id}"));
        self.fetch(self.client.patch(url).json(drink)).await
    }

    async fn delete_drink(&self, id: &DrinkId) -> Result<(), PersistenceError> {
        let url = self.url(&format!("{DRINKS}/{id}"));
        self.send(self.client.delete(url)).await.map(drop)
    }

    async fn list_shortages(&self) -> Result<Vec<ShortageEntry>, PersistenceError> {
        self.fetch(self.client.get(self.url(SHORTAGES))).await
    }

    async fn add_shortage(&self, entry: &NewShortage) -> Result<ShortageEntry, PersistenceError> {
        self.fetch(self.client.post(self.url(SHORTAGES)).json(entry)).await
    }

    async fn delete_shortage(&self, id: &ShortageId) -> Result<(), PersistenceError> {
        let url = self.url(&format!("{SHORTAGES}/{id}"));
        self.send(self.client.delete(url)).await.map(drop)
    }

    fn gateway_name(&self) -> &str {
        "http"
    }
}
