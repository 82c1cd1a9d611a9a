// stitch-client/src/client/rest.rs
// REST store - PostgREST-style HTTP API of the hosted store

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{Order, OrderActivity, OrderItem, Receipt, SizeTypeDefinition};
use std::time::Duration;

use crate::config::StoreConfig;
use crate::error::{ClientError, ClientResult};
use crate::store::{OrderStore, normalize_items};

const ORDERS: &str = "orders";
const ORDER_ITEMS: &str = "order_items";
const RECEIPTS: &str = "receipts";
const SIZE_TYPES: &str = "size_types";

/// Error body returned by the REST layer
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    message: String,
    #[serde(default)]
    hint: Option<String>,
}

/// Quote a filter value so commas and parentheses survive inside `or=(...)`
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn eq(column: &str, value: &str) -> (String, String) {
    (column.to_string(), format!("eq.{}", quoted(value)))
}

/// Store backed by the hosted REST API
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    rest_url: String,
    api_key: String,
    activity_view: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> ClientResult<Self> {
        let base = config.base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "store url must start with http:// or https://, got '{}'",
                config.base_url
            )));
        }
        if config.activity_view.trim().is_empty() {
            return Err(ClientError::Config("activity view name is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", base),
            api_key: config.api_key.clone(),
            activity_view: config.activity_view.clone(),
        })
    }

    /// REST root (`<base>/rest/v1`)
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.rest_url, table);
        let mut req = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if !self.api_key.is_empty() {
            req = req
                .header("apikey", &self.api_key)
                .bearer_auth(&self.api_key);
        }
        req
    }

    fn select(&self, table: &str, filters: &[(String, String)]) -> RequestBuilder {
        self.request(Method::GET, table)
            .query(&[("select", "*")])
            .query(filters)
    }

    fn receipts_query(&self, order: &Order) -> RequestBuilder {
        let filter = format!(
            "(reference_id.eq.{},reference_number.eq.{})",
            quoted(&order.id),
            quoted(&order.order_number)
        );
        self.select(RECEIPTS, &[("or".to_string(), filter)])
            .query(&[("order", "created_at.desc")])
    }

    fn activities_query(&self, order_id: &str) -> RequestBuilder {
        self.select(&self.activity_view, &[eq("order_id", order_id)])
            .query(&[("order", "performed_at.desc")])
    }

    fn link_request(&self, receipt_id: &str, order_id: &str) -> RequestBuilder {
        let (column, filter) = eq("id", receipt_id);
        self.request(Method::PATCH, RECEIPTS)
            .query(&[(column, filter)])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "reference_id": order_id }))
    }

    async fn handle_response(&self, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await?;
        let message = match serde_json::from_str::<ApiErrorResponse>(&text) {
            Ok(api_err) => match api_err.hint {
                Some(hint) => format!("{} ({})", api_err.message, hint),
                None => api_err.message,
            },
            Err(_) if text.is_empty() => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            Err(_) => text,
        };
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(message));
        }
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Send a select and decode rows one by one, so a bad row names itself
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        req: RequestBuilder,
    ) -> ClientResult<Vec<T>> {
        let response = self.handle_response(req.send().await?).await?;
        let rows: Vec<Value> = response.json().await?;
        tracing::debug!(table, rows = rows.len(), "Fetched rows");
        decode_rows(table, rows)
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: (String, String),
        what: String,
    ) -> ClientResult<T> {
        let req = self.select(table, &[filter]).query(&[("limit", "1")]);
        self.fetch_rows(table, req)
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::NotFound(what))
    }
}

fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> ClientResult<Vec<T>> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            serde_json::from_value(row)
                .map_err(|e| ClientError::InvalidRow(format!("{} row {}: {}", table, idx, e)))
        })
        .collect()
}

/// A PATCH that matched no row still answers 200 with an empty body
fn ensure_linked(receipt_id: &str, updated: &[Value]) -> ClientResult<()> {
    if updated.is_empty() {
        return Err(ClientError::NotFound(format!("receipt {}", receipt_id)));
    }
    Ok(())
}

#[async_trait]
impl OrderStore for RestStore {
    async fn order_by_number(&self, order_number: &str) -> ClientResult<Order> {
        self.fetch_one(
            ORDERS,
            eq("order_number", order_number),
            format!("order {}", order_number),
        )
        .await
    }

    async fn order_by_id(&self, order_id: &str) -> ClientResult<Order> {
        self.fetch_one(ORDERS, eq("id", order_id), format!("order id {}", order_id))
            .await
    }

    async fn order_items(&self, order_id: &str) -> ClientResult<Vec<OrderItem>> {
        let req = self.select(ORDER_ITEMS, &[eq("order_id", order_id)]);
        let items = self.fetch_rows(ORDER_ITEMS, req).await?;
        Ok(normalize_items(items))
    }

    async fn receipts_for(&self, order: &Order) -> ClientResult<Vec<Receipt>> {
        self.fetch_rows(RECEIPTS, self.receipts_query(order)).await
    }

    async fn activities(&self, order_id: &str) -> ClientResult<Vec<OrderActivity>> {
        self.fetch_rows(&self.activity_view, self.activities_query(order_id))
            .await
    }

    async fn size_types(&self) -> ClientResult<Vec<SizeTypeDefinition>> {
        let req = self.select(SIZE_TYPES, &[]);
        self.fetch_rows(SIZE_TYPES, req).await
    }

    async fn link_receipt(&self, receipt_id: &str, order_id: &str) -> ClientResult<()> {
        let response = self.link_request(receipt_id, order_id).send().await?;
        let updated: Vec<Value> = self.handle_response(response).await?.json().await?;
        ensure_linked(receipt_id, &updated)?;
        tracing::info!(receipt_id, order_id, "Linked receipt to order");
        Ok(())
    }
}
