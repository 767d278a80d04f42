use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use super::query::ItemQuery;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentStoreError {
    #[error("content store unreachable: {0}")]
    Transport(String),
    #[error("content store returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("content store response could not be decoded: {0}")]
    Decode(String),
}

/// Query interface to the headless content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn query_items(
        &self,
        collection: &str,
        query: &ItemQuery,
    ) -> Result<Vec<Value>, ContentStoreError>;

    async fn create_item(&self, collection: &str, item: &Value)
        -> Result<Value, ContentStoreError>;
}

#[derive(Debug, Deserialize)]
struct ItemsEnvelope<T> {
    data: T,
}

/// REST adapter speaking the store's `/items/<collection>` API.
#[derive(Debug, Clone)]
pub struct HttpContentStore {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
}

impl HttpContentStore {
    pub fn new(client: reqwest::Client, base_url: Url, access_token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            access_token,
        }
    }

    fn items_url(&self, collection: &str) -> Result<Url, ContentStoreError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/items/{collection}"))
            .map_err(|err| ContentStoreError::Transport(err.to_string()))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_body(response: reqwest::Response) -> Result<String, ContentStoreError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ContentStoreError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(ContentStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

fn decode_envelope<T>(body: &str) -> Result<T, ContentStoreError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str::<ItemsEnvelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|err| ContentStoreError::Decode(err.to_string()))
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn query_items(
        &self,
        collection: &str,
        query: &ItemQuery,
    ) -> Result<Vec<Value>, ContentStoreError> {
        let url = self.items_url(collection)?;
        let request = self.client.get(url).query(&query.query_pairs());
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| ContentStoreError::Transport(err.to_string()))?;

        let body = Self::read_body(response).await?;
        decode_envelope(&body)
    }

    async fn create_item(
        &self,
        collection: &str,
        item: &Value,
    ) -> Result<Value, ContentStoreError> {
        let url = self.items_url(collection)?;
        let request = self.client.post(url).json(item);
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| ContentStoreError::Transport(err.to_string()))?;

        // The store answers 204 with no body when it is not asked to echo the item.
        let body = Self::read_body(response).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        decode_envelope(&body)
    }
}
