use crate::core::{ConfigProvider, Country, EntityId, Item, Port, ReferenceDataProvider, Result};
use crate::utils::error::PickerError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// 透過 REST API 取得參考資料
#[derive(Debug, Clone)]
pub struct HttpReferenceProvider {
    client: Client,
    base_url: String,
    countries_resource: String,
    ports_resource: String,
    items_resource: String,
}

impl HttpReferenceProvider {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client<C: ConfigProvider + ?Sized>(client: Client, config: &C) -> Self {
        Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            countries_resource: config.countries_resource().trim_matches('/').to_string(),
            ports_resource: config.ports_resource().trim_matches('/').to_string(),
            items_resource: config.items_resource().trim_matches('/').to_string(),
        }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    /// `{"where":{"<key>":<id>}}`
    pub fn where_filter(key: &str, id: &EntityId) -> String {
        let mut predicate = serde_json::Map::new();
        predicate.insert(key.to_string(), id.filter_value());
        serde_json::json!({ "where": predicate }).to_string()
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str, filter: Option<String>) -> Result<Vec<T>> {
        let mut request = self.client.get(self.url(resource));
        if let Some(filter) = &filter {
            request = request.query(&[("filter", filter.as_str())]);
        }

        tracing::debug!(
            "Making API request to: {} (filter: {})",
            self.url(resource),
            filter.as_deref().unwrap_or("-")
        );
        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        // 只有 200 算成功
        if response.status() != StatusCode::OK {
            return Err(PickerError::HttpStatus {
                resource: resource.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let records: Vec<T> = serde_json::from_slice(&bytes)?;
        Ok(records)
    }
}

#[async_trait]
impl ReferenceDataProvider for HttpReferenceProvider {
    async fn countries(&self) -> Result<Vec<Country>> {
        self.fetch(&self.countries_resource, None).await
    }

    async fn ports(&self, country_id: &EntityId) -> Result<Vec<Port>> {
        let filter = Self::where_filter(Port::PARENT_KEY, country_id);
        self.fetch(&self.ports_resource, Some(filter)).await
    }

    async fn items(&self, port_id: &EntityId) -> Result<Vec<Item>> {
        let filter = Self::where_filter(Item::PARENT_KEY, port_id);
        self.fetch(&self.items_resource, Some(filter)).await
    }
}
