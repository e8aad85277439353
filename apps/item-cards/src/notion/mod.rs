//! Notion Client: the single point of entry for all Notion API calls.
//!
//! Reads the item database used by the card exporter: the filtered query for
//! rows marked for printing, page retrieval and per-property retrieval (which
//! is the only endpoint that returns rich text and relations unabridged).
//!
//! Errors are returned as-is; there is no retry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::NotionConfig;
use crate::export::{ExportError, ItemProperties, ItemSource, PrintRow};

pub mod properties;

use properties::{PropertyItem, PropertyResponse};

pub const NOTION_API_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";
const PAGE_SIZE: u32 = 100;

// Database column names.
pub const PRINT: &str = "Print";
pub const COUNT: &str = "Count";
pub const ITEMS: &str = "Items";
pub const NUMBER: &str = "Number";
pub const NAME: &str = "Name";
pub const ATTUNEMENT: &str = "Attunement";
pub const TYPE: &str = "Type";
pub const RARITY: &str = "Rarity";
pub const DESCRIPTION: &str = "Description";
pub const DESCRIPTION_IDENTIFIED: &str = "Description (Identified)";
pub const DESCRIPTION_EXALTED: &str = "Description (Exalted)";

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Page {page_id} has no property named '{property}'")]
    MissingProperty { page_id: String, property: String },

    #[error("Property '{property}' on page {page_id} is empty")]
    EmptyProperty { page_id: String, property: String },
}

/// A page as returned by the query and retrieve endpoints.
///
/// Only property ids are kept; values are fetched through the property endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    pub properties: HashMap<String, PropertyRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    token: String,
    database_id: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self, NotionError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(60)).build()?,
            token: config.token.clone(),
            database_id: config.database_id.clone(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, NotionError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<NotionErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(NotionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// All database rows whose `Print` checkbox is ticked, across every result page.
    pub async fn query_print_pages(&self) -> Result<Vec<Page>, NotionError> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({
                "filter": { "property": PRINT, "checkbox": { "equals": true } },
                "page_size": PAGE_SIZE,
            });
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let response: QueryResponse = self.send(self.client.post(&url).json(&body)).await?;
            pages.extend(response.results);

            match response.next_cursor {
                Some(next) if response.has_more => cursor = Some(next),
                _ => break,
            }
        }

        debug!("Database query returned {} printable rows", pages.len());
        Ok(pages)
    }

    pub async fn retrieve_page(&self, page_id: &str) -> Result<Page, NotionError> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        self.send(self.client.get(&url)).await
    }

    /// Every item of a page property, following pagination for list properties.
    pub async fn retrieve_property(
        &self,
        page: &Page,
        name: &str,
    ) -> Result<Vec<PropertyItem>, NotionError> {
        let property = page
            .properties
            .get(name)
            .ok_or_else(|| NotionError::MissingProperty {
                page_id: page.id.clone(),
                property: name.to_string(),
            })?;

        let url = format!(
            "{}/pages/{}/properties/{}",
            self.base_url, page.id, property.id
        );
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self.client.get(&url);
            if let Some(cursor) = &cursor {
                request = request.query(&[("start_cursor", cursor.as_str())]);
            }

            match self.send::<PropertyResponse>(request).await? {
                PropertyResponse::PropertyItem(item) => {
                    items.push(item);
                    break;
                }
                PropertyResponse::List(list) => {
                    items.extend(list.results);
                    match list.next_cursor {
                        Some(next) if list.has_more => cursor = Some(next),
                        _ => break,
                    }
                }
            }
        }

        Ok(items)
    }

    /// Like [`retrieve_property`](Self::retrieve_property), but an absent
    /// property yields no items instead of an error.
    async fn retrieve_optional_property(
        &self,
        page: &Page,
        name: &str,
    ) -> Result<Vec<PropertyItem>, NotionError> {
        if page.properties.contains_key(name) {
            self.retrieve_property(page, name).await
        } else {
            Ok(Vec::new())
        }
    }
}

#[async_trait]
impl ItemSource for NotionClient {
    async fn print_rows(&self) -> Result<Vec<PrintRow>, ExportError> {
        let pages = self.query_print_pages().await?;
        let mut rows = Vec::with_capacity(pages.len());

        for page in pages {
            let count = properties::number(&self.retrieve_property(&page, COUNT).await?);
            let item_ids = properties::relation_ids(&self.retrieve_property(&page, ITEMS).await?);
            rows.push(PrintRow {
                page_id: page.id,
                count,
                item_ids,
            });
        }

        Ok(rows)
    }

    async fn item_properties(&self, page_id: &str) -> Result<ItemProperties, ExportError> {
        let page = self.retrieve_page(page_id).await?;

        let number = properties::number(&self.retrieve_property(&page, NUMBER).await?)
            .map(properties::pad_number)
            .ok_or_else(|| NotionError::EmptyProperty {
                page_id: page.id.clone(),
                property: NUMBER.to_string(),
            })?;

        Ok(ItemProperties {
            number,
            name: properties::title(&self.retrieve_property(&page, NAME).await?),
            attunement: properties::rich_text(&self.retrieve_property(&page, ATTUNEMENT).await?),
            item_type: properties::select_name(&self.retrieve_property(&page, TYPE).await?),
            rarity: properties::select_name(&self.retrieve_property(&page, RARITY).await?),
            description: properties::rich_text(
                &self.retrieve_property(&page, DESCRIPTION).await?,
            ),
            description_identified: properties::rich_text(
                &self
                    .retrieve_optional_property(&page, DESCRIPTION_IDENTIFIED)
                    .await?,
            ),
            description_exalted: properties::rich_text(
                &self
                    .retrieve_optional_property(&page, DESCRIPTION_EXALTED)
                    .await?,
            ),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
