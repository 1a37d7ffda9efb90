use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;
use std::time::Duration;

use crate::logic::errors::HttpStatusError;
use crate::viewer::fetcher::{ListFuture, ListOperation};
use crate::viewer::query::QueryDescriptor;
use crate::viewer::CollectionPage;

/// Paged list body: `{"data": [...], "total": n}`
///
/// Older endpoints say `rows`/`items` and `count`, paginator endpoints put the
/// total under `meta`.
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(alias = "rows", alias = "items")]
    data: Vec<T>,
    #[serde(default, alias = "count")]
    total: Option<u64>,
    #[serde(default)]
    meta: Option<ListMeta>,
}

#[derive(Debug, Deserialize)]
struct ListMeta {
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse a list response body into a page
///
/// A body without any total counts only its own rows.
pub fn parse_list<T: DeserializeOwned>(body: &str) -> Result<CollectionPage<T>> {
    let response: ListResponse<T> = serde_json::from_str(body)?;
    let total = response
        .total
        .or_else(|| response.meta.and_then(|m| m.total))
        .unwrap_or(response.data.len() as u64);

    Ok(CollectionPage {
        rows: response.data,
        total,
    })
}

/// User-facing message for a non-success response
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Error")
            )
        })
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(HttpStatusError {
        status: status.as_u16(),
        message: error_message(status, &body),
    }
    .into())
}

/// Authenticated client for the PTW backend
///
/// Built once from configuration and handed to every screen; nothing else in
/// the crate sees the token.
#[derive(Clone)]
pub struct PtwClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl PtwClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            base_url,
            token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_url(&self, resource: &str, descriptor: &QueryDescriptor) -> String {
        let mut url = format!(
            "{}/api/{}?page={}&per_page={}",
            self.base_url, resource, descriptor.page, descriptor.per_page
        );
        if !descriptor.search_term.is_empty() {
            url.push_str(&format!("&search={}", urlencoding::encode(&descriptor.search_term)));
        }
        url
    }

    pub fn record_url(&self, resource: &str, id: u64) -> String {
        format!("{}/api/{}/{}", self.base_url, resource, id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        descriptor: &QueryDescriptor,
    ) -> Result<CollectionPage<T>> {
        let url = self.list_url(resource, descriptor);
        let response = self
            .authorize(self.client.get(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", resource))?;

        let body = check_status(response)
            .await?
            .text()
            .await
            .context("Failed to read response")?;

        parse_list(&body).with_context(|| format!("Failed to parse {} list", resource))
    }

    pub async fn delete(&self, resource: &str, id: u64) -> Result<()> {
        let url = self.record_url(resource, id);
        let response = self
            .authorize(self.client.delete(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to delete {} {}", resource, id))?;

        check_status(response).await?;
        Ok(())
    }
}

/// List operation bound to one backend collection
pub struct ResourceLister<T> {
    client: PtwClient,
    resource: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> ResourceLister<T> {
    pub fn new(client: PtwClient, resource: &'static str) -> Self {
        Self {
            client,
            resource,
            _record: PhantomData,
        }
    }
}

impl<T> ListOperation<T> for ResourceLister<T>
where
    T: DeserializeOwned + Send + 'static,
{
    fn list(&self, descriptor: QueryDescriptor) -> ListFuture<T> {
        let client = self.client.clone();
        let resource = self.resource;
        Box::pin(async move { client.list(resource, &descriptor).await })
    }
}
