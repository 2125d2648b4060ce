use std::time::Duration;

use async_trait::async_trait;
use otruyen_lib::{
    LIB_VERSION,
    error::{Error, Result},
    models::{Category, ChapterContent, ChapterRef, ComicDetail, ListingResult, NEW_RELEASES_SLUG},
    traits::Catalog,
};
use otruyen_schema::{
    CategoryIndexResponse, ChapterResponse, ComicDetailResponse, ListingResponse,
};
use serde::de::DeserializeOwned;

use crate::config::Config;

/// HTTP client for the otruyen catalog API
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

impl CatalogClient {
    pub fn new(config: &Config) -> Result<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("otruyen/{LIB_VERSION}"));

        let mut builder = reqwest::ClientBuilder::new().user_agent(user_agent);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build().map_err(transport_error)?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v1/api/{}", self.base_url, path)
    }

    async fn get_json<R>(&self, url: &str, query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!("GET {} {:?}", url, query);

        let res = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = res.status();
        if !status.is_success() {
            warn!("{} responded with {}", url, status);
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = res.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| Error::Decode(e.to_string()))
    }

    async fn listing(&self, path: &str, query: &[(&str, &str)]) -> Result<ListingResult> {
        let response: ListingResponse = self.get_json(&self.api_url(path), query).await?;
        Ok(response.into_inner().into())
    }
}

#[async_trait(?Send)]
impl Catalog for CatalogClient {
    async fn new_releases(&self, page: u32) -> Result<ListingResult> {
        self.status_listing(NEW_RELEASES_SLUG, page).await
    }

    async fn status_listing(&self, status_slug: &str, page: u32) -> Result<ListingResult> {
        let page = page.to_string();
        self.listing(&format!("danh-sach/{status_slug}"), &[("page", &page)])
            .await
    }

    async fn category_listing(&self, category_slug: &str, page: u32) -> Result<ListingResult> {
        let page = page.to_string();
        self.listing(&format!("the-loai/{category_slug}"), &[("page", &page)])
            .await
    }

    async fn search(&self, keyword: &str, page: u32) -> Result<ListingResult> {
        let page = page.to_string();
        self.listing("tim-kiem", &[("keyword", keyword), ("page", &page)])
            .await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let response: CategoryIndexResponse = self.get_json(&self.api_url("the-loai"), &[]).await?;
        Ok(response.into_inner().into())
    }

    async fn comic_detail(&self, slug: &str) -> Result<ComicDetail> {
        let url = self.api_url(&format!("truyen-tranh/{slug}"));
        let response: ComicDetailResponse = self.get_json(&url, &[]).await?;
        Ok(response.into_inner().into())
    }

    async fn chapter_content(&self, chapter: &ChapterRef) -> Result<ChapterContent> {
        let response: ChapterResponse = self.get_json(&chapter.content_endpoint, &[]).await?;
        Ok(response.into_inner().into())
    }
}
