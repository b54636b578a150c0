//! HTTP loading of content-pack catalogs
//!
//! A session fetches its catalog once at startup. Failures never end the
//! session; they leave it in [`CatalogState::Unavailable`] with no previews.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use super::{Catalog, CatalogError};
use crate::config::CatalogSettings;

/// Where a catalog comes from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, content_pack: &str) -> Result<Catalog, CatalogError>;
}

/// Lifecycle of the session catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    /// No content pack configured for this session
    NotConfigured,
    Loading,
    Loaded(Catalog),
    /// Fetch or parse failed; the wardrobe runs without previews
    Unavailable(CatalogError),
}

impl CatalogState {
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            CatalogState::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }
}

/// Fetches `{content_host}/api/content_packs/{pack}/raw.json`
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    content_host: Url,
    timeout: Option<Duration>,
}

impl HttpCatalogSource {
    pub fn new(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        let content_host = Url::parse(&settings.content_host)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", settings.content_host, e)))?;
        if content_host.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(settings.content_host.clone()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("mre-wardrobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        Ok(Self {
            client,
            content_host,
            timeout: settings.request_timeout(),
        })
    }

    pub fn catalog_url(&self, content_pack: &str) -> Result<Url, CatalogError> {
        // Dot segments would be dropped from the path and hit another resource
        if content_pack == "." || content_pack == ".." {
            return Err(CatalogError::InvalidUrl(format!("content pack id '{}'", content_pack)));
        }

        let mut url = self.content_host.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.content_host.to_string()))?
            .pop_if_empty()
            .extend(["api", "content_packs", content_pack, "raw.json"]);
        Ok(url)
    }

    async fn request(&self, url: Url) -> Result<Catalog, CatalogError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;
        debug!("Catalog response: {} bytes", body.len());

        Catalog::from_json_str(&body)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self, content_pack: &str) -> Result<Catalog, CatalogError> {
        let url = self.catalog_url(content_pack)?;
        info!("📦 Fetching wearable catalog: {}", url);

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.request(url))
                .await
                .map_err(|_| CatalogError::Timeout(limit))?,
            None => self.request(url).await,
        }
    }
}

/// Resolve the session catalog, retrying as configured.
pub async fn load_catalog(
    source: &dyn CatalogSource,
    content_pack: Option<&str>,
    settings: &CatalogSettings,
) -> CatalogState {
    let Some(content_pack) = content_pack else {
        info!("No content pack configured; wardrobe starts without previews");
        return CatalogState::NotConfigured;
    };

    let mut attempt = 0;
    loop {
        match source.fetch(content_pack).await {
            Ok(catalog) => {
                info!("📦 Loaded {} wearables from content pack {}", catalog.len(), content_pack);
                return CatalogState::Loaded(catalog);
            }
            Err(e) if attempt < settings.retry_attempts => {
                attempt += 1;
                warn!(
                    "Catalog fetch for {} failed ({}), retry {}/{}",
                    content_pack, e, attempt, settings.retry_attempts
                );
                tokio::time::sleep(settings.retry_backoff()).await;
            }
            Err(e) => {
                warn!("❌ Catalog unavailable for content pack {}: {}", content_pack, e);
                return CatalogState::Unavailable(e);
            }
        }
    }
}
