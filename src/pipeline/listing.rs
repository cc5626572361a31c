// src/pipeline/listing.rs
// =============================================================================
// The local copy of the listing page.
//
// The listing is fetched once and kept on disk, so reruns scan the same page
// without hitting the site again. A refresh replaces the file completely;
// it is never appended to.
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::fetch::fetch_bytes;
use crate::storage;

/// Makes sure the cache file exists, fetching the listing if needed.
///
/// Returns true if the listing was fetched by this call.
pub async fn ensure_listing_cached(client: &Client, config: &Config) -> Result<bool> {
    let cache = &config.cache_path;

    if !config.refresh_listing && storage::file_exists(cache).await {
        debug!(path = %cache.display(), "using cached listing");
        return Ok(false);
    }

    info!(url = %config.listing_url, "fetching listing page");
    let body = fetch_bytes(client, &config.listing_url)
        .await
        .with_context(|| format!("failed to fetch listing page {}", config.listing_url))?;

    storage::write_atomic(cache, &body)
        .await
        .with_context(|| format!("failed to write listing cache {}", cache.display()))?;

    info!(path = %cache.display(), bytes = body.len(), "listing cached");
    Ok(true)
}

/// Reads the cached listing as text. Invalid UTF-8 is replaced, not fatal.
pub async fn load_listing(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read listing cache {}", path.display()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::build_client;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, dir: &Path) -> Config {
        Config {
            listing_url: format!("{}/listing", server.uri()),
            cache_path: dir.join("listing.html"),
            output_dir: dir.join("out"),
            ..Config::default()
        }
    }

    fn client() -> Client {
        build_client(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_existing_cache_is_not_refetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("new"))
            .expect(0)
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let config = config_for(&server, dir.path());
        std::fs::write(&config.cache_path, "old").unwrap();

        let fetched = ensure_listing_cached(&client(), &config).await.unwrap();

        assert!(!fetched);
        assert_eq!(load_listing(&config.cache_path).await.unwrap(), "old");
    }

    #[tokio::test]
    async fn test_refresh_overwrites_instead_of_appending() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/listing"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fresh listing"))
            .expect(1)
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let config = Config {
            refresh_listing: true,
            ..config_for(&server, dir.path())
        };
        std::fs::write(&config.cache_path, "a much longer stale listing body").unwrap();

        let fetched = ensure_listing_cached(&client(), &config).await.unwrap();

        assert!(fetched);
        assert_eq!(
            load_listing(&config.cache_path).await.unwrap(),
            "fresh listing"
        );
    }

    #[tokio::test]
    async fn test_failed_listing_fetch_is_an_error_and_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let config = config_for(&server, dir.path());

        let err = ensure_listing_cached(&client(), &config).await.unwrap_err();

        assert!(err.to_string().contains("listing page"));
        assert!(!config.cache_path.exists());
    }

    #[tokio::test]
    async fn test_load_listing_tolerates_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("listing.html");
        std::fs::write(&cache, b"ok \xFF https://x.com/a.pdf").unwrap();

        let text = load_listing(&cache).await.unwrap();
        assert!(text.contains("https://x.com/a.pdf"));
    }

    #[tokio::test]
    async fn test_load_missing_listing_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_listing(&dir.path().join("nope.html")).await.is_err());
    }
}
