use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};

use crate::{config::Crawler, error::ScrapeError, logging};

/// The browser the quote page is told it is talking to.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/35.0.1916.114 Safari/537.36";

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers
}

/// Builds the reqwest client used for every quote page.
///
/// Redirects follow the reqwest default policy.
pub fn build_client(settings: &Crawler) -> Result<Client> {
    // 只用 ring，重複安裝時回傳 Err 可忽略
    let _ = rustls::crypto::ring::default_provider().install_default();

    Client::builder()
        // ===== 壓縮 =====
        .brotli(true)
        .gzip(true)
        .zstd(true)
        // ===== 超時設置 =====
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .timeout(Duration::from_secs(settings.timeout_secs))
        // ===== Headers =====
        .default_headers(default_headers())
        .user_agent(settings.user_agent.as_str())
        .build()
        .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
}

/// Performs an HTTP GET request and returns the response body as text.
///
/// A non-success status still returns the body; the caller decides whether
/// the page holds what it needs.
pub async fn get(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let start = Instant::now();
    let response = client.get(url).send().await.map_err(|why| {
        logging::error_file_async(format!(
            "GET:{} failed because {:?}. {} ms",
            url,
            why,
            start.elapsed().as_millis()
        ));
        ScrapeError::transport(url, &why)
    })?;

    let status = response.status();
    let text = response.text().await.map_err(|why| {
        logging::error_file_async(format!(
            "GET:{} body unreadable because {:?}. {} ms",
            url,
            why,
            start.elapsed().as_millis()
        ));
        ScrapeError::transport(url, &why)
    })?;
    let elapsed = start.elapsed().as_millis();

    if status.is_success() {
        logging::info_file_async(format!("GET:{} {} {} ms", url, status, elapsed));
    } else {
        logging::warn_file_async(format!("GET:{} answered {} {} ms", url, status, elapsed));
    }

    Ok(text)
}
