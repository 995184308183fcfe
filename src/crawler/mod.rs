use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::Crawler,
    crawler::google::Google,
    declare::Quote,
    error::ScrapeError,
    util,
};

/// Google 財經
pub mod google;

/// Where quote pages come from.
#[async_trait]
pub trait QuotePage {
    /// Returns the raw page text at `url`.
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Fetches quote pages over HTTP.
pub struct HttpQuotePage {
    client: Client,
}

impl HttpQuotePage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuotePage for HttpQuotePage {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        util::http::get(&self.client, url).await
    }
}

/// 取得股票最新成交價與報價日期
pub async fn fetch_quote<P>(page: &P, crawler: &Crawler, symbol: &str) -> Result<Quote, ScrapeError>
where
    P: QuotePage + Sync + ?Sized,
{
    let url = crawler.url_for(symbol);
    let html = page.fetch(&url).await?;

    Google::extract(&html)
}
