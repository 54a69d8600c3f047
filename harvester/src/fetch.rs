use cloudcore::{FetchError, ScrapeResult};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// First backoff delay between attempts; doubles per retry.
const BACKOFF_BASE_MS: u64 = 500;

/// Seam over page fetching so scraping logic can run against canned pages.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = ScrapeResult> + Send;
}

/// reqwest-backed fetcher with capped retries and exponential backoff.
/// Transport errors, non-2xx statuses, and empty bodies become typed
/// failures in the result; nothing here aborts a crawl.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    attempts: u32,
}

impl PageFetcher {
    pub fn new(user_agent: &str, timeout_secs: u64, attempts: u32) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client, attempts: attempts.max(1) })
    }

    async fn attempt(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }
        Ok(body)
    }
}

impl Fetch for PageFetcher {
    async fn fetch(&self, url: &str) -> ScrapeResult {
        let mut last = FetchError::EmptyBody;
        for attempt in 0..self.attempts {
            if attempt > 0 {
                sleep(Duration::from_millis(BACKOFF_BASE_MS << (attempt - 1))).await;
            }
            match self.attempt(url).await {
                Ok(body) => {
                    return ScrapeResult { url: url.to_string(), body: Ok(body) };
                }
                Err(e) => {
                    tracing::warn!(url, error = %e, attempt = attempt + 1, max = self.attempts, "fetch failed");
                    last = e;
                }
            }
        }
        ScrapeResult { url: url.to_string(), body: Err(last) }
    }
}
