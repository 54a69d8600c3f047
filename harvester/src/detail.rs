use crate::fetch::Fetch;
use crate::index::element_text;
use cloudcore::FacultyLink;
use scraper::{Html, Selector};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinSet;

/// Separator between detail pages so tokens never run together across page
/// boundaries.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Aggregate result of fetching all discovered detail pages.
pub struct DetailScrape {
    pub description_text: String,
    pub succeeded: u32,
    pub failed: u32,
}

/// Extract the research-description block. None when the container is
/// missing or holds no text.
pub fn parse_detail_page(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse(".dynamic-entry-content").unwrap();
    let text = doc.select(&sel).next().map(|n| element_text(&n))?;
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Fetch every detail link through a bounded worker pool and aggregate the
/// description blocks. One unreachable page increments `failed` and the
/// batch continues. Aggregation is order-independent; separator-joined
/// concatenation commutes for frequency purposes. Cancellation stops new
/// fetches and drains the pool.
pub async fn scrape_details<F>(
    fetcher: &F,
    links: &[FacultyLink],
    concurrency: usize,
    cancel: &AtomicBool,
) -> DetailScrape
where
    F: Fetch + Clone + Send + Sync + 'static,
{
    let total = links.len();
    let concurrency = concurrency.max(1);
    let mut out = DetailScrape { description_text: String::new(), succeeded: 0, failed: 0 };
    let mut blocks: Vec<String> = Vec::new();
    let mut queue = links.iter().cloned();
    let mut inflight: JoinSet<Option<String>> = JoinSet::new();
    let mut processed = 0usize;

    loop {
        while inflight.len() < concurrency && !cancel.load(Ordering::SeqCst) {
            let Some(link) = queue.next() else { break };
            let fetcher = fetcher.clone();
            inflight.spawn(async move {
                let result = fetcher.fetch(&link.url).await;
                match result.body {
                    Ok(html) => {
                        let block = parse_detail_page(&html);
                        if block.is_none() {
                            tracing::warn!(url = %link.url, "research description block missing");
                        }
                        block
                    }
                    Err(e) => {
                        tracing::warn!(url = %link.url, error = %e, "detail fetch failed");
                        None
                    }
                }
            });
        }

        let Some(joined) = inflight.join_next().await else { break };
        processed += 1;
        match joined {
            Ok(Some(block)) => {
                out.succeeded += 1;
                blocks.push(block);
            }
            Ok(None) => out.failed += 1,
            Err(e) => {
                out.failed += 1;
                tracing::warn!(error = %e, "detail worker aborted");
            }
        }
        if processed % 25 == 0 {
            eprintln!("details: processed={processed} total={total} failed={}", out.failed);
        }
    }

    out.description_text = blocks.join(PAGE_SEPARATOR);
    out
}
