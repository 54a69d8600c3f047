use crate::detail;
use crate::fetch::Fetch;
use crate::index::{self, IndexScrape};
use anyhow::{bail, Result};
use cloudcore::cache::{self, CachePaths};
use cloudcore::clean::{frequency_table, StopwordFilter};
use cloudcore::{Corpus, CorpusKind, CorpusSource, WordFrequencyTable};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Config {
    pub base_url: String,
    pub cache_dir: PathBuf,
    /// Ignore cache files and re-scrape both corpora.
    pub refresh: bool,
    pub concurrency: usize,
}

/// Per-corpus run statistics. For keywords the page counts are index pages;
/// for descriptions they are detail links. Attempted counts the scheduled
/// batch, so a cancelled run shows attempted > succeeded + failed.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub source: CorpusSource,
    pub pages_attempted: u32,
    pub pages_succeeded: u32,
    pub pages_failed: u32,
    /// Whitespace-delimited tokens before cleaning.
    pub raw_tokens: usize,
    pub clean_tokens: usize,
}

impl CorpusStats {
    fn cached() -> Self {
        Self {
            source: CorpusSource::Cached,
            pages_attempted: 0,
            pages_succeeded: 0,
            pages_failed: 0,
            raw_tokens: 0,
            clean_tokens: 0,
        }
    }

    fn scraped(attempted: u32, succeeded: u32, failed: u32) -> Self {
        Self {
            source: CorpusSource::Scraped,
            pages_attempted: attempted,
            pages_succeeded: succeeded,
            pages_failed: failed,
            raw_tokens: 0,
            clean_tokens: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub keywords: CorpusStats,
    pub descriptions: CorpusStats,
}

/// What the run hands to rendering and reporting.
pub struct RunReport {
    pub keyword_freq: WordFrequencyTable,
    pub description_freq: WordFrequencyTable,
    pub stats: RunStats,
}

/// Drive both corpora through cache check, scrape, cache write, cleaning,
/// and frequency folding. This is the failure boundary: page and link
/// failures degrade coverage and are counted, never fatal. The run aborts
/// only when descriptions are needed, no cache exists, and the index yields
/// zero links.
pub async fn run<F>(
    fetcher: &F,
    config: &Config,
    filter: &StopwordFilter,
    cancel: &AtomicBool,
) -> Result<RunReport>
where
    F: Fetch + Clone + Send + Sync + 'static,
{
    let paths = CachePaths::new(&config.cache_dir);
    let mut index_scrape: Option<IndexScrape> = None;

    // Keywords corpus: index-page snippets.
    let (keywords_corpus, mut keywords_stats) = match load_cached(&paths, CorpusKind::Keywords, config.refresh) {
        Some(corpus) => (corpus, CorpusStats::cached()),
        None => {
            let scrape = index::scrape_index(fetcher, &config.base_url, cancel).await;
            let corpus = Corpus {
                raw_text: scrape.keyword_text.clone(),
                page_count: Some(scrape.pages_succeeded),
            };
            save_unless_cancelled(&paths, CorpusKind::Keywords, &corpus, cancel);
            let stats =
                CorpusStats::scraped(scrape.pages_attempted, scrape.pages_succeeded, scrape.pages_failed);
            index_scrape = Some(scrape);
            (corpus, stats)
        }
    };

    // Descriptions corpus: detail pages behind the discovered links.
    let (descriptions_corpus, mut descriptions_stats) =
        match load_cached(&paths, CorpusKind::Descriptions, config.refresh) {
            Some(corpus) => (corpus, CorpusStats::cached()),
            None => {
                let links = match &index_scrape {
                    Some(scrape) => scrape.links.clone(),
                    None => {
                        // Keywords came from cache; crawl the index for links only.
                        let scrape = index::scrape_index(fetcher, &config.base_url, cancel).await;
                        tracing::info!(
                            pages = scrape.pages_succeeded,
                            links = scrape.links.len(),
                            "link discovery crawl"
                        );
                        scrape.links
                    }
                };
                if links.is_empty() && !cancel.load(Ordering::SeqCst) {
                    bail!("no faculty links discovered and no cached descriptions; index unreachable");
                }
                let scrape = detail::scrape_details(fetcher, &links, config.concurrency, cancel).await;
                let corpus = Corpus {
                    raw_text: scrape.description_text,
                    page_count: Some(scrape.succeeded),
                };
                save_unless_cancelled(&paths, CorpusKind::Descriptions, &corpus, cancel);
                let stats = CorpusStats::scraped(links.len() as u32, scrape.succeeded, scrape.failed);
                (corpus, stats)
            }
        };

    let keyword_tokens = filter.clean(&keywords_corpus.raw_text);
    let description_tokens = filter.clean(&descriptions_corpus.raw_text);
    keywords_stats.raw_tokens = keywords_corpus.raw_text.split_whitespace().count();
    keywords_stats.clean_tokens = keyword_tokens.len();
    descriptions_stats.raw_tokens = descriptions_corpus.raw_text.split_whitespace().count();
    descriptions_stats.clean_tokens = description_tokens.len();

    Ok(RunReport {
        keyword_freq: frequency_table(&keyword_tokens),
        description_freq: frequency_table(&description_tokens),
        stats: RunStats { keywords: keywords_stats, descriptions: descriptions_stats },
    })
}

/// Cache read. A read failure is a miss with a warning; scraping covers it.
fn load_cached(paths: &CachePaths, kind: CorpusKind, refresh: bool) -> Option<Corpus> {
    if refresh {
        return None;
    }
    match cache::load(paths, kind) {
        Ok(hit) => {
            if hit.is_some() {
                tracing::info!(corpus = kind.as_str(), "loaded corpus from cache");
            }
            hit
        }
        Err(e) => {
            tracing::warn!(corpus = kind.as_str(), error = %e, "cache read failed; falling back to scrape");
            None
        }
    }
}

/// Cache write. Skipped after cancellation so a partial crawl never
/// masquerades as a full corpus; a write failure is logged and the run
/// continues with the in-memory corpus.
fn save_unless_cancelled(paths: &CachePaths, kind: CorpusKind, corpus: &Corpus, cancel: &AtomicBool) {
    if cancel.load(Ordering::SeqCst) {
        tracing::info!(corpus = kind.as_str(), "cancelled; cache not written");
        return;
    }
    match cache::save(paths, kind, corpus) {
        Ok(()) => tracing::info!(corpus = kind.as_str(), "saved corpus to cache"),
        Err(e) => tracing::warn!(corpus = kind.as_str(), error = %e, "cache write failed; continuing"),
    }
}
