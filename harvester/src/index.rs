use crate::fetch::Fetch;
use cloudcore::FacultyLink;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use url::Url;

/// Extraction from a single directory page.
pub struct IndexPage {
    pub snippets: Vec<String>,
    pub links: Vec<FacultyLink>,
    /// The directory's "nothing found" marker was present.
    pub nothing_found: bool,
}

/// Aggregate result of walking the whole A-Z directory.
pub struct IndexScrape {
    pub keyword_text: String,
    /// Detail links in discovery order, deduplicated by URL across pages.
    pub links: Vec<FacultyLink>,
    pub pages_attempted: u32,
    pub pages_succeeded: u32,
    pub pages_failed: u32,
}

/// URL of one paginated letter page of the directory.
pub fn letter_page_url(base_url: &str, letter: char, page: u32) -> String {
    format!("{base_url}?_last_name_a_z={letter}&_paged={page}")
}

pub(crate) fn element_text(node: &ElementRef) -> String {
    node.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse one directory page: snippet paragraphs and detail links. Entries
/// with no snippet are tolerated; entries with no link are skipped. Relative
/// hrefs are absolutized against the page URL.
pub fn parse_index_page(html: &str, page_url: &str) -> IndexPage {
    let doc = Html::parse_document(html);
    let sel_no_results = Selector::parse("p.facetwp-no-results").unwrap();
    let sel_snippet = Selector::parse("p.type-directory-subtitle").unwrap();
    let sel_entry = Selector::parse("h3.type-directory-title a").unwrap();

    let nothing_found = doc
        .select(&sel_no_results)
        .next()
        .map(|n| element_text(&n).to_lowercase().contains("nothing found"))
        .unwrap_or(false);

    let snippets: Vec<String> = doc
        .select(&sel_snippet)
        .map(|n| element_text(&n))
        .filter(|t| !t.is_empty())
        .collect();

    let base = Url::parse(page_url).ok();
    let mut links = Vec::new();
    for a in doc.select(&sel_entry) {
        let Some(href) = a.value().attr("href") else { continue };
        let abs = match Url::parse(href) {
            Ok(u) => Some(u),
            Err(_) => base.as_ref().and_then(|b| b.join(href).ok()),
        };
        let Some(abs) = abs else { continue };
        if !abs.scheme().starts_with("http") {
            continue;
        }
        links.push(FacultyLink { name: element_text(&a), url: abs.to_string() });
    }

    IndexPage { snippets, links, nothing_found }
}

/// Walk the paginated A-Z directory, collecting snippet text and the
/// deduplicated detail-link set. A failed page ends that letter and is
/// counted; it never ends the crawl. Pagination for a letter stops at the
/// "nothing found" marker or a page with no directory entries.
pub async fn scrape_index<F: Fetch + Sync>(
    fetcher: &F,
    base_url: &str,
    cancel: &AtomicBool,
) -> IndexScrape {
    let mut out = IndexScrape {
        keyword_text: String::new(),
        links: Vec::new(),
        pages_attempted: 0,
        pages_succeeded: 0,
        pages_failed: 0,
    };
    let mut seen: HashSet<String> = HashSet::new();
    let mut snippets: Vec<String> = Vec::new();

    'letters: for letter in 'A'..='Z' {
        let mut page = 1u32;
        loop {
            if cancel.load(Ordering::SeqCst) {
                tracing::info!(%letter, "index crawl cancelled");
                break 'letters;
            }
            let url = letter_page_url(base_url, letter, page);
            out.pages_attempted += 1;
            let result = fetcher.fetch(&url).await;
            let html = match result.body {
                Ok(html) => html,
                Err(e) => {
                    out.pages_failed += 1;
                    tracing::warn!(%letter, page, error = %e, "index page skipped");
                    break;
                }
            };
            out.pages_succeeded += 1;
            let parsed = parse_index_page(&html, &url);
            if parsed.nothing_found || (parsed.snippets.is_empty() && parsed.links.is_empty()) {
                break; // past the last page for this letter
            }
            snippets.extend(parsed.snippets);
            for link in parsed.links {
                if seen.insert(link.url.clone()) {
                    out.links.push(link);
                }
            }
            page += 1;
        }
        eprintln!(
            "index: letter={} pages_ok={} links={} failed={}",
            letter, out.pages_succeeded, out.links.len(), out.pages_failed
        );
    }

    out.keyword_text = snippets.join(" ");
    out
}
