use crate::pipeline::{CorpusStats, RunStats};
use cloudcore::CorpusSource;

/// Plain-text summary table for the end of a run. Failure counts stay
/// visible so a zero-success run never reads as healthy.
pub fn format_summary(stats: &RunStats) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<14} {:>8} {:>10} {:>10} {:>8} {:>12} {:>12}\n",
        "corpus", "source", "attempted", "succeeded", "failed", "raw tokens", "clean tokens"
    ));
    out.push_str(&row("keywords", &stats.keywords));
    out.push_str(&row("descriptions", &stats.descriptions));
    out
}

fn row(name: &str, stats: &CorpusStats) -> String {
    // Page counts are unknown for a cache hit; never fabricate them.
    let (source, attempted, succeeded, failed) = match stats.source {
        CorpusSource::Cached => ("cached", "-".to_string(), "-".to_string(), "-".to_string()),
        CorpusSource::Scraped => (
            "scraped",
            stats.pages_attempted.to_string(),
            stats.pages_succeeded.to_string(),
            stats.pages_failed.to_string(),
        ),
    };
    format!(
        "{:<14} {:>8} {:>10} {:>10} {:>8} {:>12} {:>12}\n",
        name, source, attempted, succeeded, failed, stats.raw_tokens, stats.clean_tokens
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudcore::CorpusSource;

    fn scraped(attempted: u32, succeeded: u32, failed: u32) -> CorpusStats {
        CorpusStats {
            source: CorpusSource::Scraped,
            pages_attempted: attempted,
            pages_succeeded: succeeded,
            pages_failed: failed,
            raw_tokens: 100,
            clean_tokens: 60,
        }
    }

    #[test]
    fn summary_shows_counts_and_sources() {
        let mut cached = scraped(0, 0, 0);
        cached.source = CorpusSource::Cached;
        let stats = RunStats { keywords: scraped(28, 26, 2), descriptions: cached };
        let table = format_summary(&stats);
        assert!(table.contains("keywords"));
        assert!(table.contains("scraped"));
        assert!(table.contains("cached"));
        assert!(table.contains("26"));
        assert!(table.contains("2"));
    }

    #[test]
    fn zero_success_run_is_visible() {
        let stats = RunStats { keywords: scraped(26, 0, 26), descriptions: scraped(0, 0, 0) };
        let table = format_summary(&stats);
        assert!(table.contains("26"));
        let keywords_line = table.lines().nth(1).unwrap();
        assert!(keywords_line.contains(" 0 "));
    }
}
