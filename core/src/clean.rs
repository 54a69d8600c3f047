use crate::error::ConfigError;
use crate::WordFrequencyTable;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Tokens shorter than this never survive cleaning.
pub const MIN_TOKEN_LEN: usize = 3;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"(?u)\w+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Combined exclusion filter: the standard stopword set, the externally
/// configured removed-words set, and the minimum token length. Built once at
/// startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    removed: HashSet<String>,
}

impl StopwordFilter {
    pub fn new(removed: HashSet<String>) -> Self {
        let removed = removed.into_iter().map(|w| w.to_lowercase()).collect();
        Self { removed }
    }

    /// Load the removed-words list, one term per line, blank lines skipped.
    /// A missing or unreadable file is a fatal configuration error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::RemovedWordsMissing(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::RemovedWordsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let mut removed = HashSet::new();
        for line in raw.lines() {
            let term = line.trim();
            if term.is_empty() {
                continue;
            }
            if term.split_whitespace().count() > 1 {
                // Exclusion is token-level; a multiword entry can never match.
                tracing::warn!(term, "multiword removed-words entry will not match any token");
            }
            removed.insert(term.to_lowercase());
        }
        tracing::info!(terms = removed.len(), path = %path.display(), "loaded removed-words list");
        Ok(Self { removed })
    }

    /// Clean raw corpus text into lowercase tokens: NFKC normalization,
    /// lowercase, split on non-alphanumeric boundaries, drop tokens shorter
    /// than [`MIN_TOKEN_LEN`], drop members of either exclusion set. Order
    /// and multiplicity are preserved.
    pub fn clean(&self, raw: &str) -> Vec<String> {
        let normalized = raw.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        for mat in TOKEN_RE.find_iter(&normalized) {
            let token = mat.as_str();
            if token.chars().count() < MIN_TOKEN_LEN {
                continue;
            }
            if is_stopword(token) || self.removed.contains(token) {
                continue;
            }
            tokens.push(token.to_string());
        }
        tokens
    }
}

/// Fold cleaned tokens into the token -> count table handed to rendering.
pub fn frequency_table(tokens: &[String]) -> WordFrequencyTable {
    let mut freq = WordFrequencyTable::new();
    for token in tokens {
        *freq.entry(token.clone()).or_insert(0) += 1;
    }
    freq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_clean() {
        let filter = StopwordFilter::new(HashSet::new());
        let tokens = filter.clean("Research in machine learning and statistics.");
        assert_eq!(tokens, vec!["research", "machine", "learning", "statistics"]);
    }
}
