use cloudcore::clean::{frequency_table, StopwordFilter};
use std::collections::HashSet;

fn removed(words: &[&str]) -> HashSet<String> {
    words.iter().map(|s| s.to_string()).collect()
}

#[test]
fn filters_short_tokens_stopwords_and_removed_terms() {
    // "and"/"for" are stopwords, "ai" is too short, "data" is removed.
    let filter = StopwordFilter::new(removed(&["data"]));
    let tokens = filter.clean("Machine Learning and AI for big Data");
    assert_eq!(tokens, vec!["machine", "learning", "big"]);
}

#[test]
fn exclusion_is_case_insensitive() {
    let filter = StopwordFilter::new(removed(&["Data"]));
    let tokens = filter.clean("DATA dAtA warehouse");
    assert_eq!(tokens, vec!["warehouse"]);
}

#[test]
fn keeps_order_and_multiplicity() {
    let filter = StopwordFilter::new(HashSet::new());
    let tokens = filter.clean("alpha beta alpha gamma");
    assert_eq!(tokens, vec!["alpha", "beta", "alpha", "gamma"]);
}

#[test]
fn cleaning_is_idempotent() {
    let filter = StopwordFilter::new(removed(&["data"]));
    let once = filter.clean("Statistical models for messy health data, plus software tools");
    let again = filter.clean(&once.join(" "));
    assert_eq!(once, again);
}

#[test]
fn no_output_token_is_shorter_than_three_chars() {
    let filter = StopwordFilter::new(HashSet::new());
    for token in filter.clean("a an ox AI ML big data networks") {
        assert!(token.chars().count() >= 3, "short token survived: {token}");
    }
}

#[test]
fn tokenizes_on_non_alphanumeric_boundaries() {
    let filter = StopwordFilter::new(HashSet::new());
    let tokens = filter.clean("bio-statistics, genomics/proteomics; NLP2023");
    assert_eq!(tokens, vec!["bio", "statistics", "genomics", "proteomics", "nlp2023"]);
}

#[test]
fn empty_input_yields_no_tokens() {
    let filter = StopwordFilter::new(HashSet::new());
    assert!(filter.clean("").is_empty());
    assert!(filter.clean("  \n\t ").is_empty());
}

#[test]
fn folds_frequencies() {
    let tokens: Vec<String> = ["learning", "machine", "learning"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let freq = frequency_table(&tokens);
    assert_eq!(freq.get("learning"), Some(&2));
    assert_eq!(freq.get("machine"), Some(&1));
    assert_eq!(freq.len(), 2);
}

#[test]
fn missing_removed_words_file_is_fatal() {
    let err = StopwordFilter::from_file(std::path::Path::new("/nonexistent/removed_words.txt"));
    assert!(err.is_err());
}

#[test]
fn loads_removed_words_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("removed_words.txt");
    std::fs::write(&path, "Data\n\nscience\n").unwrap();
    let filter = StopwordFilter::from_file(&path).unwrap();
    let tokens = filter.clean("data science methods");
    assert_eq!(tokens, vec!["methods"]);
}
