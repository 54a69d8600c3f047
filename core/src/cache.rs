use crate::error::CacheError;
use crate::{Corpus, CorpusKind};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Locations of the flat-file corpus cache.
pub struct CachePaths {
    pub root: PathBuf,
}

impl CachePaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn corpus_file(&self, kind: CorpusKind) -> PathBuf {
        self.root.join(kind.cache_file())
    }
}

/// Load the cached raw text for one corpus. A missing or empty file is a
/// miss, not an error. `page_count` is not recoverable from cache.
pub fn load(paths: &CachePaths, kind: CorpusKind) -> Result<Option<Corpus>, CacheError> {
    let file = paths.corpus_file(kind);
    if !file.exists() {
        return Ok(None);
    }
    let raw_text = fs::read_to_string(&file)?;
    if raw_text.is_empty() {
        return Ok(None);
    }
    Ok(Some(Corpus { raw_text, page_count: None }))
}

/// Persist the raw corpus text. Writes to a temp file in the cache directory
/// and renames it into place, so a crash mid-write never leaves a partial
/// file that loads as valid.
pub fn save(paths: &CachePaths, kind: CorpusKind, corpus: &Corpus) -> Result<(), CacheError> {
    fs::create_dir_all(&paths.root)?;
    let tmp = paths.root.join(format!("{}.tmp", kind.cache_file()));
    let mut f = File::create(&tmp)?;
    f.write_all(corpus.raw_text.as_bytes())?;
    f.sync_all()?;
    fs::rename(&tmp, paths.corpus_file(kind))?;
    Ok(())
}
