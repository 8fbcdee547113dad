//! Source fetching.

use std::collections::HashMap;
use std::fs;
use std::io::Read;

use crate::error::{Error, Result};

/// Capability to turn a source descriptor into raw bytes.
///
/// A descriptor starting with `http://` or `https://` is a URL; anything
/// else is a filesystem path. Retry and timeout policy belongs to the
/// implementation, never to the pipeline: a fetch failure is terminal for
/// the compilation run.
pub trait Fetcher {
    /// Fetch the raw bytes of a source.
    fn fetch(&self, source: &str) -> Result<Vec<u8>>;
}

/// Whether a source descriptor refers to a remote URL.
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Default fetcher: HTTP(S) via ureq, everything else from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFetcher;

impl Fetcher for DefaultFetcher {
    fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        if is_url(source) {
            fetch_url(source)
        } else {
            log::debug!("reading local source: {}", source);
            fs::read(source).map_err(|e| Error::Fetch {
                source: source.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

fn fetch_url(url: &str) -> Result<Vec<u8>> {
    log::debug!("downloading source: {}", url);

    let response = ureq::get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => Error::Fetch {
            source: url.to_string(),
            reason: format!("HTTP error: {}", code),
        },
        ureq::Error::Transport(t) => Error::Fetch {
            source: url.to_string(),
            reason: format!("transport error: {}", t),
        },
    })?;

    let mut data = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut data)
        .map_err(|e| Error::Fetch {
            source: url.to_string(),
            reason: format!("failed to read response: {}", e),
        })?;
    Ok(data)
}

/// In-memory fetcher for tests and deterministic callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the content served for a source descriptor.
    pub fn insert(&mut self, source: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.entries.insert(source.into(), content.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, source: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(source, content);
        self
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        self.entries
            .get(source)
            .cloned()
            .ok_or_else(|| Error::Fetch {
                source: source.to_string(),
                reason: "no such entry".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("http://example.com/list.txt"));
        assert!(is_url("https://example.com/list.txt"));
        assert!(!is_url("list.txt"));
        assert!(!is_url("/var/lib/lists/list.txt"));
        assert!(!is_url("ftp://example.com/list.txt"));
    }

    #[test]
    fn test_default_fetcher_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "||ads.example^").unwrap();

        let data = DefaultFetcher.fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(data, b"||ads.example^\n");
    }

    #[test]
    fn test_default_fetcher_missing_file() {
        let err = DefaultFetcher.fetch("/nonexistent/list.txt").unwrap_err();
        assert!(matches!(err, Error::Fetch { source, .. } if source == "/nonexistent/list.txt"));
    }

    #[test]
    fn test_memory_fetcher() {
        let fetcher = MemoryFetcher::new().with("a.txt", "||a.example^");
        assert_eq!(fetcher.fetch("a.txt").unwrap(), b"||a.example^");
        assert!(fetcher.fetch("b.txt").is_err());
    }
}
