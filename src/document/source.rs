//! Document sources
//!
//! The core never performs network I/O itself; it consumes text from a
//! [`DocumentSource`]. Implementations:
//! - `HttpSource`: HTTP(S) GET of a published document
//! - `FileSource`: local file (dev mode, offline work)
//! - `StaticSource`: in-memory text
//! - `CachedSource`: memoizes the first successful fetch of another source

use super::error::{DocumentError, Result};
use std::path::PathBuf;
use tokio::sync::OnceCell;
use url::Url;

/// Something that can deliver the raw text of a document
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    /// Fetch the full document body
    async fn fetch(&self) -> Result<String>;

    /// Human-readable location, used in logs and errors
    fn location(&self) -> &str;
}

/// Check that a URL is absolute, uses http or https, and names a host
pub fn validate_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let url = Url::parse(raw)
        .map_err(|e| DocumentError::Config(format!("Invalid URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DocumentError::Config(format!(
            "URL '{}' must use http or https, got '{}'",
            raw,
            url.scheme()
        )));
    }
    if url.host_str().unwrap_or("").is_empty() {
        return Err(DocumentError::Config(format!("URL '{}' has no host", raw)));
    }

    Ok(url)
}

/// Fetches a document with a single HTTP GET
pub struct HttpSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for `url`, validating it up front
    pub fn new(url: &str) -> Result<Self> {
        let url = validate_url(url)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("hidden_grid/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DocumentError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpSource { url, client })
    }
}

impl DocumentSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        tracing::debug!("GET {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| DocumentError::unreachable(self.location(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocumentError::unreachable(
                self.location(),
                format!("HTTP status {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| DocumentError::unreachable(self.location(), e))
    }

    fn location(&self) -> &str {
        self.url.as_str()
    }
}

/// Reads a document from the local filesystem
pub struct FileSource {
    path: PathBuf,
    display: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        FileSource { path, display }
    }
}

impl DocumentSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DocumentError::unreachable(self.location(), e))?;

        String::from_utf8(bytes).map_err(|e| {
            DocumentError::UnparseableInput(format!("'{}' is not UTF-8 text: {}", self.display, e))
        })
    }

    fn location(&self) -> &str {
        &self.display
    }
}

/// Serves a fixed in-memory document
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        StaticSource { text: text.into() }
    }
}

impl DocumentSource for StaticSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn location(&self) -> &str {
        "<memory>"
    }
}

/// Wraps a source and fetches it at most once
///
/// Failed fetches are not cached; the next call tries again.
pub struct CachedSource<S> {
    inner: S,
    cache: OnceCell<String>,
}

impl<S: DocumentSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        CachedSource {
            inner,
            cache: OnceCell::new(),
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cache.initialized()
    }
}

impl<S: DocumentSource> DocumentSource for CachedSource<S> {
    async fn fetch(&self) -> Result<String> {
        if self.cache.initialized() {
            tracing::debug!("Document cache HIT for {}", self.location());
        } else {
            tracing::debug!("Document cache MISS for {} - fetching", self.location());
        }

        self.cache
            .get_or_try_init(|| self.inner.fetch())
            .await
            .cloned()
    }

    fn location(&self) -> &str {
        self.inner.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts fetches and fails the first `failures` of them
    struct CountingSource {
        calls: Cell<usize>,
        failures: usize,
    }

    impl DocumentSource for CountingSource {
        async fn fetch(&self) -> Result<String> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call <= self.failures {
                return Err(DocumentError::unreachable("counting", "offline"));
            }
            Ok(format!("fetch #{}", call))
        }

        fn location(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("https://docs.google.com/document/d/e/abc/pub").is_ok());
        assert!(validate_url("  http://localhost:8080/table  ").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_bad_urls() {
        assert!(matches!(validate_url(""), Err(DocumentError::Config(_))));
        assert!(matches!(
            validate_url("docs.google.com/document"),
            Err(DocumentError::Config(_))
        ));
        assert!(matches!(
            validate_url("ftp://example.com/table"),
            Err(DocumentError::Config(_))
        ));
        assert!(matches!(
            validate_url("file:///tmp/table.html"),
            Err(DocumentError::Config(_))
        ));
    }

    #[test]
    fn test_http_source_rejects_invalid_url() {
        assert!(HttpSource::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new("0,A,0");
        assert_eq!(source.fetch().await.unwrap(), "0,A,0");
        assert_eq!(source.location(), "<memory>");
    }

    #[tokio::test]
    async fn test_file_source_reads_text() {
        let path = std::env::temp_dir().join(format!("hidden_grid_{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, "1,B,2\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.fetch().await.unwrap(), "1,B,2\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_unreachable() {
        let path = std::env::temp_dir().join(format!("hidden_grid_{}.missing", uuid::Uuid::new_v4()));
        let result = FileSource::new(path).fetch().await;
        assert!(matches!(result, Err(DocumentError::UnreachableSource { .. })));
    }

    #[tokio::test]
    async fn test_file_source_binary_is_unparseable() {
        let path = std::env::temp_dir().join(format!("hidden_grid_{}.bin", uuid::Uuid::new_v4()));
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let result = FileSource::new(&path).fetch().await;
        assert!(matches!(result, Err(DocumentError::UnparseableInput(_))));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_cached_source_fetches_once() {
        let cached = CachedSource::new(CountingSource {
            calls: Cell::new(0),
            failures: 0,
        });
        assert!(!cached.is_cached());

        assert_eq!(cached.fetch().await.unwrap(), "fetch #1");
        assert_eq!(cached.fetch().await.unwrap(), "fetch #1");
        assert!(cached.is_cached());
        assert_eq!(cached.inner.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_cached_source_retries_after_failure() {
        let cached = CachedSource::new(CountingSource {
            calls: Cell::new(0),
            failures: 1,
        });

        assert!(cached.fetch().await.is_err());
        assert!(!cached.is_cached());
        assert_eq!(cached.fetch().await.unwrap(), "fetch #2");
    }
}
