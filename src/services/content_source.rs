//! Article acquisition: local files, directories, and a remote endpoint.
//!
//! Everything here hands plain text to the generation pipeline; markup
//! cleanup happens downstream in the analyzer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SourceError;

const ARTICLE_EXTENSIONS: [&str; 4] = ["md", "txt", "html", "htm"];

/// Read one article file as text.
pub fn read_article(path: &Path) -> Result<String, SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some(ext) if ARTICLE_EXTENSIONS.contains(&ext) => {}
        _ => return Err(SourceError::Unsupported(path.display().to_string())),
    }

    std::fs::read_to_string(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Failed to read article");
        if e.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound(path.display().to_string())
        } else {
            SourceError::Io(e)
        }
    })
}

/// List article files in a directory, sorted by name so batch output order
/// is stable across runs.
pub fn scan_articles(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut articles: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to scan directory");
            SourceError::NotFound(dir.display().to_string())
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| ARTICLE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    articles.sort();
    Ok(articles)
}

/// Fetches article text from a remote content endpoint.
pub struct RemoteSource {
    client: reqwest::blocking::Client,
}

impl RemoteSource {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("inkblot/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("client configuration is static");
        Self { client }
    }

    /// Fetch one article as plain text. Non-2xx responses are fetch errors.
    pub fn fetch(&self, url: &str) -> Result<String, SourceError> {
        tracing::debug!(url, "Fetching remote article");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SourceError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Fetch(format!("{url} returned {status}")));
        }

        response.text().map_err(|e| SourceError::Fetch(e.to_string()))
    }
}

impl Default for RemoteSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_article_accepts_known_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.md", "b.txt", "c.html", "d.HTM"] {
            let path = dir.path().join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "content of {name}").unwrap();

            let text = read_article(&path).unwrap();
            assert!(text.contains(name));
        }
    }

    #[test]
    fn test_read_article_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, b"binary").unwrap();

        assert!(matches!(
            read_article(&path),
            Err(SourceError::Unsupported(_))
        ));
    }

    #[test]
    fn test_read_article_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.md");
        assert!(matches!(read_article(&path), Err(SourceError::NotFound(_))));
    }

    #[test]
    fn test_scan_articles_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.md", "a.txt", "skip.png", "m.html"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let articles = scan_articles(dir.path()).unwrap();
        let names: Vec<_> = articles
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.txt", "m.html", "z.md"]);
    }

    #[test]
    fn test_scan_articles_missing_dir() {
        let result = scan_articles(Path::new("/nonexistent/articles"));
        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }
}
