//! Where a table comes from: a local file or an HTTP(S) URL
//!
//! Fetches are async and single-shot. There is no retry and no timeout; a
//! failure is reported once and the caller shows its "no data" state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::error::LoadError;

/// Location of a source table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret an identifier: anything starting with `http://` or
    /// `https://` is a URL, everything else a path.
    pub fn parse(identifier: &str) -> Self {
        let trimmed = identifier.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    /// Short name used in log lines and error messages
    pub fn name(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Url(url) => url.clone(),
        }
    }

    /// Read the raw bytes of the table
    pub async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            DataSource::File(path) => {
                debug!("Reading {:?}", path);
                tokio::fs::read(path).await.map_err(|source| LoadError::FileFetch {
                    path: path.clone(),
                    source,
                })
            }
            DataSource::Url(url) => {
                debug!("Fetching {}", url);
                let response = reqwest::get(url).await.map_err(|source| LoadError::HttpFetch {
                    url: url.clone(),
                    source,
                })?;

                if !response.status().is_success() {
                    return Err(LoadError::HttpStatus {
                        url: url.clone(),
                        status: response.status().as_u16(),
                    });
                }

                let bytes = response.bytes().await.map_err(|source| LoadError::HttpFetch {
                    url: url.clone(),
                    source,
                })?;
                Ok(bytes.to_vec())
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        DataSource::File(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_identifier() {
        assert_eq!(
            DataSource::parse("https://example.com/winspay.csv"),
            DataSource::Url("https://example.com/winspay.csv".to_string())
        );
        assert_eq!(
            DataSource::parse(" data/winspay.csv "),
            DataSource::File(PathBuf::from("data/winspay.csv"))
        );
    }

    #[tokio::test]
    async fn test_fetch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Team,Avg. Wins\n").unwrap();

        let source = DataSource::from(file.path().to_path_buf());
        let bytes = source.fetch().await.unwrap();
        assert_eq!(bytes, b"Team,Avg. Wins\n");
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::from(dir.path().join("nope.csv"));
        let err = source.fetch().await.unwrap_err();
        assert!(err.is_fetch());
    }
}
