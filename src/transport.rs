//! Data transport: local files and single-shot HTTP fetches.
//!
//! A fetch is one attempt: no timeout beyond the client's defaults, no
//! retry. A non-success status is reported as [`LoadError::Transport`]
//! before the body is read.

use crate::data::{LoadError, LoadResult, parse_csv_content, parse_json_content};
use crate::types::{DataOrigin, Dataset};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Where a dataset is loaded from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(Url),
}

impl Source {
    /// Interpret a configured source string
    ///
    /// `http`, `https` and `file` URLs are taken as-is. Anything else is a
    /// path, resolved against `base` when one is given.
    pub fn parse(raw: &str, base: Option<&Url>) -> LoadResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(LoadError::Source("empty source".to_string()));
        }

        if let Ok(url) = Url::parse(raw) {
            match url.scheme() {
                "http" | "https" => return Ok(Source::Url(url)),
                "file" => {
                    return url
                        .to_file_path()
                        .map(Source::Path)
                        .map_err(|_| LoadError::Source(format!("not a local file URL: {raw}")));
                }
                _ => {}
            }
        }

        match base {
            Some(base) => base
                .join(raw)
                .map(Source::Url)
                .map_err(|e| LoadError::Source(format!("cannot resolve {raw} against {base}: {e}"))),
            None => Ok(Source::Path(PathBuf::from(raw))),
        }
    }

    pub fn origin(&self) -> DataOrigin {
        match self {
            Source::Path(path) => DataOrigin::File { path: path.clone() },
            Source::Url(url) => DataOrigin::Api {
                url: url.to_string(),
            },
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

/// How a payload body is parsed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadFormat {
    Delimited,
    Json,
}

impl PayloadFormat {
    /// Format implied by a path's extension, delimited unless `.json`
    pub fn from_path(path: &str) -> Self {
        let is_json = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            PayloadFormat::Json
        } else {
            PayloadFormat::Delimited
        }
    }

    /// Format implied by a `Content-Type` header, if it is specific
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("json") {
            Some(PayloadFormat::Json)
        } else if content_type.contains("csv") {
            Some(PayloadFormat::Delimited)
        } else {
            None
        }
    }
}

/// A fetched body, not yet parsed
#[derive(Clone, Debug)]
pub struct Payload {
    pub body: String,
    pub format: PayloadFormat,
    pub origin: DataOrigin,
}

impl Payload {
    pub fn into_dataset(self) -> LoadResult<Dataset> {
        match self.format {
            PayloadFormat::Delimited => Ok(parse_csv_content(&self.body, self.origin)),
            PayloadFormat::Json => parse_json_content(&self.body, self.origin),
        }
    }
}

/// Something that can fetch a payload from a [`Source`]
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn fetch(&self, source: &Source) -> LoadResult<Payload>;
}

/// Reads local files with tokio and URLs with reqwest
#[derive(Clone, Debug, Default)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch_url(&self, url: &Url) -> LoadResult<Payload> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Transport {
                status: status.as_u16(),
            });
        }

        let format = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(PayloadFormat::from_content_type)
            .unwrap_or_else(|| PayloadFormat::from_path(url.path()));
        let bytes = resp.bytes().await?;
        debug!(url = %url, bytes = bytes.len(), ?format, "fetched");

        Ok(Payload {
            body: decode(bytes.to_vec())?,
            format,
            origin: DataOrigin::Api {
                url: url.to_string(),
            },
        })
    }

    async fn fetch_file(&self, path: &Path) -> LoadResult<Payload> {
        let bytes = tokio::fs::read(path).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "read");

        Ok(Payload {
            body: decode(bytes)?,
            format: PayloadFormat::from_path(&path.to_string_lossy()),
            origin: DataOrigin::File {
                path: path.to_path_buf(),
            },
        })
    }
}

impl Transport for Fetcher {
    async fn fetch(&self, source: &Source) -> LoadResult<Payload> {
        info!(%source, "fetching");
        match source {
            Source::Path(path) => self.fetch_file(path).await,
            Source::Url(url) => self.fetch_url(url).await,
        }
    }
}

fn decode(bytes: Vec<u8>) -> LoadResult<String> {
    String::from_utf8(bytes).map_err(|e| LoadError::Parse(format!("payload is not UTF-8 text: {e}")))
}
