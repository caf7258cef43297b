use std::fmt;
use std::path::PathBuf;

use rust_embed::Embed;

use crate::content::LoadError;
use crate::store::json_store::JsonStore;

#[derive(Embed)]
#[folder = "assets/data/"]
struct BundledData;

/// Where dataset documents are read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetSource {
    /// Copies compiled into the binary.
    Bundled,
    /// A directory containing `cards.json` and `questions.json`.
    Directory(PathBuf),
    /// An HTTP base URL. Requires the `network` feature.
    Remote(String),
}

impl DatasetSource {
    /// Return the raw text of the named document.
    pub fn fetch(&self, name: &str) -> Result<String, LoadError> {
        match self {
            DatasetSource::Bundled => {
                let file =
                    BundledData::get(name).ok_or_else(|| LoadError::Missing(name.to_string()))?;
                String::from_utf8(file.data.into_owned())
                    .map_err(|e| LoadError::Parse(format!("{name}: {e}")))
            }
            DatasetSource::Directory(dir) => JsonStore::open(dir.clone()).read_raw(name),
            DatasetSource::Remote(base) => fetch_url(&join_url(base, name)),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Bundled => write!(f, "bundled"),
            DatasetSource::Directory(dir) => write!(f, "{}", dir.display()),
            DatasetSource::Remote(base) => write!(f, "{base}"),
        }
    }
}

fn join_url(base: &str, name: &str) -> String {
    format!("{}/{name}", base.trim_end_matches('/'))
}

#[cfg(feature = "network")]
fn fetch_url(url: &str) -> Result<String, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| LoadError::Network(e.to_string()))?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| LoadError::Network(e.to_string()))?;
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(LoadError::Missing(url.to_string()));
    }
    if !status.is_success() {
        return Err(LoadError::Network(format!("{url}: HTTP {status}")));
    }
    response
        .text()
        .map_err(|e| LoadError::Network(e.to_string()))
}

#[cfg(not(feature = "network"))]
fn fetch_url(url: &str) -> Result<String, LoadError> {
    Err(LoadError::Network(format!(
        "{url}: built without network support"
    )))
}
