//! Model artifact retrieval from local files or remote URLs
//!
//! Each source is read at most once per store; later loads return the cached
//! artifact so a remote model is downloaded only once per process.

use super::{ModelArtifact, Predictor};
use crate::error::{RateError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a model artifact lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelSource {
    Path(PathBuf),
    Url(String),
}

impl ModelSource {
    /// `http://` and `https://` strings are URLs, anything else a file path
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            ModelSource::Url(trimmed.to_string())
        } else {
            ModelSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Path(path) => write!(f, "{}", path.display()),
            ModelSource::Url(url) => f.write_str(url),
        }
    }
}

/// Loads and caches model artifacts by source
#[derive(Default)]
pub struct ModelStore {
    cache: HashMap<ModelSource, Arc<ModelArtifact>>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `source`, reusing a previously loaded artifact when available
    pub fn load(&mut self, source: &ModelSource) -> Result<Arc<ModelArtifact>> {
        if let Some(artifact) = self.cache.get(source) {
            log::debug!("Using cached model for {}", source);
            return Ok(Arc::clone(artifact));
        }

        let name = source.to_string();
        let bytes = match source {
            ModelSource::Path(path) => {
                std::fs::read(path).map_err(|e| RateError::model_load(&name, e))?
            }
            ModelSource::Url(url) => fetch(url)?,
        };

        let artifact = Arc::new(ModelArtifact::from_json_slice(&bytes, &name)?);
        log::info!(
            "Loaded model from {} ({} features)",
            name,
            artifact.expected_features().len()
        );
        self.cache.insert(source.clone(), Arc::clone(&artifact));
        Ok(artifact)
    }

    pub fn is_cached(&self, source: &ModelSource) -> bool {
        self.cache.contains_key(source)
    }
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    log::info!("Downloading model from {}", url);
    let response = reqwest::blocking::get(url).map_err(|e| RateError::model_load(url, e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(RateError::model_load(url, format!("HTTP status {}", status)));
    }
    let bytes = response.bytes().map_err(|e| RateError::model_load(url, e))?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ARTIFACT: &str = r#"{"model": {"kind": "linear", "feature_names": ["x"], "intercept": 0.0, "coefficients": [1.0]}}"#;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            ModelSource::parse("https://example.com/model.json"),
            ModelSource::Url("https://example.com/model.json".into())
        );
        assert_eq!(
            ModelSource::parse("data/model.json"),
            ModelSource::Path(PathBuf::from("data/model.json"))
        );
    }

    #[test]
    fn test_load_caches_by_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(ARTIFACT.as_bytes())
            .unwrap();

        let source = ModelSource::Path(path.clone());
        let mut store = ModelStore::new();
        let first = store.load(&source).unwrap();
        assert!(store.is_cached(&source));

        // A cached source survives the file disappearing
        std::fs::remove_file(&path).unwrap();
        let second = store.load(&source).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_file_is_model_load_error() {
        let mut store = ModelStore::new();
        let result = store.load(&ModelSource::parse("/nonexistent/model.json"));
        assert!(matches!(result, Err(RateError::ModelLoad { .. })));
    }
}
