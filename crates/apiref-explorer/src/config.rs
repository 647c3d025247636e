//! Explorer configuration
//!
//! One struct covers what the reference pages used to receive as page
//! globals: the product, the context path the backend is mounted under,
//! and the operating mode. Loaded from a JSON file or built via
//! `Default`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ExplorerError;

/// A sibling product the explorer cross-links to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelatedProduct {
    /// Product identifier, e.g. `highstock`.
    pub product: String,
    /// Base URL of that product's reference.
    pub base: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Product identifier, e.g. `highcharts`.
    pub product: String,
    /// Path segment between the domain and the product, empty when the
    /// backend is mounted at the root.
    pub context: String,
    /// Live backend root (scheme, host, context), required unless
    /// `offline` is set.
    pub base_url: Option<String>,
    /// Bundled dump file for offline mode.
    pub dump_path: Option<PathBuf>,
    /// Serve everything from the dump instead of the live backend.
    pub offline: bool,
    /// Whether a structured history backend is available; otherwise the
    /// fragment fallback is used.
    pub history_api: bool,
    /// Class names linkified inside return types.
    pub linkable_types: Vec<String>,
    /// Sibling products for cross-product link rewriting.
    pub related_products: Vec<RelatedProduct>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            product: "highcharts".to_string(),
            context: String::new(),
            base_url: None,
            dump_path: None,
            offline: false,
            history_api: true,
            linkable_types: [
                "Axis",
                "Chart",
                "Element",
                "Highcharts",
                "Point",
                "Renderer",
                "Series",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            related_products: Vec::new(),
        }
    }
}

impl ExplorerConfig {
    /// Load a config file.
    pub fn from_file(path: &Path) -> Result<Self, ExplorerError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ExplorerError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw).map_err(|e| ExplorerError::Config(e.to_string()))
    }

    /// Path between the domain and the member, e.g. `ref/highcharts/`.
    pub fn base_path(&self) -> String {
        let context = self.context.trim_matches('/');
        if context.is_empty() {
            format!("{}/", self.product)
        } else {
            format!("{context}/{}/", self.product)
        }
    }

    /// Product name with a capitalized first letter, for page titles.
    pub fn product_title(&self) -> String {
        let mut chars = self.product.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}
