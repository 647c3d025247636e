//! apiref Explorer - Navigation core
//!
//! Ties the model, element tree, data sources and renderer together: the
//! lazy tree loader, the navigation controller, history sync and the
//! bootstrap routine that owns the browsing session.

pub mod app;
pub mod config;
pub mod history;
pub mod nav;
pub mod session;
pub mod tree;

pub use app::Explorer;
pub use config::ExplorerConfig;
pub use history::{HistoryEntry, HistorySync};
pub use session::Session;
pub use tree::ExpandOutcome;

use apiref_data::DataError;

/// Explorer error.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("no tree node for {0}")]
    UnknownNode(String),

    #[error("config error: {0}")]
    Config(String),
}
