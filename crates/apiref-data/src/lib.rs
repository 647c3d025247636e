//! apiref Data - Listing sources
//!
//! The five-endpoint contract the reference backend exposes, a live HTTP
//! implementation of it, and the offline source that serves the same
//! shapes from a bundled dump.

mod http;
mod offline;

pub use http::HttpSource;
pub use offline::{OfflineSource, ProductDump};

use apiref_model::{Member, MemberPath, Namespace};

/// Data layer error.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {status} for {path}")]
    Status { status: u16, path: String },

    #[error("invalid listing payload: {0}")]
    Decode(String),

    #[error("unexpected payload shape: {0}")]
    Shape(String),

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("dump error: {0}")]
    Dump(String),
}

/// One backend listing endpoint.
///
/// `path()` yields the request path relative to the configured context,
/// matching the live API routes byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Flat list of wire names, the autocomplete source.
    Names,
    /// First-level option members.
    MainOptions,
    /// First-level object members.
    MainObjects,
    /// Children of one option member (canonical wire name).
    ChildOptions { name: String },
    /// Children of one object member (canonical wire name).
    ChildObjects { name: String },
}

impl Endpoint {
    /// Request path for `product`, relative to the context root.
    pub fn path(&self, product: &str) -> String {
        match self {
            Endpoint::Names => format!("{product}/names"),
            Endpoint::MainOptions => format!("option/{product}/main"),
            Endpoint::MainObjects => format!("object/{product}-obj/main"),
            Endpoint::ChildOptions { name } => format!("option/{product}/child/{name}"),
            Endpoint::ChildObjects { name } => format!("object/{product}-obj/child/{name}"),
        }
    }

    /// The child-listing endpoint for a member, picked by namespace.
    pub fn children_of(path: &MemberPath) -> Self {
        let name = path.wire();
        match path.namespace() {
            Namespace::Option => Endpoint::ChildOptions { name },
            Namespace::Object => Endpoint::ChildObjects { name },
        }
    }
}

/// What an endpoint returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `Names` yields wire names.
    Names(Vec<String>),
    /// Every other endpoint yields member records.
    Members(Vec<Member>),
}

/// A provider of listing data.
///
/// Implementations are side-effect free per call; the fetch-once
/// guarantee lives in the tree loader, not here.
pub trait ApiSource {
    fn fetch(&self, endpoint: &Endpoint) -> Result<Payload, DataError>;

    /// Typed helper for the names list.
    fn fetch_names(&self) -> Result<Vec<String>, DataError> {
        match self.fetch(&Endpoint::Names)? {
            Payload::Names(names) => Ok(names),
            Payload::Members(_) => Err(DataError::Shape(
                "names endpoint returned member records".to_string(),
            )),
        }
    }

    /// Typed helper for member listings.
    fn fetch_members(&self, endpoint: &Endpoint) -> Result<Vec<Member>, DataError> {
        match self.fetch(endpoint)? {
            Payload::Members(members) => Ok(members),
            Payload::Names(_) => Err(DataError::Shape(
                "member endpoint returned a name list".to_string(),
            )),
        }
    }
}
