//! Live HTTP source
//!
//! Blocking client against the reference backend. Requests are issued
//! synchronously; ordering between bootstrap fetches is the caller's
//! concern and falls out of call order here.

use reqwest::blocking::Client;
use url::Url;

use crate::{ApiSource, DataError, Endpoint, Payload};

/// Listing source backed by the live JSON API.
pub struct HttpSource {
    base: Url,
    product: String,
    client: Client,
}

impl HttpSource {
    /// Create a source for `product` under `base` (scheme, host and the
    /// context path, ending in `/`).
    pub fn new(base: &str, product: &str) -> Result<Self, DataError> {
        let base = Url::parse(base).map_err(|e| DataError::InvalidUrl(e.to_string()))?;
        let client = Client::builder()
            .user_agent("apiref/0.1")
            .build()
            .map_err(|e| DataError::Transport(e.to_string()))?;
        Ok(Self {
            base,
            product: product.to_string(),
            client,
        })
    }

    fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url, DataError> {
        self.base
            .join(&endpoint.path(&self.product))
            .map_err(|e| DataError::InvalidUrl(e.to_string()))
    }
}

impl ApiSource for HttpSource {
    fn fetch(&self, endpoint: &Endpoint) -> Result<Payload, DataError> {
        let url = self.endpoint_url(endpoint)?;
        tracing::info!(%url, "GET listing");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| DataError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                path: endpoint.path(&self.product),
            });
        }

        match endpoint {
            Endpoint::Names => {
                let names = response
                    .json()
                    .map_err(|e| DataError::Decode(e.to_string()))?;
                Ok(Payload::Names(names))
            }
            _ => {
                let members = response
                    .json()
                    .map_err(|e| DataError::Decode(e.to_string()))?;
                Ok(Payload::Members(members))
            }
        }
    }
}
