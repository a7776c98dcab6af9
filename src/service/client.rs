use super::poller::StatusSource;
use crate::model::{StatusResponse, SubmitResponse, ValidationRequest};
use anyhow::{Context, Result, anyhow};
use url::Url;

/// Log target for the service client
const LOG_TARGET: &str = "service";

/// HTTP client for the corp-check API.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    api: Url,
}

impl ServiceClient {
    /// Create a client for the API rooted at `api`.
    pub fn new(api: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("creating the HTTP client")?;

        Ok(Self { http, api })
    }

    /// Submit a package for validation, returning the correlation id to poll with.
    pub async fn submit(&self, request: &ValidationRequest) -> Result<SubmitResponse> {
        let url = self.endpoint("validation")?;
        log::info!(target: LOG_TARGET, "POST {url}");
        log::debug!(
            target: LOG_TARGET,
            "Validation request: {}",
            serde_json::to_string_pretty(request).unwrap_or_default()
        );

        let response: SubmitResponse = self
            .http
            .post(url.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("submitting the package to {url}"))?
            .error_for_status()
            .with_context(|| format!("submitting the package to {url}"))?
            .json()
            .await
            .with_context(|| format!("decoding the submission response from {url}"))?;

        log::debug!(target: LOG_TARGET, "Validation submitted with cid '{}'", response.cid);
        Ok(response)
    }

    /// Fetch the current state of the validation identified by `cid`.
    pub async fn get_status(&self, cid: &str) -> Result<StatusResponse> {
        let mut url = self.endpoint("package")?;
        let _ = url.query_pairs_mut().append_pair("cid", cid);
        log::info!(target: LOG_TARGET, "GET {url}");

        let response: StatusResponse = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("fetching the validation status for cid '{cid}'"))?
            .error_for_status()
            .with_context(|| format!("fetching the validation status for cid '{cid}'"))?
            .json()
            .await
            .with_context(|| format!("decoding the validation status for cid '{cid}'"))?;

        log::debug!(target: LOG_TARGET, "Status for cid '{cid}': {response:?}");
        Ok(response)
    }

    /// Append `segment` to the API path, keeping any prefix the API root already has.
    fn endpoint(&self, segment: &str) -> Result<Url> {
        let mut url = self.api.clone();
        let _ = url
            .path_segments_mut()
            .map_err(|()| anyhow!("API endpoint '{}' cannot be used as a base URL", self.api))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }
}

impl StatusSource for ServiceClient {
    async fn fetch_status(&self, cid: &str) -> Result<StatusResponse> {
        self.get_status(cid).await
    }
}
