//! Service endpoints and the deployment environment that selects them.

use core::convert::Infallible;
use strum::{Display, EnumString};
use url::Url;

/// The corp-check deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Dev,
    Stage,
    #[default]
    Prod,
}

impl Environment {
    /// Parse an environment name, falling back to production for anything unrecognized.
    pub fn parse_lenient(value: &str) -> Result<Self, Infallible> {
        Ok(value.trim().parse().unwrap_or_default())
    }

    #[must_use]
    pub const fn api_endpoint(self) -> &'static str {
        match self {
            Self::Dev => "https://api.corp-check.dev.corpjs.com",
            Self::Stage => "https://api.corp-check.stage.corpjs.com",
            Self::Prod => "https://api.corp-check.corpjs.com",
        }
    }

    #[must_use]
    pub const fn web_endpoint(self) -> &'static str {
        match self {
            Self::Dev => "https://corp-check.dev.corpjs.com",
            Self::Stage => "https://corp-check.stage.corpjs.com",
            Self::Prod => "https://corp-check.corpjs.com",
        }
    }
}

/// Where to send API requests and where to point users for detailed results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api: Url,
    pub web: String,
}

impl Endpoints {
    /// Endpoints of `environment`, with the API root optionally replaced.
    #[must_use]
    pub fn new(environment: Environment, api_override: Option<Url>) -> Self {
        let api = api_override.unwrap_or_else(|| {
            Url::parse(environment.api_endpoint()).expect("built-in API endpoints are valid URLs")
        });

        Self {
            api,
            web: environment.web_endpoint().to_string(),
        }
    }

    /// Link to the web page showing the full result of a validation.
    #[must_use]
    pub fn result_page(&self, cid: &str) -> String {
        format!("{}/result?cid={cid}", self.web.trim_end_matches('/'))
    }
}
