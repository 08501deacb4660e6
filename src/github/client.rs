use crate::config::Config;
use crate::error::{OrgscopeError, Result};
use crate::github::types::{Contributor, RateLimitResponse, RateWindow, Repository};
use reqwest::{header, Client};
use std::time::Duration;

const USER_AGENT: &str = concat!("orgscope/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = &config.github_token {
            if !token.is_empty() {
                let value = header::HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| OrgscopeError::Config(format!("invalid github token: {e}")))?;
                headers.insert(header::AUTHORIZATION, value);
            }
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Single GET of an absolute URL. A non-success status is an error the
    /// caller sees, not a dropped response.
    async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrgscopeError::Api {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn list_org_repos(&self, org: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/orgs/{org}/repos", self.api_url);
        self.get_json(&url).await
    }

    /// The contributors endpoint comes verbatim from the repository record,
    /// so this takes the full URL rather than building one.
    pub async fn fetch_contributors(&self, contributors_url: &str) -> Result<Vec<Contributor>> {
        self.get_json(contributors_url).await
    }

    pub async fn rate_limit(&self) -> Result<RateWindow> {
        let url = format!("{}/rate_limit", self.api_url);
        let response: RateLimitResponse = self.get_json(&url).await?;
        Ok(response.rate)
    }
}
