use serde::Deserialize;

/// One entry of the `/orgs/{org}/repos` response. Fields are kept exactly
/// as the API returns them; nothing is rewritten locally.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub forks: u64,
    pub updated_at: String,
    pub contributors_url: String,
}

/// One entry of a repository's `contributors_url` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub avatar_url: String,
    pub contributions: u64,
}

/// Envelope of the `/rate_limit` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitResponse {
    pub rate: RateWindow,
}

/// Core quota numbers: `reset` is epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RateWindow {
    pub limit: u32,
    pub remaining: u32,
    pub reset: i64,
}
