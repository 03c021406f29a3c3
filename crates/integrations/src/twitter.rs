//! Client for the X (Twitter) v2 recent-search endpoint.

use serde::{Deserialize, Serialize};

use crate::error::IntegrationError;
use crate::http::{env_opt, parse_response};

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";
pub const MIN_RESULTS: u32 = 10;
pub const MAX_RESULTS: u32 = 100;

#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub bearer_token: Option<String>,
    pub base_url: String,
}

impl TwitterConfig {
    /// Load from `TWITTER_BEARER_TOKEN` and `TWITTER_BASE_URL`.
    pub fn from_env() -> Self {
        Self {
            bearer_token: env_opt("TWITTER_BEARER_TOKEN"),
            base_url: env_opt("TWITTER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: Option<String>,
    pub public_metrics: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TweetAuthor {
    pub id: String,
    pub name: String,
    pub username: String,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<TweetAuthor>,
}

/// Raw recent-search response.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Tweet>,
    #[serde(default)]
    pub includes: Includes,
}

/// A tweet with its author resolved.
#[derive(Debug, Clone, Serialize)]
pub struct TrendTweet {
    pub id: String,
    pub text: String,
    pub created_at: Option<String>,
    pub public_metrics: Option<serde_json::Value>,
    pub author: Option<TweetAuthor>,
}

#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: reqwest::Client,
    config: TwitterConfig,
}

impl TwitterClient {
    pub fn new(config: TwitterConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: TwitterConfig) -> Self {
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.bearer_token.is_some()
    }

    /// Search tweets from the last seven days.
    ///
    /// `max_results` is clamped to the API's 10..=100 range.
    pub async fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<TrendTweet>, IntegrationError> {
        let token = self
            .config
            .bearer_token
            .as_deref()
            .ok_or(IntegrationError::MissingApiKey("TWITTER_BEARER_TOKEN"))?;

        let url = format!(
            "{}/2/tweets/search/recent",
            self.config.base_url.trim_end_matches('/')
        );
        let max_results = clamp_max_results(max_results).to_string();

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("query", query),
                ("max_results", max_results.as_str()),
                ("expansions", "author_id"),
                ("tweet.fields", "created_at,public_metrics,author_id"),
                ("user.fields", "name,username,profile_image_url"),
            ])
            .send()
            .await?;

        let parsed: SearchResponse = parse_response(response).await?;
        Ok(join_authors(parsed))
    }
}

pub fn clamp_max_results(requested: u32) -> u32 {
    requested.clamp(MIN_RESULTS, MAX_RESULTS)
}

/// Attach each tweet's author from `includes.users`, matched by id.
pub fn join_authors(response: SearchResponse) -> Vec<TrendTweet> {
    let users = response.includes.users;
    response
        .data
        .into_iter()
        .map(|tweet| {
            let author = tweet
                .author_id
                .as_deref()
                .and_then(|id| users.iter().find(|u| u.id == id))
                .cloned();
            TrendTweet {
                id: tweet.id,
                text: tweet.text,
                created_at: tweet.created_at,
                public_metrics: tweet.public_metrics,
                author,
            }
        })
        .collect()
}
