//! GitHub review API client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::json;

use neon_diff_core::api::{ApiResponse, PrComment, PullRequestContext, ReviewApi};
use neon_diff_core::error::{DiffError, Result};

use super::{decode, transport_error, REQUEST_TIMEOUT, USER_AGENT};

const GITHUB_API: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

/// Client for the GitHub issues/review-comment API.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    /// Creates a client authenticating with `token`.
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|err| DiffError::Transport(err.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| transport_error(&err))?;

        Ok(Self {
            http,
            base_url: GITHUB_API.to_string(),
        })
    }
}

#[async_trait]
impl ReviewApi for GitHubClient {
    async fn list_comments(
        &self,
        pr: &PullRequestContext,
    ) -> Result<ApiResponse<Vec<PrComment>>> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url, pr.owner, pr.repo, pr.number
        );
        let response = self
            .http
            .get(url)
            .query(&[("per_page", "100")])
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        decode(response).await
    }

    async fn update_comment(
        &self,
        pr: &PullRequestContext,
        comment_id: u64,
        body: &str,
    ) -> Result<ApiResponse<PrComment>> {
        let url = format!(
            "{}/repos/{}/{}/issues/comments/{comment_id}",
            self.base_url, pr.owner, pr.repo
        );
        let response = self
            .http
            .patch(url)
            .json(&json!({ "body": body }))
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        decode(response).await
    }

    async fn create_comment(
        &self,
        pr: &PullRequestContext,
        body: &str,
    ) -> Result<ApiResponse<PrComment>> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url, pr.owner, pr.repo, pr.number
        );
        let response = self
            .http
            .post(url)
            .json(&json!({ "body": body }))
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        decode(response).await
    }
}
