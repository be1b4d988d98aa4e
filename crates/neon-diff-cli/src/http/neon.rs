//! Neon control-plane API client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use neon_diff_core::api::{ApiResponse, BranchListing, ControlPlaneApi, SchemaRequest};
use neon_diff_core::branch::SchemaSnapshot;
use neon_diff_core::error::{DiffError, Result};

use super::{decode, transport_error, REQUEST_TIMEOUT, USER_AGENT};

/// Client for the Neon control-plane API.
pub struct NeonClient {
    http: reqwest::Client,
    base_url: String,
}

impl NeonClient {
    /// Creates a client targeting `api_host`, authenticating with `api_key`.
    pub fn new(api_host: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
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
            base_url: api_host.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ControlPlaneApi for NeonClient {
    async fn list_project_branches(
        &self,
        project_id: &str,
    ) -> Result<ApiResponse<BranchListing>> {
        let url = format!("{}/projects/{project_id}/branches", self.base_url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        decode(response).await
    }

    async fn get_branch_schema(
        &self,
        request: SchemaRequest<'_>,
    ) -> Result<ApiResponse<SchemaSnapshot>> {
        let url = format!(
            "{}/projects/{}/branches/{}/schema",
            self.base_url, request.project_id, request.branch_id
        );
        let response = self
            .http
            .get(url)
            .query(&[("role", request.role), ("db_name", request.db_name)])
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_on_the_host_is_normalized() {
        let client = NeonClient::new("https://console.neon.tech/api/v2/", "key").unwrap();
        assert_eq!(client.base_url, "https://console.neon.tech/api/v2");
    }
}
