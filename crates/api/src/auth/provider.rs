//! HTTP implementation of the identity provider seam.

use std::time::Duration;

use coauthor_core::identity::{Identity, IdentityError, IdentityProvider};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::IdentityConfig;

/// Identity provider client speaking the provider's REST API.
///
/// Endpoints consumed:
///
/// ```text
/// POST {base}/v1/tokens/verify   { "token": ... }  -> Identity
/// GET  {base}/v1/users/{uid}                       -> Identity
/// POST {base}/v1/users/lookup    { "ids": [...] }  -> { "users": [Identity] }
/// ```
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct VerifyTokenRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    users: Vec<Identity>,
}

impl HttpIdentityProvider {
    /// Build a client from configuration. The request timeout bounds every
    /// provider call so a hung provider cannot stall a request forever.
    pub fn new(config: &IdentityConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }
        builder
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify_token(&self, token: &str) -> Result<Identity, IdentityError> {
        let response = self
            .request(reqwest::Method::POST, "/v1/tokens/verify")
            .json(&VerifyTokenRequest { token })
            .send()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                IdentityError::InvalidCredential("token rejected by provider".into()),
            ),
            status if status.is_success() => response
                .json::<Identity>()
                .await
                .map_err(|e| IdentityError::Provider(e.to_string())),
            status => Err(IdentityError::Provider(format!(
                "unexpected status {status} verifying token"
            ))),
        }
    }

    async fn get_identity(&self, uid: &str) -> Result<Identity, IdentityError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/v1/users/{uid}"))
            .send()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(IdentityError::NotFound(uid.to_string())),
            status if status.is_success() => response
                .json::<Identity>()
                .await
                .map_err(|e| IdentityError::Provider(e.to_string())),
            status => Err(IdentityError::Provider(format!(
                "unexpected status {status} fetching identity {uid}"
            ))),
        }
    }

    async fn get_identities(&self, uids: &[String]) -> Result<Vec<Identity>, IdentityError> {
        if uids.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .request(reqwest::Method::POST, "/v1/users/lookup")
            .json(&LookupRequest { ids: uids })
            .send()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityError::Provider(format!(
                "unexpected status {} from batch lookup",
                response.status()
            )));
        }

        // The provider omits ids it cannot resolve; that is also our
        // contract, so the body passes through unfiltered.
        let body = response
            .json::<LookupResponse>()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;
        Ok(body.users)
    }
}
