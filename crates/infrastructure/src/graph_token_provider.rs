use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use sharescope_core::{AppError, AppResult};

const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Source of bearer tokens for directory service calls.
#[async_trait]
pub trait GraphTokenSource: Send + Sync {
    /// Returns a currently valid access token.
    async fn access_token(&self) -> AppResult<String>;
}

/// App-only credentials for the OAuth2 client credentials grant.
#[derive(Debug, Clone)]
pub struct ClientCredentialsConfig {
    /// Authority host, for example `https://login.microsoftonline.com`.
    pub authority_url: Url,
    /// Directory tenant identifier.
    pub tenant_id: String,
    /// Application (client) identifier.
    pub client_id: String,
    /// Application secret.
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    access_token: String,
    refresh_after: Instant,
}

/// Token source using the client credentials grant, cached until shortly
/// before expiry.
pub struct ClientCredentialsTokenProvider {
    http_client: reqwest::Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsTokenProvider {
    /// Creates a provider for the given tenant application.
    pub fn new(http_client: reqwest::Client, config: ClientCredentialsConfig) -> AppResult<Self> {
        let mut token_url = config.authority_url;
        token_url
            .path_segments_mut()
            .map_err(|()| AppError::Validation("authority URL cannot be a base".to_owned()))?
            .pop_if_empty()
            .extend([config.tenant_id.as_str(), "oauth2", "v2.0", "token"]);

        Ok(Self {
            http_client,
            token_url,
            client_id: config.client_id,
            client_secret: config.client_secret,
            cached: Mutex::new(None),
        })
    }

    async fn request_token(&self) -> AppResult<TokenResponse> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("client_id", self.client_id.as_str())
            .append_pair("client_secret", self.client_secret.as_str())
            .append_pair("scope", GRAPH_DEFAULT_SCOPE)
            .finish();

        let response = self
            .http_client
            .post(self.token_url.clone())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await
            .map_err(|error| AppError::Upstream(format!("token request failed: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(AppError::Upstream(format!(
                "token request failed with status {status}: {body}"
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|error| AppError::Upstream(format!("invalid token response: {error}")))
    }
}

#[async_trait]
impl GraphTokenSource for ClientCredentialsTokenProvider {
    async fn access_token(&self) -> AppResult<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_after {
                return Ok(token.access_token.clone());
            }
        }

        let response = self.request_token().await?;
        debug!(
            expires_in = response.expires_in,
            "acquired graph access token"
        );
        let lifetime =
            Duration::from_secs(response.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        *cached = Some(CachedToken {
            access_token: response.access_token.clone(),
            refresh_after: Instant::now() + lifetime,
        });

        Ok(response.access_token)
    }
}
