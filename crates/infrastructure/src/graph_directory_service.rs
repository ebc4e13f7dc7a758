use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use sharescope_application::DirectoryService;
use sharescope_core::{AppError, AppResult};
use sharescope_domain::{GrantKey, ItemReference, PermissionGrant, SharingLink};

use crate::GraphTokenSource;

/// Microsoft Graph implementation of the directory service port.
///
/// The timeout configured on the supplied HTTP client bounds every call.
pub struct GraphDirectoryService {
    http_client: reqwest::Client,
    base_url: Url,
    token_source: Arc<dyn GraphTokenSource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphPermission {
    #[serde(default)]
    roles: Vec<String>,
    link: Option<GraphSharingLink>,
    inherited_from: Option<GraphItemReference>,
    expiration_date_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphSharingLink {
    scope: Option<String>,
    #[serde(rename = "type")]
    link_type: Option<String>,
    web_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphItemReference {
    drive_id: Option<String>,
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl GraphDirectoryService {
    /// Creates a Graph client rooted at `base_url`, for example
    /// `https://graph.microsoft.com/v1.0`.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: Url,
        token_source: Arc<dyn GraphTokenSource>,
    ) -> Self {
        Self {
            http_client,
            base_url,
            token_source,
        }
    }

    fn permission_url(&self, key: &GrantKey) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Internal("graph base URL cannot be a base".to_owned()))?
            .pop_if_empty()
            .extend([
                "drives",
                key.drive_id(),
                "items",
                key.item_id(),
                "permissions",
                key.permission_id(),
            ]);
        Ok(url)
    }

    async fn send(
        &self,
        method: reqwest::Method,
        key: &GrantKey,
        operation: &str,
    ) -> AppResult<reqwest::Response> {
        let url = self.permission_url(key)?;
        let token = self.token_source.access_token().await?;

        let response = self
            .http_client
            .request(method, url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    AppError::Upstream(format!("graph {operation} timed out"))
                } else {
                    AppError::Upstream(format!("graph {operation} transport error: {error}"))
                }
            })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = graph_error_message(status, body.as_str());

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(message));
        }

        Err(AppError::Upstream(message))
    }
}

#[async_trait]
impl DirectoryService for GraphDirectoryService {
    async fn get_permission(&self, key: &GrantKey) -> AppResult<PermissionGrant> {
        let response = self
            .send(reqwest::Method::GET, key, "get permission")
            .await?;
        let permission = response.json::<GraphPermission>().await.map_err(|error| {
            AppError::Upstream(format!("graph returned an invalid permission payload: {error}"))
        })?;

        Ok(permission_grant_from_graph(key.clone(), permission))
    }

    async fn delete_permission(&self, key: &GrantKey) -> AppResult<()> {
        self.send(reqwest::Method::DELETE, key, "delete permission")
            .await?;
        Ok(())
    }
}

fn permission_grant_from_graph(key: GrantKey, permission: GraphPermission) -> PermissionGrant {
    let expiration = permission.expiration_date_time;

    PermissionGrant {
        key,
        roles: permission.roles,
        link: permission.link.map(|link| SharingLink {
            scope: link.scope,
            link_type: link.link_type,
            web_url: link.web_url,
            expiration,
        }),
        inherited_from: permission.inherited_from.map(|reference| ItemReference {
            drive_id: reference.drive_id,
            item_id: reference.id,
        }),
    }
}

fn graph_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let envelope = serde_json::from_str::<GraphErrorEnvelope>(body).ok();

    match envelope.map(|envelope| (envelope.error.code, envelope.error.message)) {
        Some((Some(code), Some(message))) => format!("{code}: {message}"),
        Some((_, Some(message))) => message,
        _ if body.trim().is_empty() => format!("graph request failed with status {status}"),
        _ => format!("graph request failed with status {status}: {}", body.trim()),
    }
}
