use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use sharescope_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Settings needed to reach Postgres. Loaded on its own so `migrate` runs
/// without the Graph and admin settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub migrate_only: bool,
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct GraphRuntimeConfig {
    pub base_url: Url,
    pub authority_url: Url,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub admin_api_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub revoke_log_source: Option<String>,
    pub graph: GraphRuntimeConfig,
}

impl DatabaseConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            migrate_only,
            url: required_env(&lookup, "DATABASE_URL")?,
            max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|value| value.parse::<u32>().ok())
                .filter(|value| *value > 0)
                .unwrap_or(10),
        })
    }
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let admin_api_token = required_non_empty_env(&lookup, "ADMIN_API_TOKEN")?;
        if admin_api_token.len() < 32 {
            return Err(AppError::Validation(
                "ADMIN_API_TOKEN must be at least 32 characters".to_owned(),
            ));
        }

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = lookup("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let revoke_log_source = lookup("REVOKE_LOG_SOURCE")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let graph = GraphRuntimeConfig {
            base_url: url_env(&lookup, "GRAPH_BASE_URL", "https://graph.microsoft.com/v1.0")?,
            authority_url: url_env(
                &lookup,
                "GRAPH_AUTHORITY_URL",
                "https://login.microsoftonline.com",
            )?,
            tenant_id: required_non_empty_env(&lookup, "GRAPH_TENANT_ID")?,
            client_id: required_non_empty_env(&lookup, "GRAPH_CLIENT_ID")?,
            client_secret: required_non_empty_env(&lookup, "GRAPH_CLIENT_SECRET")?,
            timeout: Duration::from_secs(
                lookup("GRAPH_TIMEOUT_SECONDS")
                    .and_then(|value| value.parse::<u64>().ok())
                    .filter(|value| *value > 0)
                    .unwrap_or(20),
            ),
        };

        Ok(Self {
            frontend_url,
            admin_api_token,
            api_host,
            api_port,
            revoke_log_source,
            graph,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, AppError> {
    lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = required_env(lookup, name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn url_env(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> Result<Url, AppError> {
    let value = lookup(name)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned());

    let url = Url::parse(value.trim())
        .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "{name} must be an absolute http(s) URL"
        )));
    }

    Ok(url)
}
