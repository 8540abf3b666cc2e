//! Application configuration from the environment.
//!
//! Connection parameters come from environment variables, optionally
//! seeded from a `.env` file during local development. A missing
//! required variable is fatal at startup and surfaced with a clear
//! message naming the variable.

use secrecy::SecretString;

use geniechat_types::error::ConfigError;

/// Workspace base URL, e.g. `https://myshard.cloud.databricks.com`.
pub const ENV_HOST: &str = "DATABRICKS_HOST";
/// Workspace personal access token.
pub const ENV_TOKEN: &str = "DATABRICKS_TOKEN";
/// SQL warehouse HTTP path, e.g. `/sql/1.0/warehouses/abc123`.
pub const ENV_DBSQL_HTTP_PATH: &str = "GENIECHAT_DBSQL_HTTP_PATH";
/// Genie space to converse with.
pub const ENV_GENIE_SPACE_ID: &str = "GENIECHAT_GENIE_SPACE_ID";
/// Catalog for SQL queries. Optional, defaults to `main`.
pub const ENV_CATALOG: &str = "GENIECHAT_CATALOG";

/// Connection parameters for the Databricks workspace.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Workspace base URL with scheme, no trailing slash.
    pub host: String,
    /// Personal access token; never logged or shown in Debug output.
    pub token: SecretString,
    pub dbsql_http_path: String,
    pub genie_space_id: String,
    pub catalog: String,
}

impl AppConfig {
    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Kept separate from [`AppConfig::from_env`] so tests can inject
    /// a map instead of mutating the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnv(name.to_string()))
        };

        Ok(Self {
            host: normalize_host(&require(ENV_HOST)?),
            token: SecretString::from(require(ENV_TOKEN)?),
            dbsql_http_path: require(ENV_DBSQL_HTTP_PATH)?,
            genie_space_id: require(ENV_GENIE_SPACE_ID)?,
            catalog: lookup(ENV_CATALOG).unwrap_or_else(|| "main".to_string()),
        })
    }

    /// Load configuration from the process environment, seeding it
    /// from a `.env` file when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenv::dotenv() {
            Ok(path) => tracing::info!("loaded environment variables from {}", path.display()),
            Err(_) => tracing::debug!("no .env file found, using the process environment"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Warehouse id embedded in the SQL endpoint path (its last segment).
    pub fn warehouse_id(&self) -> Result<&str, ConfigError> {
        self.dbsql_http_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| ConfigError::InvalidHttpPath(self.dbsql_http_path.clone()))
    }
}

/// Ensure the host carries a scheme and no trailing slash.
fn normalize_host(host: &str) -> String {
    let trimmed = host.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
