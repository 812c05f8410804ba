//! Environment driven configuration

const DEFAULT_DATABASE_URL: &str = "sqlite://roster.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`
    ///
    /// A `.env` file is loaded first when present. Missing or unparsable
    /// values fall back to defaults with a warning.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self::from_values(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("DATABASE_MAX_CONNECTIONS").ok(),
        )
    }

    /// Single-connection in-memory database
    ///
    /// Every connection to `sqlite::memory:` opens a separate database, so
    /// the pool must never hold more than one.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }

    fn from_values(url: Option<String>, max_connections: Option<String>) -> Self {
        let url = url.unwrap_or_else(|| {
            tracing::warn!("DATABASE_URL not set, using default");
            DEFAULT_DATABASE_URL.to_string()
        });

        let max_connections = match max_connections.as_deref().map(str::parse::<u32>) {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(Ok(n)) if n > 0 => n,
            Some(_) => {
                tracing::warn!(
                    "DATABASE_MAX_CONNECTIONS is not a positive integer, using {}",
                    DEFAULT_MAX_CONNECTIONS
                );
                DEFAULT_MAX_CONNECTIONS
            }
        };

        Self {
            url,
            max_connections,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}
