use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `postgres://...` or `memory://`. Empty means not configured.
    pub url: String,
    /// Database name swapped into the connection URL path
    pub namespace: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub list_limit: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub admin_token: Option<String>,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub from: String,
    /// Recipient override; when unset the sender's own address is used
    pub to: Option<String>,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("PORTFOLIO_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Storage overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.storage.url = v;
        }
        if let Ok(v) = env::var("DB_NAME") {
            self.storage.namespace = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.storage.max_connections = v.parse().unwrap_or(self.storage.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.storage.connection_timeout = v.parse().unwrap_or(self.storage.connection_timeout);
        }
        if let Ok(v) = env::var("STORAGE_LIST_LIMIT") {
            self.storage.list_limit = v.parse().unwrap_or(self.storage.list_limit);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("ADMIN_TOKEN") {
            self.security.admin_token = Some(v).filter(|t| !t.is_empty());
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.security.cors_origins = parse_list(&v);
        }

        // Mail overrides
        if let Ok(v) = env::var("RESEND_API_KEY") {
            self.mail.resend_api_key = Some(v).filter(|k| !k.is_empty());
        }
        if let Ok(v) = env::var("RESEND_API_URL") {
            self.mail.resend_api_url = v;
        }
        if let Ok(v) = env::var("RESEND_FROM") {
            self.mail.from = v;
        }
        if let Ok(v) = env::var("RESEND_TO") {
            self.mail.to = Some(v).filter(|t| !t.is_empty());
        }
        if let Ok(v) = env::var("MAIL_TIMEOUT_SECS") {
            self.mail.timeout_secs = v.parse().unwrap_or(self.mail.timeout_secs);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8001,
            },
            storage: StorageConfig {
                url: "memory://".to_string(),
                namespace: "portfolio".to_string(),
                max_connections: 5,
                connection_timeout: 30,
                list_limit: 1000,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                admin_token: None,
                cors_origins: vec!["*".to_string()],
            },
            mail: MailConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8001,
            },
            storage: StorageConfig {
                url: String::new(),
                namespace: "portfolio".to_string(),
                max_connections: 10,
                connection_timeout: 10,
                list_limit: 1000,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                admin_token: None,
                cors_origins: vec!["*".to_string()],
            },
            mail: MailConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8001,
            },
            storage: StorageConfig {
                url: String::new(),
                namespace: "portfolio".to_string(),
                max_connections: 20,
                connection_timeout: 5,
                list_limit: 1000,
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                admin_token: None,
                cors_origins: vec![],
            },
            mail: MailConfig::default(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            resend_api_url: "https://api.resend.com".to_string(),
            from: "Portfolio <noreply@resend.dev>".to_string(),
            to: None,
            timeout_secs: 10,
        }
    }
}

fn parse_list(v: &str) -> Vec<String> {
    v.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
