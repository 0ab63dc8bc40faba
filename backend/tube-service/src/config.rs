/// Configuration management for Tube Service
///
/// Everything is read from environment variables (after `.env` is loaded by
/// `main`). Unset or unparsable values fall back to development defaults;
/// production refuses permissive CORS and missing media credentials.
use db_pool::env_utils::{parse_env_optional, parse_env_with_default};
use db_pool::DbConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    /// Overrides the `DB_*` pool sizing when set
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

impl DatabaseConfig {
    /// Pool settings for `service_name`. `DATABASE_MAX_CONNECTIONS` and
    /// `DATABASE_MIN_CONNECTIONS` win over the shared `DB_*` variables.
    pub fn pool_config(&self, service_name: &str) -> DbConfig {
        let mut db_cfg = DbConfig::for_service(service_name, self.url.clone());
        if let Some(max) = self.max_connections {
            db_cfg.max_connections = max;
        }
        if let Some(min) = self.min_connections {
            db_cfg.min_connections = min;
        }
        db_cfg
    }
}

/// Cloudinary-compatible upload endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Base URL; the cloud name and `/auto/upload` are appended
    pub upload_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Destination folder, empty for the account root
    pub folder: String,
    /// Per-file limit enforced while reading multipart bodies
    pub max_upload_bytes: usize,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MediaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaConfig")
            .field("upload_url", &self.upload_url)
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("folder", &self.folder)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_url: "https://api.cloudinary.com/v1_1".to_string(),
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            folder: "tube".to_string(),
            max_upload_bytes: 100 * 1024 * 1024,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// PEM public key for bearer token validation; requests fail with 401
    /// when absent
    pub jwt_public_key_pem: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let cors = {
            let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                Ok(value) => value,
                Err(_) if production => {
                    return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                }
                Err(_) => "http://localhost:3000".to_string(),
            };

            if production && allowed_origins.split(',').any(|o| o.trim() == "*") {
                return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
            }

            CorsConfig { allowed_origins }
        };

        let defaults = MediaConfig::default();
        let media = MediaConfig {
            upload_url: std::env::var("MEDIA_UPLOAD_URL").unwrap_or(defaults.upload_url),
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME").unwrap_or_default(),
            api_key: std::env::var("CLOUDINARY_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("CLOUDINARY_API_SECRET").unwrap_or_default(),
            folder: std::env::var("MEDIA_FOLDER").unwrap_or(defaults.folder),
            max_upload_bytes: parse_env_with_default(
                "MEDIA_MAX_UPLOAD_BYTES",
                defaults.max_upload_bytes,
            ),
            timeout_secs: parse_env_with_default("MEDIA_TIMEOUT_SECS", defaults.timeout_secs),
        };

        if production
            && (media.cloud_name.is_empty()
                || media.api_key.is_empty()
                || media.api_secret.is_empty())
        {
            return Err(
                "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set in production"
                    .to_string(),
            );
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("TUBE_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_with_default("TUBE_SERVICE_PORT", 8000),
                workers: parse_env_with_default("TUBE_SERVICE_WORKERS", 4),
            },
            cors,
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/tube".to_string()),
                max_connections: parse_env_optional("DATABASE_MAX_CONNECTIONS"),
                min_connections: parse_env_optional("DATABASE_MIN_CONNECTIONS"),
                run_migrations: parse_env_with_default("DATABASE_RUN_MIGRATIONS", true),
            },
            media,
            auth: AuthConfig {
                jwt_public_key_pem: crypto_core::jwt::load_validation_key().ok(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: &[&str] = &[
        "APP_ENV",
        "CORS_ALLOWED_ORIGINS",
        "TUBE_SERVICE_PORT",
        "DATABASE_MAX_CONNECTIONS",
        "DATABASE_MIN_CONNECTIONS",
        "DB_MAX_CONNECTIONS",
        "DB_MIN_CONNECTIONS",
        "MEDIA_MAX_UPLOAD_BYTES",
        "CLOUDINARY_CLOUD_NAME",
        "CLOUDINARY_API_KEY",
        "CLOUDINARY_API_SECRET",
    ];

    fn clear() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_default_values() {
        clear();
        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.cors.allowed_origins, "http://localhost:3000");
        assert_eq!(config.database.max_connections, None);
        assert_eq!(config.database.pool_config("tube-service").max_connections, 10);
        assert_eq!(config.media.max_upload_bytes, 100 * 1024 * 1024);
        assert!(!config.app.is_production());
    }

    #[test]
    #[serial_test::serial]
    fn production_rejects_wildcard_cors() {
        clear();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://tube.dev, *");

        let err = Config::from_env().unwrap_err();
        assert!(err.contains("cannot be '*'"));
        clear();
    }

    #[test]
    #[serial_test::serial]
    fn production_requires_media_credentials() {
        clear();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://tube.dev");

        let err = Config::from_env().unwrap_err();
        assert!(err.contains("CLOUDINARY"));
        clear();
    }

    #[test]
    #[serial_test::serial]
    fn invalid_numbers_fall_back() {
        clear();
        std::env::set_var("TUBE_SERVICE_PORT", "eighty");
        assert_eq!(Config::from_env().unwrap().app.port, 8000);
        clear();
    }

    #[test]
    fn cors_origins_are_trimmed() {
        let cors = CorsConfig {
            allowed_origins: " https://a.dev ,https://b.dev,, ".to_string(),
        };
        assert_eq!(cors.origins().collect::<Vec<_>>(), vec!["https://a.dev", "https://b.dev"]);
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let media = MediaConfig {
            api_secret: "hunter2".into(),
            ..MediaConfig::default()
        };
        assert!(!format!("{media:?}").contains("hunter2"));
    }

    #[test]
    #[serial_test::serial]
    fn database_pool_size_overrides_shared_setting() {
        clear();
        std::env::set_var("DB_MAX_CONNECTIONS", "20");
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "3");

        let config = Config::from_env().unwrap();
        let pool = config.database.pool_config("tube-service");
        assert_eq!(pool.max_connections, 3);
        assert_eq!(pool.min_connections, 2);

        std::env::remove_var("DATABASE_MAX_CONNECTIONS");
        let config = Config::from_env().unwrap();
        assert_eq!(config.database.pool_config("tube-service").max_connections, 20);
        clear();
    }
}
