use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use std::io::ErrorKind;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Route-level defaults for pagination when the client omits or mangles `limit`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_song_limit")]
    pub default_song_limit: u64,
    #[serde(default = "default_verse_limit")]
    pub default_verse_limit: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { default_song_limit: default_song_limit(), default_verse_limit: default_verse_limit() }
    }
}

fn default_song_limit() -> u64 { 10 }
fn default_verse_limit() -> u64 { 5 }

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Read `path` if it exists. A missing file yields defaults unless `required`;
/// unreadable or malformed files are always errors.
fn load_file_or_default(path: &str, required: bool) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).map_err(|e| anyhow!("invalid config file {path}: {e}")),
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            tracing::debug!(path, "config file absent; using defaults and environment");
            Ok(AppConfig::default())
        }
        Err(e) => Err(anyhow!("cannot read config file {path}: {e}")),
    }
}

impl AppConfig {
    /// Load `CONFIG_PATH` (must exist) or `config.toml` (optional), then apply
    /// environment overrides and validate.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var("CONFIG_PATH") {
            Ok(path) => load_file_or_default(&path, true)?,
            Err(_) => load_file_or_default(DEFAULT_CONFIG_PATH, false)?,
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        // 数据库 URL 可以来自 TOML、DATABASE_URL 或 DB_* 变量
        self.database.normalize_from_env();
        self.database.validate()?;
        self.api.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if !host.trim().is_empty() { self.host = host; }
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if !self.url.trim().is_empty() {
            return;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.url = url;
            return;
        }
        if let Some(url) = url_from_parts(|k| std::env::var(k).ok()) {
            self.url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml, DATABASE_URL or DB_HOST/DB_USER/DB_NAME"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl ApiConfig {
    fn normalize(&mut self) {
        if self.default_song_limit == 0 { self.default_song_limit = default_song_limit(); }
        if self.default_verse_limit == 0 { self.default_verse_limit = default_verse_limit(); }
    }
}

/// Assemble a postgres URL from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`.
/// Host, user and name are required; port defaults to 5432.
fn url_from_parts(get: impl Fn(&str) -> Option<String>) -> Option<String> {
    let host = get("DB_HOST").filter(|v| !v.is_empty())?;
    let user = get("DB_USER").filter(|v| !v.is_empty())?;
    let name = get("DB_NAME").filter(|v| !v.is_empty())?;
    let port = get("DB_PORT").filter(|v| !v.is_empty()).unwrap_or_else(|| "5432".into());
    let auth = match get("DB_PASSWORD").filter(|v| !v.is_empty()) {
        Some(password) => format!("{user}:{password}"),
        None => user,
    };
    Some(format!("postgres://{auth}@{host}:{port}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [database]
            url = "postgres://u:p@localhost:5432/songs"

            [api]
            default_verse_limit = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.api.default_song_limit, 10);
        assert_eq!(cfg.api.default_verse_limit, 3);
    }

    #[test]
    fn validate_rejects_non_postgres_url() {
        let cfg = DatabaseConfig { url: "mysql://localhost/songs".into(), ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_pool_bounds() {
        let cfg = DatabaseConfig {
            url: "postgres://localhost/songs".into(),
            min_connections: 5,
            max_connections: 2,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn url_from_parts_builds_dsn() {
        let vars: HashMap<&str, &str> = [
            ("DB_HOST", "db"),
            ("DB_PORT", "5433"),
            ("DB_USER", "songs"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "library"),
        ]
        .into_iter()
        .collect();
        let url = url_from_parts(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(url.as_deref(), Some("postgres://songs:secret@db:5433/library"));
    }

    #[test]
    fn url_from_parts_requires_host() {
        let url = url_from_parts(|k| (k == "DB_USER" || k == "DB_NAME").then(|| "x".to_string()));
        assert!(url.is_none());
    }

    fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("song_library_{}_{name}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let path = temp_config("malformed", "[server]\nport = \"not a number\"\n[database\nurl=");
        let res = load_file_or_default(path.to_str().unwrap(), false);
        std::fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn valid_config_file_is_read() {
        let path = temp_config("valid", "[server]\nport = 9191\n");
        let cfg = load_file_or_default(path.to_str().unwrap(), true).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.server.port, 9191);
    }

    #[test]
    fn missing_config_file_falls_back_only_when_optional() {
        let path = std::env::temp_dir().join("song_library_does_not_exist.toml");
        let path = path.to_str().unwrap();
        let cfg = load_file_or_default(path, false).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert!(load_file_or_default(path, true).is_err());
    }

    #[test]
    fn api_limits_zero_falls_back() {
        let mut api = ApiConfig { default_song_limit: 0, default_verse_limit: 0 };
        api.normalize();
        assert_eq!(api.default_song_limit, 10);
        assert_eq!(api.default_verse_limit, 5);
    }
}
