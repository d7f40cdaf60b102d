use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub peers: PeersConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// 0 means "use the service's default port".
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: 0, worker_threads: Some(4) }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

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

/// Base URLs of sibling services.
#[derive(Debug, Clone, Deserialize)]
pub struct PeersConfig {
    #[serde(default = "default_auth_url", alias = "auth-service.url")]
    pub auth_service_url: String,
    #[serde(default = "default_catalogo_url", alias = "catalogo-service.url")]
    pub catalogo_service_url: String,
    #[serde(default = "default_animales_url", alias = "animales-service.url")]
    pub animales_service_url: String,
    #[serde(default = "default_peer_timeout")]
    pub timeout_secs: u64,
}

impl Default for PeersConfig {
    fn default() -> Self {
        Self {
            auth_service_url: default_auth_url(),
            catalogo_service_url: default_catalogo_url(),
            animales_service_url: default_animales_url(),
            timeout_secs: default_peer_timeout(),
        }
    }
}

fn default_auth_url() -> String { "http://localhost:8090".into() }
fn default_catalogo_url() -> String { "http://localhost:8091".into() }
fn default_animales_url() -> String { "http://localhost:8093".into() }
fn default_peer_timeout() -> u64 { 5 }

/// Seed data applied at startup when the stores are empty.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_admin_phone")]
    pub admin_phone: String,
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
    /// Directory holding optional seed images (`max.jpg`, `collar.webp`, ...).
    #[serde(default)]
    pub image_dir: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            admin_phone: default_admin_phone(),
            seed_demo_data: true,
            image_dir: None,
        }
    }
}

fn default_admin_email() -> String { "admin@amilimetros.cl".into() }
fn default_admin_password() -> String { "Admin123!".into() }
fn default_admin_phone() -> String { "+56911111111".into() }
fn default_true() -> bool { true }

/// Load `CONFIG_PATH` (default `config.toml`); a missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    match std::fs::metadata(&path) {
        Ok(_) => load_from_file(&path),
        Err(_) => Ok(AppConfig::default()),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env(|k| std::env::var(k).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment overrides; `lookup` is `std::env::var` outside of tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = non_empty("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(p) = non_empty("SERVER_PORT").and_then(|v| v.trim().parse().ok()) {
            self.server.port = p;
        }
        if let Some(w) = non_empty("TOKIO_WORKER_THREADS").and_then(|v| v.trim().parse().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(v) = non_empty("AUTH_SERVICE_URL") {
            self.peers.auth_service_url = v;
        }
        if let Some(v) = non_empty("CATALOGO_SERVICE_URL") {
            self.peers.catalogo_service_url = v;
        }
        if let Some(v) = non_empty("ANIMALES_SERVICE_URL") {
            self.peers.animales_service_url = v;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize();
        self.database.validate()?;
        self.peers.normalize_and_validate()?;
        self.bootstrap.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
    }

    /// Configured port, or `fallback` when none was given.
    pub fn port_or(&self, fallback: u16) -> u16 {
        if self.port == 0 { fallback } else { self.port }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
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

impl PeersConfig {
    fn normalize_and_validate(&mut self) -> Result<()> {
        for (key, url) in [
            ("peers.auth_service_url", &mut self.auth_service_url),
            ("peers.catalogo_service_url", &mut self.catalogo_service_url),
            ("peers.animales_service_url", &mut self.animales_service_url),
        ] {
            let trimmed = url.trim().trim_end_matches('/').to_string();
            let lower = trimmed.to_lowercase();
            if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                return Err(anyhow!("{key} must be an http(s) URL, got {trimmed:?}"));
            }
            *url = trimmed;
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = default_peer_timeout();
        }
        Ok(())
    }
}

impl BootstrapConfig {
    fn validate(&self) -> Result<()> {
        if self.admin_email.trim().is_empty() || self.admin_password.is_empty() {
            return Err(anyhow!("bootstrap.admin_email and bootstrap.admin_password are required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port_or(8093), 8093);
        assert_eq!(cfg.peers.auth_service_url, "http://localhost:8090");
        assert_eq!(cfg.peers.timeout_secs, 5);
        assert_eq!(cfg.bootstrap.admin_email, "admin@amilimetros.cl");
        assert!(cfg.bootstrap.seed_demo_data);
    }

    #[test]
    fn peer_keys_accept_dotted_aliases() {
        let cfg = parse(
            r#"
            [peers]
            "auth-service.url" = "http://auth:8090"
            "catalogo-service.url" = "http://catalogo:8091/"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.peers.auth_service_url, "http://auth:8090");
        assert_eq!(cfg.peers.catalogo_service_url, "http://catalogo:8091/");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = parse(
            r#"
            [server]
            port = 9000
            [database]
            url = "postgres://file/db"
            "#,
        )
        .unwrap();
        cfg.apply_env(env(&[
            ("DATABASE_URL", "postgres://env/db"),
            ("SERVER_PORT", "9100"),
            ("AUTH_SERVICE_URL", "http://auth:1/"),
            ("TOKIO_WORKER_THREADS", "2"),
            ("SERVER_HOST", "  "),
        ]));
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.database.url, "postgres://env/db");
        assert_eq!(cfg.server.port_or(1), 9100);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.peers.auth_service_url, "http://auth:1");
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = AppConfig::default();
        assert!(cfg.normalize_and_validate().is_err());

        cfg.database.url = "mysql://x".into();
        assert!(cfg.normalize_and_validate().is_err());

        cfg.database.url = "postgres://x/db".into();
        cfg.database.min_connections = 5;
        cfg.database.max_connections = 2;
        assert!(cfg.normalize_and_validate().is_err());

        cfg.database.max_connections = 10;
        cfg.peers.animales_service_url = "animales:8093".into();
        assert!(cfg.normalize_and_validate().is_err());

        cfg.peers.animales_service_url = "http://animales:8093".into();
        assert!(cfg.normalize_and_validate().is_ok());
    }
}
