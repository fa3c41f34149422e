use std::env;
use std::path::PathBuf;

/// Process-wide configuration, read from the environment once at startup and
/// passed explicitly to the components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub secret_key: String,
    pub debug: bool,
    /// Hostnames accepted by the server; empty means any host is accepted.
    pub allowed_hosts: Vec<String>,
    pub database_url: String,
    pub bind_addr: String,
    pub language_code: String,
    pub time_zone: String,
    pub media_root: PathBuf,
    pub static_root: PathBuf,
    pub token_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            secret_key: env_or("BLOG_SECRET_KEY", "insecure-dev-key-change-me"),
            debug: is_truthy(&env_or("BLOG_DEBUG", "true")),
            allowed_hosts: split_hosts(&env_or("BLOG_ALLOWED_HOSTS", "")),
            database_url: env_or("DATABASE_URL", "sqlite://blog.db?mode=rwc"),
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000"),
            language_code: env_or("LANGUAGE_CODE", "pt-br"),
            time_zone: env_or("TIME_ZONE", "America/Sao_Paulo"),
            media_root: PathBuf::from(env_or("MEDIA_ROOT", "media")),
            static_root: PathBuf::from(env_or("STATIC_ROOT", "staticfiles")),
            token_ttl_secs: env_or("TOKEN_TTL_SECS", "86400").parse().unwrap_or(86400),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn split_hosts(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{is_truthy, split_hosts};

    #[test]
    fn truthy_flags() {
        for v in ["1", "true", "Yes", "ON", " true "] {
            assert!(is_truthy(v), "{v:?} should be truthy");
        }
        for v in ["0", "false", "no", "off", ""] {
            assert!(!is_truthy(v), "{v:?} should be falsy");
        }
    }

    #[test]
    fn host_list_parsing() {
        assert!(split_hosts("").is_empty());
        assert_eq!(
            split_hosts("example.com, blog.example.com"),
            vec!["example.com", "blog.example.com"]
        );
    }
}
