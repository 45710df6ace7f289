use std::time::Duration;

use anyhow::Context;

/// Connection settings consumed by the user store and its liveness loop.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub reconnect_interval_secs: u64,
    pub conn_check: bool,
    pub reconnect_tries: u32,
}

impl DbConfig {
    /// Never zero; tokio intervals reject a zero period.
    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_secs(self.reconnect_interval_secs.max(1))
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db: DbConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let db = DbConfig {
            url,
            reconnect_interval_secs: parse_or(&lookup, "RECONN_TIME", 5)?,
            conn_check: parse_or(&lookup, "CONN_CHECK", true)?,
            reconnect_tries: parse_or(&lookup, "RECONN_TRIES", 5)?,
        };
        Ok(Self {
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "APP_PORT", 8080)?,
            db,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")]))
            .expect("config should load");
        assert_eq!(cfg.db.url, "postgres://x");
        assert_eq!(cfg.db.reconnect_interval_secs, 5);
        assert!(cfg.db.conn_check);
        assert_eq!(cfg.db.reconnect_tries, 5);
        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://y"),
            ("RECONN_TIME", "2"),
            ("CONN_CHECK", "false"),
            ("RECONN_TRIES", "9"),
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "9000"),
        ]))
        .expect("config should load");
        assert_eq!(cfg.db.reconnect_interval(), Duration::from_secs(2));
        assert!(!cfg.db.conn_check);
        assert_eq!(cfg.db.reconnect_tries, 9);
        assert_eq!(cfg.listen_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn zero_interval_is_clamped() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("RECONN_TIME", "0"),
        ]))
        .expect("config should load");
        assert_eq!(cfg.db.reconnect_interval(), Duration::from_secs(1));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("RECONN_TRIES", "many"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("RECONN_TRIES"));
    }
}
