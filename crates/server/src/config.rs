//! Server configuration loaded from environment variables (and `.env`).
//!
//! | Variable                       | Default                          | Description                              |
//! |--------------------------------|----------------------------------|------------------------------------------|
//! | `SPIRITHUB_HOST`               | `127.0.0.1`                      | Listen address                           |
//! | `SPIRITHUB_PORT`               | `3001`                           | Listen port                              |
//! | `DATABASE_URL`                 | `sqlite://spirithub.db?mode=rwc` | SQLite content database                  |
//! | `SPIRITHUB_LOG_LEVEL`          | `info`                           | tracing filter                           |
//! | `SPIRITHUB_TIME_ZONE`          | `Europe/Bucharest`               | IANA zone used to decide what "today" is |
//! | `SPIRITHUB_CRITICAL_THRESHOLD` | `0.1`                            | \|value\| below which a cycle is critical |
//! | `SPIRITHUB_CACHE_TTL_SECS`     | `3600`                           | Interpretation cache TTL                 |
//! | `SPIRITHUB_CORS_ORIGIN`        | unset (any origin)               | Allowed browser origin                   |

use std::{str::FromStr, time::Duration};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use services::services::biorhythm::DEFAULT_CRITICAL_THRESHOLD;

pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Bucharest;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: String,
    pub time_zone: Tz,
    pub critical_threshold: f64,
    pub cache_ttl_secs: u64,
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, applying defaults where a value is
    /// absent or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let str_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let critical_threshold = parse_var(&lookup, "SPIRITHUB_CRITICAL_THRESHOLD")
            .filter(|t: &f64| *t > 0.0 && *t < 1.0)
            .unwrap_or(DEFAULT_CRITICAL_THRESHOLD);

        Self {
            host: str_or("SPIRITHUB_HOST", "127.0.0.1"),
            port: parse_var(&lookup, "SPIRITHUB_PORT").unwrap_or(3001),
            database_url: str_or("DATABASE_URL", "sqlite://spirithub.db?mode=rwc"),
            log_level: str_or("SPIRITHUB_LOG_LEVEL", "info"),
            time_zone: parse_var(&lookup, "SPIRITHUB_TIME_ZONE").unwrap_or(DEFAULT_TIME_ZONE),
            critical_threshold,
            cache_ttl_secs: parse_var(&lookup, "SPIRITHUB_CACHE_TTL_SECS").unwrap_or(3600),
            cors_origin: lookup("SPIRITHUB_CORS_ORIGIN").filter(|o| !o.trim().is_empty()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Calendar date in the configured time zone
    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }

    pub fn date_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.time_zone).date_naive()
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_are_sane() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:3001");
        assert_eq!(cfg.time_zone, chrono_tz::Europe::Bucharest);
        assert_eq!(cfg.critical_threshold, DEFAULT_CRITICAL_THRESHOLD);
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(3600));
        assert!(cfg.cors_origin.is_none());
    }

    #[test]
    fn overrides_applied() {
        let cfg = config(&[
            ("SPIRITHUB_PORT", "9090"),
            ("SPIRITHUB_CRITICAL_THRESHOLD", "0.05"),
            ("SPIRITHUB_CORS_ORIGIN", "https://spirithub.ro"),
        ]);
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.critical_threshold, 0.05);
        assert_eq!(cfg.cors_origin.as_deref(), Some("https://spirithub.ro"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config(&[
            ("SPIRITHUB_PORT", "not-a-port"),
            ("SPIRITHUB_CRITICAL_THRESHOLD", "2.5"),
            ("SPIRITHUB_TIME_ZONE", "Europe/Atlantis"),
            ("SPIRITHUB_CORS_ORIGIN", " "),
        ]);
        assert_eq!(cfg.port, 3001);
        assert_eq!(cfg.critical_threshold, DEFAULT_CRITICAL_THRESHOLD);
        assert_eq!(cfg.time_zone, DEFAULT_TIME_ZONE);
        assert!(cfg.cors_origin.is_none());
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn date_follows_romanian_summer_time() {
        let cfg = config(&[]);
        // 00:30 EEST (UTC+3)
        assert_eq!(
            cfg.date_at(utc("2026-07-15T21:30:00Z")),
            NaiveDate::from_ymd_opt(2026, 7, 16).unwrap()
        );
        // 23:30 EET (UTC+2)
        assert_eq!(
            cfg.date_at(utc("2026-01-15T21:30:00Z")),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
        );
        // 00:30 EET
        assert_eq!(
            cfg.date_at(utc("2026-01-15T22:30:00Z")),
            NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()
        );
    }

    #[test]
    fn time_zone_is_configurable() {
        let cfg = config(&[("SPIRITHUB_TIME_ZONE", "UTC")]);
        assert_eq!(
            cfg.date_at(utc("2026-07-15T21:30:00Z")),
            NaiveDate::from_ymd_opt(2026, 7, 15).unwrap()
        );
    }
}
