use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use dotenvy::dotenv;
use strum_macros::{Display, EnumString};

/// How bearer tokens are issued by `/login` and read back by protected routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TokenMode {
    /// The token is the username itself. No signature, no expiry.
    Username,
    /// HS256 JWT carrying the username as `sub`.
    Jwt,
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    pub token_mode: TokenMode,
    pub jwt_secret: Option<String>,
    pub access_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_api_per_min: u32,

    pub api_prefix: String,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup so tests don't have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let token_mode: TokenMode = parse_var("AUTH_TOKEN_MODE", var_or("AUTH_TOKEN_MODE", "username"))?;
        let jwt_secret = lookup("JWT_SECRET").filter(|s| !s.is_empty());

        if token_mode == TokenMode::Jwt && jwt_secret.is_none() {
            bail!("JWT_SECRET must be set when AUTH_TOKEN_MODE=jwt");
        }

        Ok(Self {
            database_url,
            server_addr: var_or("SERVER_ADDR", "0.0.0.0:5000"),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", var_or("DB_MAX_CONNECTIONS", "5"))?,

            token_mode,
            jwt_secret,
            access_token_ttl: parse_var("ACCESS_TOKEN_TTL", var_or("ACCESS_TOKEN_TTL", "86400"))?, // default 1 day

            rate_login_per_min: parse_var("RATE_LOGIN_PER_MIN", var_or("RATE_LOGIN_PER_MIN", "60"))?,
            rate_api_per_min: parse_var("RATE_API_PER_MIN", var_or("RATE_API_PER_MIN", "1000"))?,

            // empty prefix keeps every route at the root, e.g. `/employees`
            api_prefix: var_or("API_PREFIX", "").trim_end_matches('/').to_string(),

            log_dir: var_or("LOG_DIR", "logs"),
            log_level: parse_var("LOG_LEVEL", var_or("LOG_LEVEL", "debug"))?,
        })
    }
}

fn parse_var<T>(key: &str, raw: String) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("invalid value {:?} for {}: {}", raw, key, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = config_from(&[("DATABASE_URL", "mysql://root@localhost/hrms")]).unwrap();

        assert_eq!(config.server_addr, "0.0.0.0:5000");
        assert_eq!(config.token_mode, TokenMode::Username);
        assert_eq!(config.api_prefix, "");
        assert_eq!(config.rate_login_per_min, 60);
        assert_eq!(config.rate_api_per_min, 1000);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert!(config.jwt_secret.is_none());
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = config_from(&[]).err().unwrap();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn jwt_mode_requires_a_secret() {
        let err = config_from(&[
            ("DATABASE_URL", "mysql://root@localhost/hrms"),
            ("AUTH_TOKEN_MODE", "JWT"),
        ])
        .err()
        .unwrap();
        assert!(err.to_string().contains("JWT_SECRET"));

        let config = config_from(&[
            ("DATABASE_URL", "mysql://root@localhost/hrms"),
            ("AUTH_TOKEN_MODE", "jwt"),
            ("JWT_SECRET", "s3cret"),
        ])
        .unwrap();
        assert_eq!(config.token_mode, TokenMode::Jwt);
    }

    #[test]
    fn bad_numbers_name_the_variable() {
        let err = config_from(&[
            ("DATABASE_URL", "mysql://root@localhost/hrms"),
            ("RATE_LOGIN_PER_MIN", "lots"),
        ])
        .err()
        .unwrap();
        assert!(err.to_string().contains("RATE_LOGIN_PER_MIN"));
    }

    #[test]
    fn api_prefix_drops_trailing_slash() {
        let config = config_from(&[
            ("DATABASE_URL", "mysql://root@localhost/hrms"),
            ("API_PREFIX", "/api/"),
        ])
        .unwrap();
        assert_eq!(config.api_prefix, "/api");
    }
}
