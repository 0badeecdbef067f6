/*
 * Responsibility
 * - Read settings from the environment (.env supported): listen address, CORS, auth policy
 * - Validate values (missing or invalid settings abort start-up)
 * - AuthPolicy / RolePolicy are built once here and injected; nothing reads env at request time
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::services::auth::{ClaimKeys, RolePolicy, roles::DEFAULT_ROLE_ERROR_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// How bearer tokens are turned into claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    /// Signed JWT checked with the secret (or PEM public key) and algorithm.
    Signed,
    /// Compact JWE decrypted with a key derived from the secret.
    Encrypted,
}

impl FromStr for TokenMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "signed" | "jwt" => Ok(Self::Signed),
            "encrypted" | "jwe" => Ok(Self::Encrypted),
            _ => Err(ConfigError::Invalid("JWT_MODE")),
        }
    }
}

#[derive(Clone)]
pub struct AuthPolicy {
    pub secret: String,
    pub algorithm: Algorithm,
    pub mode: TokenMode,
    pub leeway_seconds: u64,
    pub claim_keys: ClaimKeys,
}

impl fmt::Debug for AuthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthPolicy")
            .field("algorithm", &self.algorithm)
            .field("mode", &self.mode)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("claim_keys", &self.claim_keys)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout_seconds: u64,

    pub auth: AuthPolicy,
    pub roles: RolePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Parse settings from any key lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match var("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV"));

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout_seconds = var("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let secret = var("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?
            .replace("\\n", "\n");

        let algorithm = match var("JWT_ALGORITHM") {
            Some(s) => Algorithm::from_str(s.trim())
                .map_err(|_| ConfigError::Invalid("JWT_ALGORITHM"))?,
            None => Algorithm::HS256,
        };

        let mode = match var("JWT_MODE") {
            Some(s) => s.parse()?,
            None => TokenMode::Signed,
        };

        let leeway_seconds = match var("JWT_LEEWAY_SECONDS") {
            Some(s) => s
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("JWT_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let defaults = ClaimKeys::default();
        let claim_keys = ClaimKeys {
            user_id: var("JWT_USER_ID_PROP").unwrap_or(defaults.user_id),
            user_name: var("JWT_USER_NAME_PROP").unwrap_or(defaults.user_name),
            role: var("JWT_USER_ROLE_PROP").unwrap_or(defaults.role),
            roles: var("JWT_USER_ROLES_PROP").unwrap_or(defaults.roles),
            expiry: var("JWT_TOKEN_EXPIRY_PROP").unwrap_or(defaults.expiry),
        };

        let case_sensitive = match var("ROLE_CHECK_CASE_SENSITIVE") {
            Some(s) => parse_bool(&s).ok_or(ConfigError::Invalid("ROLE_CHECK_CASE_SENSITIVE"))?,
            None => false,
        };

        let error_message = var("ROLE_CHECK_ERROR_MESSAGE")
            .unwrap_or_else(|| DEFAULT_ROLE_ERROR_MESSAGE.to_string());

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_timeout_seconds,
            auth: AuthPolicy {
                secret,
                algorithm,
                mode,
                leeway_seconds,
                claim_keys,
            },
            roles: RolePolicy {
                case_sensitive,
                error_message,
            },
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = config(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.auth.algorithm, Algorithm::HS256);
        assert_eq!(config.auth.mode, TokenMode::Signed);
        assert_eq!(config.auth.leeway_seconds, 0);
        assert_eq!(config.auth.claim_keys, ClaimKeys::default());
        assert_eq!(config.roles, RolePolicy::default());
    }

    #[test]
    fn missing_secret_fails() {
        assert!(matches!(
            config(&[]),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn overrides_are_read() {
        let config = config(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ALGORITHM", "HS512"),
            ("JWT_MODE", "encrypted"),
            ("JWT_USER_ROLE_PROP", "group"),
            ("ROLE_CHECK_CASE_SENSITIVE", "true"),
            ("ROLE_CHECK_ERROR_MESSAGE", "no :user_role"),
            ("APP_ENV", "prod"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();

        assert_eq!(config.auth.algorithm, Algorithm::HS512);
        assert_eq!(config.auth.mode, TokenMode::Encrypted);
        assert_eq!(config.auth.claim_keys.role, "group");
        assert!(config.roles.case_sensitive);
        assert_eq!(config.roles.error_message, "no :user_role");
        assert!(config.app_env.is_production());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            config(&[("JWT_SECRET", "s"), ("JWT_ALGORITHM", "none")]),
            Err(ConfigError::Invalid("JWT_ALGORITHM"))
        ));
        assert!(matches!(
            config(&[("JWT_SECRET", "s"), ("JWT_MODE", "plain")]),
            Err(ConfigError::Invalid("JWT_MODE"))
        ));
        assert!(matches!(
            config(&[("JWT_SECRET", "s"), ("ROLE_CHECK_CASE_SENSITIVE", "maybe")]),
            Err(ConfigError::Invalid("ROLE_CHECK_CASE_SENSITIVE"))
        ));
    }

    #[test]
    fn debug_hides_secret() {
        let config = config(&[("JWT_SECRET", "very-private")]).unwrap();
        assert!(!format!("{:?}", config.auth).contains("very-private"));
    }
}
