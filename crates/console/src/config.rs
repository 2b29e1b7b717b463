//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ARCHITECT_HOST` - Bind address (default: 127.0.0.1)
//! - `ARCHITECT_PORT` - Listen port (default: 3002)
//! - `ARCHITECT_NOTIFICATION_TTL_MS` - Toast lifetime in milliseconds (default: 4000)
//! - `ARCHITECT_SIMULATE_LATENCY` - Keep the artificial request delays (default: true)
//! - `ARCHITECT_LOG_JSON` - Emit JSON logs (read by `main`)
//! - `AUDITOR_API_KEY` - Anthropic API key; the auditor falls back to its
//!   fixed error answer when unset
//! - `AUDITOR_MODEL` - Model ID (default: claude-sonnet-4-20250514)
//! - `AUDITOR_API_URL` - Messages endpoint (default: Anthropic production)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::console::{ConsoleSettings, LatencyProfile};

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_AUDITOR_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_AUDITOR_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_NOTIFICATION_TTL_MS: u64 = 4000;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Console application configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// How long a notification stays visible
    pub notification_ttl: Duration,
    /// Whether auth and directory calls wait like a real backend would
    pub simulate_latency: bool,
    /// Auditor backend; `None` leaves the auditor unconfigured
    pub auditor: Option<AuditorConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Auditor API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AuditorConfig {
    /// Anthropic API key
    pub api_key: SecretString,
    /// Model to use
    pub model: String,
    /// Messages endpoint
    pub api_url: String,
}

impl std::fmt::Debug for AuditorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditorConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3002,
            notification_ttl: Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS),
            simulate_latency: true,
            auditor: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed or the auditor
    /// key fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ARCHITECT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ARCHITECT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ARCHITECT_PORT", "3002")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ARCHITECT_PORT".to_string(), e.to_string()))?;
        let notification_ttl = get_optional_env("ARCHITECT_NOTIFICATION_TTL_MS")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "ARCHITECT_NOTIFICATION_TTL_MS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?
            .map_or(Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS), Duration::from_millis);
        let simulate_latency = get_optional_env("ARCHITECT_SIMULATE_LATENCY")
            .map(|raw| parse_flag(&raw, "ARCHITECT_SIMULATE_LATENCY"))
            .transpose()?
            .unwrap_or(true);
        let auditor = AuditorConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            notification_ttl,
            simulate_latency,
            auditor,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the auditor configuration (if configured).
    #[must_use]
    pub const fn auditor(&self) -> Option<&AuditorConfig> {
        self.auditor.as_ref()
    }

    /// Controller timing derived from this configuration.
    #[must_use]
    pub fn console_settings(&self) -> ConsoleSettings {
        ConsoleSettings {
            latency: if self.simulate_latency {
                LatencyProfile::default()
            } else {
                LatencyProfile::none()
            },
            notification_ttl: self.notification_ttl,
        }
    }
}

impl AuditorConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = get_optional_env("AUDITOR_API_KEY") else {
            return Ok(None);
        };
        validate_secret_strength(&api_key, "AUDITOR_API_KEY")?;

        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("AUDITOR_MODEL", DEFAULT_AUDITOR_MODEL),
            api_url: get_env_or_default("AUDITOR_API_URL", DEFAULT_AUDITOR_API_URL),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean switch (`1/0`, `true/false`, `yes/no`, `on/off`).
fn parse_flag(raw: &str, var_name: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "AUDITOR_API_KEY");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "AUDITOR_API_KEY");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("sk-ant-aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "AUDITOR_API_KEY");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE", "X").unwrap());
        assert!(parse_flag(" 1 ", "X").unwrap());
        assert!(!parse_flag("off", "X").unwrap());
        assert!(matches!(
            parse_flag("maybe", "X"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_socket_addr() {
        let config = ConsoleConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            ..ConsoleConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.socket_addr().port(), 3002);
        assert_eq!(config.notification_ttl, Duration::from_secs(4));
        assert!(config.auditor().is_none());
        assert_eq!(DEFAULT_AUDITOR_MODEL, "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_console_settings_follow_latency_switch() {
        let simulated = ConsoleConfig::default().console_settings();
        assert_eq!(simulated.latency, LatencyProfile::default());

        let instant = ConsoleConfig {
            simulate_latency: false,
            notification_ttl: Duration::from_millis(250),
            ..ConsoleConfig::default()
        }
        .console_settings();
        assert_eq!(instant.latency, LatencyProfile::none());
        assert_eq!(instant.notification_ttl, Duration::from_millis(250));
    }

    #[test]
    fn test_auditor_config_debug_redacts_secrets() {
        let config = AuditorConfig {
            api_key: SecretString::from("sk-ant-super-secret-key"),
            model: "claude-sonnet-4-20250514".to_string(),
            api_url: DEFAULT_AUDITOR_API_URL.to_string(),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("claude-sonnet-4-20250514"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk-ant-super-secret-key"));
    }
}
