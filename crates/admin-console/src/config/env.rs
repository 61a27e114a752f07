// crates/admin-console/src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

/// Base URL used when ADMIN_CONSOLE_API_URL is not set (local dev API)
pub const DEFAULT_API_URL: &str = "https://localhost:7283/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Problems found in a [`ConsoleConfig`]. Errors stop startup, warnings
/// are only logged.
#[derive(Debug, Default)]
pub struct ConfigValidation {
    issues: Vec<(Severity, String)>,
}

impl ConfigValidation {
    fn flag(&mut self, severity: Severity, msg: String) {
        self.issues.push((severity, msg));
    }

    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|(s, _)| *s == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.of(Severity::Warning)
    }

    /// Errors joined into one line, for the startup failure message
    pub fn error_summary(&self) -> String {
        self.of(Severity::Error).collect::<Vec<_>>().join("; ")
    }

    fn of(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter(move |(s, _)| *s == severity)
            .map(|(_, msg)| msg.as_str())
    }
}

/// Console configuration - all env vars in one place
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL every API path is appended to (ADMIN_CONSOLE_API_URL)
    pub api_url: String,
    /// Where session state is persisted (ADMIN_CONSOLE_STATE_FILE)
    pub state_file: PathBuf,
    /// Accept self-signed certificates (ADMIN_CONSOLE_INSECURE_TLS)
    pub accept_invalid_certs: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            state_file: default_state_file(),
            accept_invalid_certs: false,
        }
    }
}

impl ConsoleConfig {
    /// Load all environment configuration (call once at startup)
    pub fn from_env() -> Self {
        info!("Loading environment configuration");

        let api_url = read_var("ADMIN_CONSOLE_API_URL").unwrap_or_else(|| {
            debug!(default = DEFAULT_API_URL, "ADMIN_CONSOLE_API_URL not set, using default");
            DEFAULT_API_URL.to_string()
        });

        let state_file = read_var("ADMIN_CONSOLE_STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_state_file);

        let accept_invalid_certs = match read_var("ADMIN_CONSOLE_INSECURE_TLS") {
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Unrecognized ADMIN_CONSOLE_INSECURE_TLS value, treating as off");
                false
            }),
            None => false,
        };

        Self {
            api_url,
            state_file,
            accept_invalid_certs,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::default();

        match Url::parse(&self.api_url) {
            Ok(url) => match url.scheme() {
                "https" => {}
                "http" if is_loopback(&url) => {}
                "http" => validation.flag(
                    Severity::Warning,
                    format!(
                        "API URL '{}' is plain HTTP; bearer tokens will be sent unencrypted",
                        self.api_url
                    ),
                ),
                other => validation.flag(
                    Severity::Error,
                    format!(
                        "API URL '{}' has unsupported scheme '{}' (expected http or https)",
                        self.api_url, other
                    ),
                ),
            },
            Err(e) => validation.flag(
                Severity::Error,
                format!("API URL '{}' is invalid: {}", self.api_url, e),
            ),
        }

        if self.accept_invalid_certs {
            validation.flag(
                Severity::Warning,
                "ADMIN_CONSOLE_INSECURE_TLS is on; certificate checks are disabled".to_string(),
            );
        }

        validation
    }
}

/// ~/.admin-console/session.json
pub fn default_state_file() -> PathBuf {
    state_dir().join("session.json")
}

/// ~/.admin-console
pub fn state_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".admin-console")
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(d)) => d == "localhost",
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
