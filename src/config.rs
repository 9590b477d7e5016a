//! Configuration loaded from environment variables
use std::fmt;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_COMPANY_NAME, DEFAULT_ROSTER_PATH, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
};
use crate::error::ConfigError;

/// How the SMTP connection is secured
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS
    StartTls,
    /// TLS from the first byte (usually port 465)
    Tls,
    /// No encryption, for local test relays only
    None,
}

/// Sender account and its credential
#[derive(Clone, PartialEq, Eq)]
pub struct SenderCredentials {
    pub account: String,
    pub password: String,
}

impl fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and how to reach the mail relay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub tls: TlsMode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub credentials: SenderCredentials,
    pub smtp: SmtpSettings,
    pub roster_path: PathBuf,
    pub company_name: String,
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    ///
    /// `EMAIL` and `PASSWORD` are required; everything else has a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let account = get("EMAIL").ok_or(ConfigError::Missing("EMAIL"))?;
        let password = get("PASSWORD").ok_or(ConfigError::Missing("PASSWORD"))?;

        let host = get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());

        let port = match get("SMTP_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "SMTP_PORT",
                value,
                reason: "expected a port number",
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        let tls = match get("SMTP_TLS") {
            Some(value) => parse_tls_mode(&value).ok_or(ConfigError::Invalid {
                key: "SMTP_TLS",
                value,
                reason: "expected starttls, tls or none",
            })?,
            None => TlsMode::StartTls,
        };

        let roster_path = get("ROSTER_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROSTER_PATH));

        let company_name = get("COMPANY_NAME").unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string());

        Ok(Self {
            credentials: SenderCredentials { account, password },
            smtp: SmtpSettings { host, port, tls },
            roster_path,
            company_name,
        })
    }
}

fn parse_tls_mode(value: &str) -> Option<TlsMode> {
    match value.to_ascii_lowercase().as_str() {
        "starttls" => Some(TlsMode::StartTls),
        "tls" | "ssl" => Some(TlsMode::Tls),
        "none" => Some(TlsMode::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::from_lookup(lookup(&[("EMAIL", "hr@x.com"), ("PASSWORD", "secret")])).unwrap();

        assert_eq!(config.credentials.account, "hr@x.com");
        assert_eq!(config.smtp.host, DEFAULT_SMTP_HOST);
        assert_eq!(config.smtp.port, DEFAULT_SMTP_PORT);
        assert_eq!(config.smtp.tls, TlsMode::StartTls);
        assert_eq!(config.roster_path, PathBuf::from(DEFAULT_ROSTER_PATH));
        assert_eq!(config.company_name, DEFAULT_COMPANY_NAME);
    }

    #[test]
    fn test_missing_credentials() {
        assert_eq!(
            Config::from_lookup(lookup(&[("PASSWORD", "secret")])),
            Err(ConfigError::Missing("EMAIL"))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("EMAIL", "hr@x.com")])),
            Err(ConfigError::Missing("PASSWORD"))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("EMAIL", "hr@x.com"), ("PASSWORD", "   ")])),
            Err(ConfigError::Missing("PASSWORD"))
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("EMAIL", "hr@x.com"),
            ("PASSWORD", "secret"),
            ("SMTP_HOST", "localhost"),
            ("SMTP_PORT", "1025"),
            ("SMTP_TLS", "none"),
            ("ROSTER_PATH", "staff.csv"),
            ("COMPANY_NAME", "Acme"),
        ]))
        .unwrap();

        assert_eq!(
            config.smtp,
            SmtpSettings {
                host: "localhost".to_string(),
                port: 1025,
                tls: TlsMode::None,
            }
        );
        assert_eq!(config.roster_path, PathBuf::from("staff.csv"));
        assert_eq!(config.company_name, "Acme");
    }

    #[test]
    fn test_invalid_port_and_tls() {
        let base = [("EMAIL", "hr@x.com"), ("PASSWORD", "secret")];

        let mut with_port = base.to_vec();
        with_port.push(("SMTP_PORT", "smtp"));
        assert!(matches!(
            Config::from_lookup(lookup(&with_port)),
            Err(ConfigError::Invalid { key: "SMTP_PORT", .. })
        ));

        let mut with_tls = base.to_vec();
        with_tls.push(("SMTP_TLS", "maybe"));
        assert!(matches!(
            Config::from_lookup(lookup(&with_tls)),
            Err(ConfigError::Invalid { key: "SMTP_TLS", .. })
        ));
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let credentials = SenderCredentials {
            account: "hr@x.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("hr@x.com"));
        assert!(!debug.contains("hunter2"));
    }
}
