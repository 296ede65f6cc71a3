//! Startup settings built from CLI flags and environment variables.
//!
//! [`Settings`] is the validated form of [`RunArgs`](crate::cli::RunArgs).
//! Validation is fail-fast: a missing backend URL or API key, a malformed
//! URL, or a bad mount prefix aborts the process before the router ever
//! accepts traffic.

use url::Url;

use crate::cli::RunArgs;
use crate::error::GatewayError;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Normalized mount prefix: either `"/"` or `/segment[/segment...]`
    /// without a trailing slash.
    pub prefix: String,
    pub api_url: Url,
    pub api_key: String,
    pub timeout_ms: u64,
    pub max_body: usize,
}

impl Settings {
    pub fn from_run_args(args: &RunArgs) -> Result<Self, GatewayError> {
        let raw_url = args
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GatewayError::MissingApiUrl {
                hint: "Provide --api-url <url> or set MONITOR_API_URL.".into(),
            })?;

        let api_url = Url::parse(raw_url).map_err(|e| GatewayError::InvalidApiUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;
        let scheme = api_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(GatewayError::InvalidApiUrl {
                url: raw_url.to_string(),
                reason: format!("unsupported scheme '{scheme}' (expected http or https)"),
            });
        }

        let api_key = args
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GatewayError::MissingApiKey {
                hint: "Provide --api-key <key> or set MONITOR_API_KEY.".into(),
            })?
            .to_string();

        Ok(Self {
            host: args.host.clone(),
            port: args.port,
            prefix: normalize_prefix(&args.prefix)?,
            api_url,
            api_key,
            timeout_ms: args.timeout,
            max_body: args.max_body,
        })
    }
}

/// Normalize a mount prefix: trim trailing slashes, require a leading one.
/// `"/"` (mount at root) stays as-is.
pub fn normalize_prefix(prefix: &str) -> Result<String, GatewayError> {
    if !prefix.starts_with('/') {
        return Err(GatewayError::InvalidPrefix(prefix.to_string()));
    }
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LogLevel;

    fn run_args() -> RunArgs {
        RunArgs {
            port: 3000,
            host: "0.0.0.0".into(),
            api_url: Some("https://prime.example.com".into()),
            api_key: Some("key-123".into()),
            prefix: "/".into(),
            log_level: LogLevel::Info,
            pretty: false,
            json: false,
            timeout: 5000,
            max_body: 1_048_576,
        }
    }

    #[test]
    fn valid_args_pass() {
        let settings = Settings::from_run_args(&run_args()).unwrap();
        assert_eq!(settings.prefix, "/");
        assert_eq!(settings.api_url.as_str(), "https://prime.example.com/");
        assert_eq!(settings.api_key, "key-123");
    }

    #[test]
    fn missing_api_url_fails() {
        let mut args = run_args();
        args.api_url = None;
        let err = Settings::from_run_args(&args).unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiUrl { .. }));
    }

    #[test]
    fn empty_api_key_fails() {
        let mut args = run_args();
        args.api_key = Some("   ".into());
        let err = Settings::from_run_args(&args).unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey { .. }));
    }

    #[test]
    fn non_http_scheme_fails() {
        let mut args = run_args();
        args.api_url = Some("ftp://prime.example.com".into());
        let err = Settings::from_run_args(&args).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidApiUrl { .. }));
    }

    #[test]
    fn prefix_without_leading_slash_fails() {
        let mut args = run_args();
        args.prefix = "api/monitor".into();
        let err = Settings::from_run_args(&args).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidPrefix(_)));
    }

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(normalize_prefix("/").unwrap(), "/");
        assert_eq!(normalize_prefix("///").unwrap(), "/");
        assert_eq!(normalize_prefix("/api/monitor/").unwrap(), "/api/monitor");
        assert_eq!(normalize_prefix("/api/monitor").unwrap(), "/api/monitor");
    }
}
