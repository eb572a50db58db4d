//! Connection settings shared by every command

use clap::Args;
use domain_verify_provider::{
    mask_secret, PlatformConfig, DEFAULT_API_URL, DEFAULT_CLIENT_ID, DEFAULT_MAX_RETRIES,
};

/// Global options; each falls back to an environment variable.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Base URL of the platform API
    #[arg(long, env = "DOMAIN_VERIFY_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Session token used as a bearer credential
    #[arg(long, env = "DOMAIN_VERIFY_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Client name reported when triggering verification
    #[arg(long, env = "DOMAIN_VERIFY_CLIENT_ID", default_value = DEFAULT_CLIENT_ID, global = true)]
    pub client_id: String,

    /// Transport retries for read requests
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES, global = true)]
    pub max_retries: u32,
}

impl ConnectionArgs {
    pub fn platform_config(&self) -> PlatformConfig {
        PlatformConfig {
            api_url: self.api_url.trim_end_matches('/').to_string(),
            session_token: self.token.clone().filter(|t| !t.is_empty()),
            client_id: self.client_id.clone(),
            max_retries: self.max_retries,
        }
    }

    /// Loggable summary; the token is masked.
    pub fn describe(&self) -> String {
        let token = self
            .token
            .as_deref()
            .map_or_else(|| "<none>".to_string(), mask_secret);
        format!(
            "api_url={} client_id={} max_retries={} token={token}",
            self.api_url, self.client_id, self.max_retries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(token: Option<&str>) -> ConnectionArgs {
        ConnectionArgs {
            api_url: "https://api.test/api/".to_string(),
            token: token.map(str::to_string),
            client_id: "tests".to_string(),
            max_retries: 0,
        }
    }

    #[test]
    fn platform_config_trims_url_and_drops_empty_token() {
        let config = args(Some("")).platform_config();
        assert_eq!(config.api_url, "https://api.test/api");
        assert_eq!(config.session_token, None);
        assert_eq!(config.client_id, "tests");
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn describe_masks_token() {
        let text = args(Some("0123456789abcdef")).describe();
        assert!(text.contains("token=0123****"));
        assert!(!text.contains("456789"));
        assert!(args(None).describe().contains("token=<none>"));
    }
}
