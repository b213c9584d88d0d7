use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::bitget::{connector::BitgetConnector, signer::BitgetSigner};
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "https://api.bitget.com";

/// Builder for creating Bitget connectors
///
/// Enforces the credential invariant up front: the signing scheme needs
/// all of API key, secret, and passphrase, so a connector cannot be built
/// without them.
#[derive(Default)]
pub struct BitgetBuilder {
    config: Option<ExchangeConfig>,
    rest_timeout: Option<u64>,
}

impl BitgetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set API credentials directly
    pub fn with_credentials(
        mut self,
        api_key: String,
        secret_key: String,
        passphrase: String,
    ) -> Self {
        self.config = Some(ExchangeConfig::new(api_key, secret_key, passphrase));
        self
    }

    /// Override the REST request timeout (seconds)
    pub fn with_rest_timeout(mut self, timeout: u64) -> Self {
        self.rest_timeout = Some(timeout);
        self
    }

    /// Build a REST-only Bitget connector
    pub fn build(self) -> Result<BitgetConnector<ReqwestRest>, ExchangeError> {
        let config = self.config.ok_or_else(|| {
            ExchangeError::AuthError("Bitget credentials are required".to_string())
        })?;

        if !config.has_credentials() {
            return Err(ExchangeError::AuthError(
                "API key, secret key, and passphrase must all be provided".to_string(),
            ));
        }

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut rest_config = RestClientConfig::new(base_url, "bitget".to_string());
        if let Some(timeout) = self.rest_timeout {
            rest_config = rest_config.with_timeout(timeout);
        }

        let signer = Arc::new(BitgetSigner::new(
            config.api_key().to_string(),
            config.secret_key().to_string(),
            config.passphrase().to_string(),
        ));

        let rest = RestClientBuilder::new(rest_config)
            .with_signer(signer)
            .build()?;

        Ok(BitgetConnector::new(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_config_fails() {
        let result = BitgetBuilder::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_with_incomplete_credentials_fails() {
        let result = BitgetBuilder::new()
            .with_credentials("key".to_string(), "secret".to_string(), String::new())
            .build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("passphrase"));
    }

    #[test]
    fn test_build_with_full_credentials() {
        let result = BitgetBuilder::new()
            .with_credentials(
                "key".to_string(),
                "secret".to_string(),
                "passphrase".to_string(),
            )
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_respects_base_url_override() {
        let config = ExchangeConfig::new(
            "key".to_string(),
            "secret".to_string(),
            "passphrase".to_string(),
        )
        .base_url("https://example.test".to_string());

        let result = BitgetBuilder::new().with_config(config).build();
        assert!(result.is_ok());
    }
}
