use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignatureResult, Signer};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

pub struct BitgetSigner {
    api_key: String,
    secret_key: String,
    passphrase: String,
}

impl BitgetSigner {
    pub fn new(api_key: String, secret_key: String, passphrase: String) -> Self {
        Self {
            api_key,
            secret_key,
            passphrase,
        }
    }

    /// Generate the signature for Bitget API requests
    /// The prehash string format is: timestamp + METHOD + requestPath + body
    fn generate_signature(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> Result<String, ExchangeError> {
        let prehash = format!(
            "{}{}{}{}",
            timestamp,
            method.to_uppercase(),
            request_path,
            body
        );

        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| ExchangeError::AuthError(format!("Failed to create HMAC: {}", e)))?;

        mac.update(prehash.as_bytes());
        let signature_bytes = mac.finalize().into_bytes();

        // Bitget requires base64 encoding of the signature
        Ok(general_purpose::STANDARD.encode(signature_bytes))
    }
}

impl Signer for BitgetSigner {
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult {
        // Bitget signs the transport-supplied epoch-milliseconds timestamp
        let timestamp = timestamp.to_string();

        // Build request path with query string if present
        let request_path = if query_string.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, query_string)
        };

        let body_str = std::str::from_utf8(body)
            .map_err(|e| ExchangeError::AuthError(format!("Invalid body encoding: {}", e)))?;

        let signature = self.generate_signature(&timestamp, method, &request_path, body_str)?;

        let mut headers = HashMap::new();
        headers.insert("ACCESS-KEY".to_string(), self.api_key.clone());
        headers.insert("ACCESS-SIGN".to_string(), signature);
        headers.insert("ACCESS-TIMESTAMP".to_string(), timestamp);
        headers.insert("ACCESS-PASSPHRASE".to_string(), self.passphrase.clone());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("locale".to_string(), "en-US".to_string());

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> BitgetSigner {
        BitgetSigner::new(
            "test_key".to_string(),
            "test_secret".to_string(),
            "test_passphrase".to_string(),
        )
    }

    #[test]
    fn test_signature_is_deterministic() {
        let s = signer();
        let a = s
            .generate_signature("1700000000000", "GET", "/api/v2/public/time", "")
            .unwrap();
        let b = s
            .generate_signature("1700000000000", "GET", "/api/v2/public/time", "")
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_changes_with_any_input() {
        let s = signer();
        let base = s
            .generate_signature("1700000000000", "GET", "/api/v2/public/time", "")
            .unwrap();

        let other_ts = s
            .generate_signature("1700000000001", "GET", "/api/v2/public/time", "")
            .unwrap();
        let other_method = s
            .generate_signature("1700000000000", "POST", "/api/v2/public/time", "")
            .unwrap();
        let other_path = s
            .generate_signature("1700000000000", "GET", "/api/v2/public/timf", "")
            .unwrap();
        let other_body = s
            .generate_signature("1700000000000", "GET", "/api/v2/public/time", "x")
            .unwrap();

        assert_ne!(base, other_ts);
        assert_ne!(base, other_method);
        assert_ne!(base, other_path);
        assert_ne!(base, other_body);
    }

    #[test]
    fn test_signature_is_base64_of_sha256_digest() {
        let s = signer();
        let sig = s
            .generate_signature("1700000000000", "GET", "/api/v2/public/time", "")
            .unwrap();
        // 32-byte digest encodes to 44 base64 characters
        assert_eq!(sig.len(), 44);
        assert!(general_purpose::STANDARD.decode(&sig).is_ok());
    }

    #[test]
    fn test_method_is_uppercased_before_signing() {
        let s = signer();
        let lower = s
            .generate_signature("1700000000000", "get", "/api/v2/public/time", "")
            .unwrap();
        let upper = s
            .generate_signature("1700000000000", "GET", "/api/v2/public/time", "")
            .unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_sign_request_headers() {
        let s = signer();
        let headers = s
            .sign_request("GET", "/api/v2/spot/market/fills", "symbol=BTCUSDT", &[], 1_700_000_000_000)
            .unwrap();

        assert_eq!(headers.get("ACCESS-KEY").unwrap(), "test_key");
        assert_eq!(headers.get("ACCESS-TIMESTAMP").unwrap(), "1700000000000");
        assert_eq!(headers.get("ACCESS-PASSPHRASE").unwrap(), "test_passphrase");
        assert_eq!(headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(headers.get("locale").unwrap(), "en-US");

        // Signature must cover the query string
        let expected = s
            .generate_signature(
                "1700000000000",
                "GET",
                "/api/v2/spot/market/fills?symbol=BTCUSDT",
                "",
            )
            .unwrap();
        assert_eq!(headers.get("ACCESS-SIGN").unwrap(), &expected);
    }
}
