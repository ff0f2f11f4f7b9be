//! Device endpoint construction.
//!
//! The caller only supplies the device address. Scheme, port and path come
//! from [`LinkConfig`], producing `ws://{address}:{port}/{path}`.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::net::Ipv6Addr;

use url::{Host, Url};

use crate::error::{Error, Result};

use super::config::LinkConfig;

// ============================================================================
// Constants
// ============================================================================

/// URL scheme for the device link. No TLS variant exists on the device.
const SCHEME: &str = "ws";

// ============================================================================
// Endpoint
// ============================================================================

/// A validated WebSocket URL for the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Builds the endpoint for `address`.
    ///
    /// Surrounding whitespace is ignored. A bare IPv6 literal is wrapped in
    /// brackets.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEndpoint`] if the address is empty or is not a valid
    /// hostname or IP literal.
    pub fn new(address: &str, config: &LinkConfig) -> Result<Self> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_endpoint(address, "address is empty"));
        }

        let host = match trimmed.parse::<Ipv6Addr>() {
            Ok(ip) => format!("[{ip}]"),
            Err(_) => trimmed.to_string(),
        };

        Host::parse(&host).map_err(|e| Error::invalid_endpoint(address, e.to_string()))?;

        let raw = format!("{SCHEME}://{host}:{}/{}", config.port(), config.path());
        let url = Url::parse(&raw).map_err(|e| Error::invalid_endpoint(address, e.to_string()))?;

        Ok(Self { url })
    }

    /// Returns the parsed URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the URL as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn build(address: &str) -> Result<Endpoint> {
        Endpoint::new(address, &LinkConfig::default())
    }

    #[test]
    fn test_ipv4_address() {
        let endpoint = build("192.168.4.1").expect("valid");
        assert_eq!(endpoint.as_str(), "ws://192.168.4.1:81/ws");
    }

    #[test]
    fn test_hostname_is_trimmed() {
        let endpoint = build("  esp32.local \n").expect("valid");
        assert_eq!(endpoint.to_string(), "ws://esp32.local:81/ws");
        assert_eq!(endpoint.url().port(), Some(81));
    }

    #[test]
    fn test_bare_ipv6_is_bracketed() {
        let endpoint = build("fe80::1").expect("valid");
        assert_eq!(endpoint.as_str(), "ws://[fe80::1]:81/ws");
    }

    #[test]
    fn test_empty_address_rejected() {
        let err = build("   ").unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_malformed_addresses_rejected() {
        for address in ["bad host", "host:81", "a/b", "user@host"] {
            let err = build(address).unwrap_err();
            assert!(
                matches!(err, Error::InvalidEndpoint { .. }),
                "{address} should be rejected"
            );
        }
    }

    #[test]
    fn test_custom_port_and_path() {
        let config = LinkConfig::new(8080, "braille", None);
        let endpoint = Endpoint::new("10.0.0.2", &config).expect("valid");
        assert_eq!(endpoint.as_str(), "ws://10.0.0.2:8080/braille");
    }
}
