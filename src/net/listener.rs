//! TCP listener binding.
//!
//! # Responsibilities
//! - Parse the service URI into a bindable authority and a mount path
//! - Bind the TCP listener the HTTP layer serves on

use std::fmt;

use tokio::net::TcpListener;
use url::Url;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// The service URI is not a usable `http://host:port/path` URI.
    InvalidUri(String),
    /// Failed to bind to address.
    Bind(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::InvalidUri(e) => write!(f, "Invalid listener URI: {}", e),
            ListenerError::Bind(e) => write!(f, "Failed to bind: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// Where the service listens, derived from its URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerAddress {
    uri: Url,
    authority: String,
    base_path: String,
}

impl ListenerAddress {
    /// Parse a listener URI such as `http://localhost:2222/rest/`.
    pub fn parse(uri: &str) -> Result<Self, ListenerError> {
        let parsed =
            Url::parse(uri).map_err(|e| ListenerError::InvalidUri(format!("{}: {}", uri, e)))?;

        if parsed.scheme() != "http" {
            return Err(ListenerError::InvalidUri(format!(
                "{}: unsupported scheme '{}'",
                uri,
                parsed.scheme()
            )));
        }
        let host = parsed
            .host_str()
            .ok_or_else(|| ListenerError::InvalidUri(format!("{}: missing host", uri)))?;
        let port = parsed
            .port_or_known_default()
            .ok_or_else(|| ListenerError::InvalidUri(format!("{}: missing port", uri)))?;

        if let Some(segment) = parsed
            .path()
            .split('/')
            .find(|segment| segment.starts_with(':') || segment.starts_with('*'))
        {
            return Err(ListenerError::InvalidUri(format!(
                "{}: path segment '{}' must not start with ':' or '*'",
                uri, segment
            )));
        }

        let authority = format!("{}:{}", host, port);
        let base_path = parsed.path().trim_end_matches('/').to_string();

        Ok(Self {
            uri: parsed,
            authority,
            base_path,
        })
    }

    /// `host:port` to bind.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Mount path of the annotation resources, without trailing slash.
    /// Empty when resources live at the root.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

}

impl fmt::Display for ListenerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

/// Bind a TCP listener for the given address.
pub async fn bind(address: &ListenerAddress) -> Result<TcpListener, ListenerError> {
    let listener = TcpListener::bind(address.authority())
        .await
        .map_err(ListenerError::Bind)?;

    let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

    tracing::info!(
        address = %local_addr,
        uri = %address,
        "Listener bound"
    );

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_path() {
        let address = ListenerAddress::parse("http://localhost:2222/rest/").unwrap();
        assert_eq!(address.authority(), "localhost:2222");
        assert_eq!(address.base_path(), "/rest");
    }

    #[test]
    fn test_parse_root_and_default_port() {
        let address = ListenerAddress::parse("http://example.org/").unwrap();
        assert_eq!(address.authority(), "example.org:80");
        assert_eq!(address.base_path(), "");
    }

    #[test]
    fn test_parse_ipv6() {
        let address = ListenerAddress::parse("http://[::1]:8080/api").unwrap();
        assert_eq!(address.authority(), "[::1]:8080");
        assert_eq!(address.base_path(), "/api");
    }

    #[test]
    fn test_rejects_bad_uris() {
        assert!(ListenerAddress::parse("localhost:2222").is_err());
        assert!(ListenerAddress::parse("https://localhost:2222/").is_err());
        assert!(ListenerAddress::parse("not a uri").is_err());
    }

    #[test]
    fn test_rejects_route_parameter_segments() {
        for uri in [
            "http://127.0.0.1:0/:api/",
            "http://127.0.0.1:0/rest/*rest",
            "http://localhost:2222/v1/:id",
        ] {
            match ListenerAddress::parse(uri) {
                Err(ListenerError::InvalidUri(message)) => {
                    assert!(message.contains("must not start with"))
                }
                other => panic!("expected invalid uri for {uri}, got {other:?}"),
            }
        }
        assert!(ListenerAddress::parse("http://localhost:2222/a:b/").is_ok());
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let address = ListenerAddress::parse("http://127.0.0.1:0/").unwrap();
        let listener = bind(&address).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}
