//! TCP listener binding shared by the application and metrics listeners.
//!
//! # Responsibilities
//! - Parse the configured bind address
//! - Bind the socket and report the resolved local address
//! - Distinguish bad addresses from bind failures

use std::net::SocketAddr;

use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The configured address does not parse.
    #[error("Invalid bind address `{address}`: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },

    /// The OS refused the bind (port in use, permission denied, ...).
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },
}

/// Bind a TCP listener on `address`.
///
/// Port `0` asks the OS for an ephemeral port; use `local_addr` on the
/// returned listener to learn which one was picked.
pub async fn bind(address: &str) -> Result<TcpListener, ListenerError> {
    let addr: SocketAddr = address.parse().map_err(|source| ListenerError::Address {
        address: address.to_string(),
        source,
    })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind {
            address: addr,
            source,
        })?;

    let local_addr = listener.local_addr().map_err(|source| ListenerError::Bind {
        address: addr,
        source,
    })?;

    tracing::debug!(address = %local_addr, "Listener bound");

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_ephemeral_port() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn bind_rejects_bad_address() {
        let err = bind("not-an-address").await.unwrap_err();
        assert!(matches!(err, ListenerError::Address { .. }));
    }

    #[tokio::test]
    async fn bind_reports_port_in_use() {
        let first = bind("127.0.0.1:0").await.unwrap();
        let taken = first.local_addr().unwrap().to_string();

        let err = bind(&taken).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { .. }));
    }
}
