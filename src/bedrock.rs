use std::time::Duration;

use serde::Deserialize;

use crate::address::ServerAddress;
use crate::connection::{Connection, Edition, ProxyConfig, StatusPayload, null_as_default};
use crate::error::Result;
use crate::mc_text::Motd;

/// Default port of a Bedrock Edition server.
pub const BEDROCK_DEFAULT_PORT: u16 = Edition::Bedrock.default_port();

/// Client for querying a Bedrock Edition server through mcstatus.io.
///
/// Built and configured the same way as [`JavaServer`](crate::JavaServer).
#[derive(Debug, Clone)]
pub struct BedrockServer {
    address: String,
    port: Option<u16>,
    connection: Connection,
}

impl BedrockServer {
    /// `address` is a hostname or IP, optionally with an embedded `:port`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: None,
            connection: Connection::default(),
        }
    }

    /// Sets the port explicitly. Overrides a port embedded in the address.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the request timeout, clamped to [`MAX_TIMEOUT`](crate::MAX_TIMEOUT).
    /// Defaults to [`DEFAULT_TIMEOUT`](crate::DEFAULT_TIMEOUT).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.connection.set_timeout(timeout);
        self
    }

    /// Points requests at another API root, e.g. a mirror or a local mock.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.connection.base_url = base_url.into();
        self
    }

    /// Routes requests through an `http://`, `https://` or `socks5://` proxy.
    ///
    /// A malformed proxy URL surfaces as [`Error::Transport`](crate::Error::Transport)
    /// when a status is requested.
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.connection.proxy = ProxyConfig::Url(proxy_url.into());
        self
    }

    /// Ignores proxy environment variables.
    pub fn no_proxy(mut self) -> Self {
        self.connection.proxy = ProxyConfig::Disabled;
        self
    }

    /// Resolves the configured address without touching the network.
    pub fn address(&self) -> Result<ServerAddress> {
        ServerAddress::resolve(&self.address, self.port, BEDROCK_DEFAULT_PORT)
    }

    /// Queries the server status, blocking the current thread.
    ///
    /// Must not be called from inside an async runtime; use
    /// [`BedrockServer::async_status`] there.
    #[cfg(feature = "blocking")]
    pub fn status(&self) -> Result<BedrockStatus> {
        let addr = self.address()?;
        self.connection.get_status_blocking(Edition::Bedrock, &addr)
    }

    /// Queries the server status.
    pub async fn async_status(&self) -> Result<BedrockStatus> {
        let addr = self.address()?;
        self.connection.get_status(Edition::Bedrock, &addr).await
    }
}

/// Status of a Bedrock Edition server as reported by mcstatus.io.
///
/// `hostname` and `expires_at` also accept the keys `host` and `expiries_at`;
/// a payload with both spellings of one field fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BedrockStatus {
    pub online: bool,

    #[serde(default, alias = "host")]
    pub hostname: String,

    #[serde(default)]
    pub ip_address: Option<String>,

    pub port: u16,

    #[serde(default, deserialize_with = "null_as_default")]
    pub eula_blocked: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub retrieved_at: u64,

    #[serde(default, alias = "expiries_at", deserialize_with = "null_as_default")]
    pub expires_at: u64,

    #[serde(default)]
    pub version: Option<BedrockVersion>,

    #[serde(default)]
    pub players: Option<BedrockPlayers>,

    #[serde(default)]
    pub motd: Option<Motd>,

    /// Default gamemode, e.g. "Survival".
    #[serde(default)]
    pub gamemode: Option<String>,

    #[serde(default)]
    pub server_id: Option<String>,

    #[serde(default)]
    pub edition: Option<BedrockEdition>,
}

impl StatusPayload for BedrockStatus {
    fn missing_field(&self) -> Option<&'static str> {
        if !self.online {
            return None;
        }
        if self.version.is_none() {
            Some("version")
        } else if self.players.is_none() {
            Some("players")
        } else if self.motd.is_none() {
            Some("motd")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BedrockVersion {
    /// Version name, e.g. "1.21.50".
    pub name: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BedrockPlayers {
    pub online: u32,
    pub max: u32,
}

/// Bedrock flavour a server reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BedrockEdition {
    /// Pocket Edition, i.e. regular Bedrock.
    Mcpe,
    /// Education Edition.
    Mcee,
}
